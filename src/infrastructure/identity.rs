// src/infrastructure/identity.rs
use crate::application::ports::identity::IdentityAllocator;
use crate::domain::article::ArticleIdentity;
use crate::domain::errors::DomainResult;
use uuid::Uuid;

/// Allocates version-1 UUIDs so that storage keys sort by creation time.
///
/// The node id is picked at random once per process; the clock sequence is
/// handled by the `uuid` crate's shared context.
#[derive(Debug, Clone)]
pub struct TimeOrderedIdentityAllocator {
    node_id: [u8; 6],
}

impl TimeOrderedIdentityAllocator {
    pub fn new() -> Self {
        let random = Uuid::new_v4();
        let mut node_id = [0u8; 6];
        node_id.copy_from_slice(&random.as_bytes()[..6]);
        Self::with_node_id(node_id)
    }

    pub fn with_node_id(node_id: [u8; 6]) -> Self {
        Self { node_id }
    }
}

impl Default for TimeOrderedIdentityAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityAllocator for TimeOrderedIdentityAllocator {
    fn allocate(&self) -> DomainResult<ArticleIdentity> {
        ArticleIdentity::from_uuid(Uuid::now_v1(&self.node_id))
    }
}
