// src/domain/tag.rs
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagId(pub i64);

impl TagId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("tag id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<TagId> for i64 {
    fn from(value: TagId) -> Self {
        value.0
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Entry of the tag catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
}

#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Return the catalog entries whose id is in `ids`. Ids without a catalog
    /// entry are simply absent from the result.
    async fn find_by_ids(&self, ids: &[TagId]) -> DomainResult<Vec<Tag>>;
}
