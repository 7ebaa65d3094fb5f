// src/application/ports/identity.rs
use crate::domain::article::ArticleIdentity;
use crate::domain::errors::DomainResult;

/// Source of fresh article identities. Allocation never performs I/O.
pub trait IdentityAllocator: Send + Sync {
    fn allocate(&self) -> DomainResult<ArticleIdentity>;
}
