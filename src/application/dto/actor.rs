// src/application/dto/actor.rs
use crate::domain::user::UserId;

/// Caller on whose behalf a write runs. Authentication happens upstream; the
/// workflow only records the id as the article owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedActor {
    pub id: UserId,
}

impl AuthenticatedActor {
    pub fn new(id: UserId) -> Self {
        Self { id }
    }
}
