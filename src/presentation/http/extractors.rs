// src/presentation/http/extractors.rs
use crate::{
    application::{dto::AuthenticatedActor, error::ApplicationError},
    domain::user::UserId,
};
use axum::{extract::FromRequestParts, http::request::Parts};

use super::error::HttpError;

/// Header carrying the id of the caller, set by the authenticating proxy.
pub const ACTOR_HEADER: &str = "x-actor-id";

#[derive(Debug, Clone)]
pub struct Actor(pub AuthenticatedActor);

impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(ACTOR_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                HttpError::from_error(ApplicationError::unauthorized(format!(
                    "missing {ACTOR_HEADER} header"
                )))
            })?;

        let id = raw
            .trim()
            .parse::<i64>()
            .ok()
            .and_then(|id| UserId::new(id).ok())
            .ok_or_else(|| {
                HttpError::from_error(ApplicationError::unauthorized(format!(
                    "invalid {ACTOR_HEADER} header"
                )))
            })?;

        Ok(Self(AuthenticatedActor::new(id)))
    }
}
