// src/application/validation/discussion.rs
use super::{FieldErrors, check_max_chars, normalized};
use crate::application::dto::ArticleInput;
use crate::domain::article::DiscussionExtension;

pub(super) const BODY_MAX_CHARS: usize = 10_000;

pub(super) fn validate(input: &ArticleInput) -> FieldErrors {
    let mut errors = FieldErrors::new();
    check_max_chars(&mut errors, "body", input.body.as_ref(), BODY_MAX_CHARS);
    errors
}

pub(super) fn extract(input: &ArticleInput) -> DiscussionExtension {
    DiscussionExtension {
        body: normalized(input.body.as_ref()),
        closed: input.closed.unwrap_or(false),
    }
}
