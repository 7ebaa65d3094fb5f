// src/application/validation/post.rs
use super::{FieldErrors, check_max_chars, normalized};
use crate::application::dto::ArticleInput;
use crate::domain::article::PostExtension;

pub(super) const SUB_TITLE_MAX_CHARS: usize = 255;
pub(super) const BODY_MAX_CHARS: usize = 100_000;

pub(super) fn validate(input: &ArticleInput) -> FieldErrors {
    let mut errors = FieldErrors::new();
    check_max_chars(&mut errors, "sub_title", input.sub_title.as_ref(), SUB_TITLE_MAX_CHARS);
    check_max_chars(&mut errors, "body", input.body.as_ref(), BODY_MAX_CHARS);
    errors
}

pub(super) fn extract(input: &ArticleInput) -> PostExtension {
    PostExtension {
        sub_title: normalized(input.sub_title.as_ref()),
        body: normalized(input.body.as_ref()),
        featured_img: None,
        main_img: None,
    }
}
