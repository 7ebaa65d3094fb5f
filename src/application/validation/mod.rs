// src/application/validation/mod.rs
//! Two-stage validation of article input.
//!
//! The base validator covers the fields every kind shares, the kind validator
//! covers the extension fields. Both always run and their messages are merged,
//! so a caller sees every problem at once. Validation (`validate`) and value
//! extraction (`extract`) are separate pure functions.
mod base;
mod discussion;
mod errors;
mod post;

pub use base::BaseFields;
pub use errors::FieldErrors;

use crate::application::dto::ArticleInput;
use crate::domain::article::{ArticleExtension, ArticleKind};
use crate::domain::tag::TagId;

/// Input that passed both validators, mapped to typed values.
#[derive(Debug, Clone)]
pub struct ValidatedArticle {
    pub base: BaseFields,
    /// Extension row without media; media is attached by the workflow.
    pub extension: ArticleExtension,
    /// `None` when the caller did not mention tags at all.
    pub tags: Option<Vec<TagId>>,
}

/// Run the base and the `kind` validator against `input`.
pub fn validate(kind: ArticleKind, input: &ArticleInput) -> Result<ValidatedArticle, FieldErrors> {
    let mut errors = base::validate(input);
    errors.merge(validate_extension(kind, input));
    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ValidatedArticle {
        base: base::extract(input)?,
        extension: extract_extension(kind, input),
        tags: base::extract_tags(input)?,
    })
}

pub fn validate_extension(kind: ArticleKind, input: &ArticleInput) -> FieldErrors {
    match kind {
        ArticleKind::Post => post::validate(input),
        ArticleKind::Discussion => discussion::validate(input),
    }
}

pub fn extract_extension(kind: ArticleKind, input: &ArticleInput) -> ArticleExtension {
    match kind {
        ArticleKind::Post => ArticleExtension::Post(post::extract(input)),
        ArticleKind::Discussion => ArticleExtension::Discussion(discussion::extract(input)),
    }
}

/// Trimmed text, `None` when absent or blank.
pub(crate) fn normalized(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

pub(crate) fn check_max_chars(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<&String>,
    max: usize,
) {
    if let Some(value) = normalized(value) {
        if value.chars().count() > max {
            errors.add(field, format!("{field} must be at most {max} characters"));
        }
    }
}
