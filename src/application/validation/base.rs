// src/application/validation/base.rs
use super::{FieldErrors, check_max_chars, normalized};
use crate::application::dto::ArticleInput;
use crate::domain::article::value_objects::{SLUG_MAX_CHARS, TITLE_MAX_CHARS, is_slug_shaped};
use crate::domain::article::{ArticleSlug, ArticleTitle};
use crate::domain::tag::TagId;

pub(super) const LEAD_MAX_CHARS: usize = 1000;

/// Fields shared by every article kind.
#[derive(Debug, Clone)]
pub struct BaseFields {
    pub title: ArticleTitle,
    /// Explicit slug; derived from the title when absent.
    pub slug: Option<ArticleSlug>,
    pub lead: Option<String>,
}

pub(super) fn validate(input: &ArticleInput) -> FieldErrors {
    let mut errors = FieldErrors::new();

    match normalized(input.title.as_ref()) {
        None => errors.add("title", "title is required"),
        Some(_) => check_max_chars(&mut errors, "title", input.title.as_ref(), TITLE_MAX_CHARS),
    }

    if let Some(slug) = normalized(input.slug.as_ref()) {
        if slug.chars().count() > SLUG_MAX_CHARS {
            errors.add("slug", format!("slug must be at most {SLUG_MAX_CHARS} characters"));
        } else if !is_slug_shaped(&slug) {
            errors.add(
                "slug",
                "slug may only contain lowercase letters, digits and single dashes",
            );
        }
    }

    check_max_chars(&mut errors, "lead", input.lead.as_ref(), LEAD_MAX_CHARS);

    if let Some(tags) = &input.tags {
        if tags.iter().any(|id| *id <= 0) {
            errors.add("tags", "tags must only contain positive ids");
        }
    }

    errors
}

pub(super) fn extract(input: &ArticleInput) -> Result<BaseFields, FieldErrors> {
    let title = ArticleTitle::new(input.title.clone().unwrap_or_default())
        .map_err(|err| FieldErrors::single("title", err.to_string()))?;
    let slug = normalized(input.slug.as_ref())
        .map(ArticleSlug::new)
        .transpose()
        .map_err(|err| FieldErrors::single("slug", err.to_string()))?;

    Ok(BaseFields {
        title,
        slug,
        lead: normalized(input.lead.as_ref()),
    })
}

/// Requested tag ids, ascending and without duplicates.
pub(super) fn extract_tags(input: &ArticleInput) -> Result<Option<Vec<TagId>>, FieldErrors> {
    let Some(raw) = &input.tags else {
        return Ok(None);
    };

    let mut ids = raw
        .iter()
        .map(|id| TagId::new(*id))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| FieldErrors::single("tags", err.to_string()))?;
    ids.sort_unstable();
    ids.dedup();
    Ok(Some(ids))
}
