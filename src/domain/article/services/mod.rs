// src/domain/article/services/mod.rs
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::ports::util::SlugGenerator;
use crate::domain::article::identity::ArticleIdentity;
use crate::domain::article::repository::ArticleReadRepository;
use crate::domain::article::value_objects::{ArticleSlug, SLUG_MAX_CHARS};
use crate::domain::errors::DomainResult;

// Leaves room for a `-N` suffix.
const SLUG_BASE_MAX_CHARS: usize = SLUG_MAX_CHARS - 12;

/// Domain service responsible for producing unique slugs for articles.
pub struct ArticleSlugService {
    read_repo: Arc<dyn ArticleReadRepository>,
    generator: Arc<dyn SlugGenerator>,
}

impl ArticleSlugService {
    pub fn new(
        read_repo: Arc<dyn ArticleReadRepository>,
        generator: Arc<dyn SlugGenerator>,
    ) -> Self {
        Self {
            read_repo,
            generator,
        }
    }

    /// Slugify `source` and append `-1`, `-2`, ... until no other article
    /// holds the candidate. The article identified by `ignore_id` may keep
    /// its own slug. A source with nothing sluggable falls back to
    /// `article-<unix seconds of now>`.
    pub async fn generate_unique_slug(
        &self,
        source: &str,
        ignore_id: Option<ArticleIdentity>,
        now: DateTime<Utc>,
    ) -> DomainResult<ArticleSlug> {
        let base = self.generator.slugify(source);
        let base: String = base.chars().take(SLUG_BASE_MAX_CHARS).collect();
        let base = base.trim_end_matches('-');
        let base_slug = if base.is_empty() {
            format!("article-{}", now.timestamp())
        } else {
            base.to_string()
        };

        let mut candidate = base_slug.clone();
        let mut counter = 1u64;

        loop {
            let slug = ArticleSlug::new(candidate.clone())?;
            match self.read_repo.slug_owner(&slug).await? {
                Some(owner) if ignore_id == Some(owner) => return Ok(slug),
                Some(_) => {
                    candidate = format!("{base_slug}-{counter}");
                    counter += 1;
                }
                None => return Ok(slug),
            }
        }
    }
}
