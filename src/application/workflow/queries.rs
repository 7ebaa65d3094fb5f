// src/application/workflow/queries.rs
use super::ArticleWorkflow;
use crate::{
    application::{
        dto::{ArticleDetailDto, ArticleSummaryDto, Page},
        error::ApplicationResult,
        validation::FieldErrors,
    },
    domain::article::{ArticleRecord, ArticleSlug},
};

pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;

impl ArticleWorkflow {
    /// Newest first. `page` and `limit` start at 1; `limit` is capped at
    /// [`MAX_LIMIT`].
    pub async fn list(&self, page: i64, limit: i64) -> ApplicationResult<Page<ArticleSummaryDto>> {
        let (page, limit) = normalize_paging(page, limit)?;
        let offset = u64::from(page - 1) * u64::from(limit);

        let (records, total) = self.read_repo.list_page(self.kind, offset, limit).await?;

        let items = records.into_iter().map(Into::into).collect();
        Ok(Page::new(items, page, limit, total))
    }

    pub async fn get_by_identity(&self, id: &str) -> ApplicationResult<ArticleDetailDto> {
        let identity = self.parse_identity(id)?;
        let record = self
            .read_repo
            .find_by_identity(self.kind, &identity)
            .await?
            .ok_or_else(|| self.not_found())?;
        self.detail(record).await
    }

    pub async fn get_by_slug(&self, slug: &str) -> ApplicationResult<ArticleDetailDto> {
        let slug = ArticleSlug::new(slug).map_err(|_| self.not_found())?;
        let record = self
            .read_repo
            .find_by_slug(self.kind, &slug)
            .await?
            .ok_or_else(|| self.not_found())?;
        self.detail(record).await
    }

    async fn detail(&self, record: ArticleRecord) -> ApplicationResult<ArticleDetailDto> {
        let tags = self.read_repo.tag_ids(&record.article.identity).await?;
        Ok(ArticleDetailDto::from_record(record, &tags))
    }
}

fn normalize_paging(page: i64, limit: i64) -> Result<(u32, u32), FieldErrors> {
    let mut errors = FieldErrors::new();
    if page < 1 {
        errors.add("page", "page must be at least 1");
    }
    if limit < 1 {
        errors.add("limit", "limit must be at least 1");
    }
    if !errors.is_empty() {
        return Err(errors);
    }

    let page = u32::try_from(page).map_err(|_| FieldErrors::single("page", "page is too large"))?;
    let limit = u32::try_from(limit.min(i64::from(MAX_LIMIT))).unwrap_or(MAX_LIMIT);
    Ok((page, limit))
}
