// src/application/workflow/update.rs
use super::{
    ArticleWorkflow,
    unit_of_work::{finish, update_all},
};
use crate::{
    application::{
        dto::{ArticleDetailDto, ArticleInput},
        error::ApplicationResult,
        validation,
    },
    domain::article::{ArticleRecord, ArticleUpdate},
};

impl ArticleWorkflow {
    /// Replace the article's fields and its tag set. Uploads that are absent
    /// or empty keep the stored media reference.
    pub async fn update(&self, input: ArticleInput, id: &str) -> ApplicationResult<ArticleDetailDto> {
        let identity = self.parse_identity(id)?;
        let existing = self
            .read_repo
            .find_by_identity(self.kind, &identity)
            .await?
            .ok_or_else(|| self.not_found())?;

        let validated = validation::validate(self.kind, &input)?;

        let tags = self
            .resolve_tags(validated.tags.as_deref().unwrap_or_default())
            .await?;
        let now = self.clock.now();
        let slug = self
            .unique_slug(&validated.base, Some(identity), now)
            .await?;

        let mut extension = validated.extension;
        self.attach_media(&input, &mut extension, Some(&existing.extension))
            .await?;

        let update = ArticleUpdate {
            identity,
            title: validated.base.title,
            slug,
            lead: validated.base.lead,
            updated_at: now,
        };

        let mut uow = self.write_repo.begin().await?;
        let outcome = update_all(uow.as_mut(), &update, &extension, &tags).await;
        finish(uow, outcome, &identity).await?;

        tracing::info!(
            article_id = %identity,
            kind = %self.kind,
            tags = tags.len(),
            "article updated"
        );

        let mut article = existing.article;
        article.apply(&update);
        Ok(ArticleDetailDto::from_record(
            ArticleRecord { article, extension },
            &tags,
        ))
    }
}
