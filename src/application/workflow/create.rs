// src/application/workflow/create.rs
use super::{
    ArticleWorkflow,
    unit_of_work::{finish, insert_all},
};
use crate::{
    application::{
        dto::{ArticleDetailDto, ArticleInput, AuthenticatedActor},
        error::ApplicationResult,
        validation,
    },
    domain::article::{ArticleRecord, NewArticle},
};

impl ArticleWorkflow {
    /// Validate, allocate an identity, resolve tags and the slug, store
    /// uploads, then write the base row, the extension row and the tag
    /// associations in one unit of work. Uploads are stored only once every
    /// check has passed.
    pub async fn create(
        &self,
        actor: &AuthenticatedActor,
        input: ArticleInput,
    ) -> ApplicationResult<ArticleDetailDto> {
        let validated = validation::validate(self.kind, &input)?;
        let identity = self.identities.allocate()?;

        let tags = self
            .resolve_tags(validated.tags.as_deref().unwrap_or_default())
            .await?;
        let now = self.clock.now();
        let slug = self.unique_slug(&validated.base, None, now).await?;

        let mut extension = validated.extension;
        self.attach_media(&input, &mut extension, None).await?;

        let new_article = NewArticle {
            identity,
            kind: self.kind,
            author_id: actor.id,
            title: validated.base.title,
            slug,
            lead: validated.base.lead,
            created_at: now,
            updated_at: now,
        };

        let mut uow = self.write_repo.begin().await?;
        let outcome = insert_all(uow.as_mut(), &new_article, &extension, &tags).await;
        finish(uow, outcome, &identity).await?;

        tracing::info!(
            article_id = %identity,
            kind = %self.kind,
            author_id = %actor.id,
            tags = tags.len(),
            "article created"
        );

        let record = ArticleRecord {
            article: new_article.into(),
            extension,
        };
        Ok(ArticleDetailDto::from_record(record, &tags))
    }
}
