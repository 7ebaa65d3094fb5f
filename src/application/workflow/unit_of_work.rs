// src/application/workflow/unit_of_work.rs
use crate::{
    application::error::ApplicationResult,
    domain::{
        article::{
            ArticleExtension, ArticleIdentity, ArticleKind, ArticleUnitOfWork, ArticleUpdate,
            NewArticle,
        },
        errors::DomainResult,
        tag::TagId,
    },
};

/// Commit when every write succeeded, roll back otherwise. The unit of work is
/// consumed on both paths.
pub(super) async fn finish(
    uow: Box<dyn ArticleUnitOfWork>,
    outcome: DomainResult<()>,
    identity: &ArticleIdentity,
) -> ApplicationResult<()> {
    match outcome {
        Ok(()) => {
            uow.commit().await?;
            Ok(())
        }
        Err(err) => {
            if let Err(rollback_err) = uow.rollback().await {
                tracing::warn!(
                    article_id = %identity,
                    error = %rollback_err,
                    "rollback failed after write error"
                );
            }
            Err(err.into())
        }
    }
}

pub(super) async fn insert_all(
    uow: &mut dyn ArticleUnitOfWork,
    article: &NewArticle,
    extension: &ArticleExtension,
    tags: &[TagId],
) -> DomainResult<()> {
    uow.insert_article(article).await?;
    uow.insert_extension(&article.identity, extension).await?;
    if !tags.is_empty() {
        uow.insert_tags(&article.identity, tags).await?;
    }
    Ok(())
}

pub(super) async fn update_all(
    uow: &mut dyn ArticleUnitOfWork,
    update: &ArticleUpdate,
    extension: &ArticleExtension,
    tags: &[TagId],
) -> DomainResult<()> {
    uow.update_article(update).await?;
    uow.update_extension(&update.identity, extension).await?;
    replace_tags(uow, &update.identity, tags).await
}

pub(super) async fn delete_all(
    uow: &mut dyn ArticleUnitOfWork,
    kind: ArticleKind,
    identity: &ArticleIdentity,
) -> DomainResult<()> {
    uow.clear_tags(identity).await?;
    uow.delete_extension(kind, identity).await?;
    uow.delete_article(identity).await
}

/// Replace-all: an empty `tags` leaves the article without associations.
async fn replace_tags(
    uow: &mut dyn ArticleUnitOfWork,
    identity: &ArticleIdentity,
    tags: &[TagId],
) -> DomainResult<()> {
    uow.clear_tags(identity).await?;
    if !tags.is_empty() {
        uow.insert_tags(identity, tags).await?;
    }
    Ok(())
}
