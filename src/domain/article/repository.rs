use crate::domain::article::entity::{ArticleExtension, ArticleRecord, ArticleUpdate, NewArticle};
use crate::domain::article::identity::ArticleIdentity;
use crate::domain::article::kind::ArticleKind;
use crate::domain::article::value_objects::ArticleSlug;
use crate::domain::errors::DomainResult;
use crate::domain::tag::TagId;
use async_trait::async_trait;

#[async_trait]
pub trait ArticleReadRepository: Send + Sync {
    /// Base row joined with its extension, only if the stored kind is `kind`.
    async fn find_by_identity(
        &self,
        kind: ArticleKind,
        identity: &ArticleIdentity,
    ) -> DomainResult<Option<ArticleRecord>>;

    async fn find_by_slug(
        &self,
        kind: ArticleKind,
        slug: &ArticleSlug,
    ) -> DomainResult<Option<ArticleRecord>>;

    /// Identity of whichever article (of any kind) currently holds `slug`.
    async fn slug_owner(&self, slug: &ArticleSlug) -> DomainResult<Option<ArticleIdentity>>;

    /// Newest first. Returns the page and the total number of articles of `kind`.
    async fn list_page(
        &self,
        kind: ArticleKind,
        offset: u64,
        limit: u32,
    ) -> DomainResult<(Vec<ArticleRecord>, u64)>;

    /// Tag ids associated with the article, ascending.
    async fn tag_ids(&self, identity: &ArticleIdentity) -> DomainResult<Vec<TagId>>;
}

#[async_trait]
pub trait ArticleWriteRepository: Send + Sync {
    /// Open a unit of work. Nothing written through it is visible to readers
    /// until [`ArticleUnitOfWork::commit`] succeeds; dropping it without
    /// committing discards every write.
    async fn begin(&self) -> DomainResult<Box<dyn ArticleUnitOfWork>>;
}

/// Writes spanning the base, extension and tag association tables.
#[async_trait]
pub trait ArticleUnitOfWork: Send {
    async fn insert_article(&mut self, article: &NewArticle) -> DomainResult<()>;
    async fn update_article(&mut self, update: &ArticleUpdate) -> DomainResult<()>;
    async fn delete_article(&mut self, identity: &ArticleIdentity) -> DomainResult<()>;

    async fn insert_extension(
        &mut self,
        identity: &ArticleIdentity,
        extension: &ArticleExtension,
    ) -> DomainResult<()>;
    async fn update_extension(
        &mut self,
        identity: &ArticleIdentity,
        extension: &ArticleExtension,
    ) -> DomainResult<()>;
    async fn delete_extension(
        &mut self,
        kind: ArticleKind,
        identity: &ArticleIdentity,
    ) -> DomainResult<()>;

    async fn clear_tags(&mut self, identity: &ArticleIdentity) -> DomainResult<()>;
    async fn insert_tags(&mut self, identity: &ArticleIdentity, tags: &[TagId])
    -> DomainResult<()>;

    async fn commit(self: Box<Self>) -> DomainResult<()>;
    async fn rollback(self: Box<Self>) -> DomainResult<()>;
}
