// src/infrastructure/repositories/postgres_article.rs
use super::map_sqlx;
use crate::domain::article::{
    Article, ArticleExtension, ArticleIdentity, ArticleKind, ArticleReadRepository,
    ArticleRecord, ArticleSlug, ArticleTitle, ArticleUnitOfWork, ArticleUpdate,
    ArticleWriteRepository, DiscussionExtension, MediaRef, NewArticle, PostExtension,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::tag::TagId;
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder, Transaction};

const POST_SELECT: &str = "SELECT a.article_uuid, a.article_id, a.kind, a.author_id, a.title, a.slug, a.lead, a.created_at, a.updated_at, \
     e.sub_title, e.body, e.featured_img, e.main_img \
     FROM articles a JOIN article_posts e ON e.article_uuid = a.article_uuid \
     WHERE a.kind = 'post'";

const DISCUSSION_SELECT: &str = "SELECT a.article_uuid, a.article_id, a.kind, a.author_id, a.title, a.slug, a.lead, a.created_at, a.updated_at, \
     e.body, e.closed \
     FROM articles a JOIN article_discussions e ON e.article_uuid = a.article_uuid \
     WHERE a.kind = 'discussion'";

fn select_for(kind: ArticleKind) -> &'static str {
    match kind {
        ArticleKind::Post => POST_SELECT,
        ArticleKind::Discussion => DISCUSSION_SELECT,
    }
}

fn extension_table(kind: ArticleKind) -> &'static str {
    match kind {
        ArticleKind::Post => "article_posts",
        ArticleKind::Discussion => "article_discussions",
    }
}

#[derive(Debug, FromRow)]
struct ArticleRow {
    article_uuid: Vec<u8>,
    article_id: String,
    kind: String,
    author_id: i64,
    title: String,
    slug: String,
    lead: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ArticleRow> for Article {
    type Error = DomainError;

    fn try_from(row: ArticleRow) -> Result<Self, Self::Error> {
        let identity = ArticleIdentity::from_storage_key(&row.article_uuid)?;
        if identity.text() != row.article_id {
            return Err(DomainError::Persistence(format!(
                "article id {} does not match its storage key",
                row.article_id
            )));
        }

        Ok(Article {
            identity,
            kind: row.kind.parse()?,
            author_id: UserId::new(row.author_id)?,
            title: ArticleTitle::new(row.title)?,
            slug: ArticleSlug::new(row.slug)?,
            lead: row.lead,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct PostRow {
    #[sqlx(flatten)]
    base: ArticleRow,
    sub_title: Option<String>,
    body: Option<String>,
    featured_img: Option<String>,
    main_img: Option<String>,
}

#[derive(Debug, FromRow)]
struct DiscussionRow {
    #[sqlx(flatten)]
    base: ArticleRow,
    body: Option<String>,
    closed: bool,
}

fn media_ref(value: Option<String>) -> DomainResult<Option<MediaRef>> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(MediaRef::new)
        .transpose()
}

impl TryFrom<PostRow> for ArticleRecord {
    type Error = DomainError;

    fn try_from(row: PostRow) -> Result<Self, Self::Error> {
        Ok(ArticleRecord {
            article: Article::try_from(row.base)?,
            extension: ArticleExtension::Post(PostExtension {
                sub_title: row.sub_title,
                body: row.body,
                featured_img: media_ref(row.featured_img)?,
                main_img: media_ref(row.main_img)?,
            }),
        })
    }
}

impl TryFrom<DiscussionRow> for ArticleRecord {
    type Error = DomainError;

    fn try_from(row: DiscussionRow) -> Result<Self, Self::Error> {
        Ok(ArticleRecord {
            article: Article::try_from(row.base)?,
            extension: ArticleExtension::Discussion(DiscussionExtension {
                body: row.body,
                closed: row.closed,
            }),
        })
    }
}

#[derive(Clone)]
pub struct PostgresArticleReadRepository {
    pool: PgPool,
}

impl PostgresArticleReadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_records(
        &self,
        kind: ArticleKind,
        mut builder: QueryBuilder<'_, Postgres>,
    ) -> DomainResult<Vec<ArticleRecord>> {
        match kind {
            ArticleKind::Post => builder
                .build_query_as::<PostRow>()
                .fetch_all(&self.pool)
                .await
                .map_err(map_sqlx)?
                .into_iter()
                .map(ArticleRecord::try_from)
                .collect(),
            ArticleKind::Discussion => builder
                .build_query_as::<DiscussionRow>()
                .fetch_all(&self.pool)
                .await
                .map_err(map_sqlx)?
                .into_iter()
                .map(ArticleRecord::try_from)
                .collect(),
        }
    }
}

#[async_trait]
impl ArticleReadRepository for PostgresArticleReadRepository {
    async fn find_by_identity(
        &self,
        kind: ArticleKind,
        identity: &ArticleIdentity,
    ) -> DomainResult<Option<ArticleRecord>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(select_for(kind));
        builder.push(" AND a.article_uuid = ");
        builder.push_bind(identity.storage_key().to_vec());

        Ok(self.fetch_records(kind, builder).await?.into_iter().next())
    }

    async fn find_by_slug(
        &self,
        kind: ArticleKind,
        slug: &ArticleSlug,
    ) -> DomainResult<Option<ArticleRecord>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(select_for(kind));
        builder.push(" AND a.slug = ");
        builder.push_bind(slug.as_str().to_string());

        Ok(self.fetch_records(kind, builder).await?.into_iter().next())
    }

    async fn slug_owner(&self, slug: &ArticleSlug) -> DomainResult<Option<ArticleIdentity>> {
        let key = sqlx::query_scalar::<_, Vec<u8>>("SELECT article_uuid FROM articles WHERE slug = $1")
            .bind(slug.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        key.map(|key| ArticleIdentity::from_storage_key(&key))
            .transpose()
    }

    async fn list_page(
        &self,
        kind: ArticleKind,
        offset: u64,
        limit: u32,
    ) -> DomainResult<(Vec<ArticleRecord>, u64)> {
        let offset = i64::try_from(offset)
            .map_err(|_| DomainError::Validation("page offset out of range".into()))?;

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(select_for(kind));
        builder.push(" ORDER BY a.created_at DESC, a.article_uuid DESC LIMIT ");
        builder.push_bind(i64::from(limit));
        builder.push(" OFFSET ");
        builder.push_bind(offset);
        let records = self.fetch_records(kind, builder).await?;

        let mut count_builder: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(1) FROM articles a JOIN ");
        count_builder.push(extension_table(kind));
        count_builder.push(" e ON e.article_uuid = a.article_uuid WHERE a.kind = ");
        count_builder.push_bind(kind.as_str());

        let total: i64 = count_builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Ok((records, u64::try_from(total).unwrap_or_default()))
    }

    async fn tag_ids(&self, identity: &ArticleIdentity) -> DomainResult<Vec<TagId>> {
        let key = identity.storage_key();
        let ids = sqlx::query_scalar::<_, i64>(
            "SELECT tag_id FROM article_tags WHERE article_uuid = $1 ORDER BY tag_id",
        )
        .bind(&key[..])
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        ids.into_iter().map(TagId::new).collect()
    }
}

#[derive(Clone)]
pub struct PostgresArticleWriteRepository {
    pool: PgPool,
}

impl PostgresArticleWriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ArticleWriteRepository for PostgresArticleWriteRepository {
    async fn begin(&self) -> DomainResult<Box<dyn ArticleUnitOfWork>> {
        let tx = self.pool.begin().await.map_err(map_sqlx)?;
        Ok(Box::new(PostgresArticleUnitOfWork { tx }))
    }
}

/// Unit of work backed by a database transaction. Dropping it without
/// `commit` rolls the transaction back.
pub struct PostgresArticleUnitOfWork {
    tx: Transaction<'static, Postgres>,
}

fn ensure_affected(rows: u64, what: &str) -> DomainResult<()> {
    if rows == 0 {
        Err(DomainError::NotFound(format!("{what} not found")))
    } else {
        Ok(())
    }
}

#[async_trait]
impl ArticleUnitOfWork for PostgresArticleUnitOfWork {
    async fn insert_article(&mut self, article: &NewArticle) -> DomainResult<()> {
        let key = article.identity.storage_key();
        sqlx::query(
            "INSERT INTO articles (article_uuid, article_id, kind, author_id, title, slug, lead, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(&key[..])
        .bind(article.identity.text())
        .bind(article.kind.as_str())
        .bind(i64::from(article.author_id))
        .bind(article.title.as_str())
        .bind(article.slug.as_str())
        .bind(article.lead.as_deref())
        .bind(article.created_at)
        .bind(article.updated_at)
        .execute(&mut *self.tx)
        .await
        .map_err(map_sqlx)?;
        Ok(())
    }

    async fn update_article(&mut self, update: &ArticleUpdate) -> DomainResult<()> {
        let key = update.identity.storage_key();
        let result = sqlx::query(
            "UPDATE articles SET title = $1, slug = $2, lead = $3, updated_at = $4 WHERE article_uuid = $5",
        )
        .bind(update.title.as_str())
        .bind(update.slug.as_str())
        .bind(update.lead.as_deref())
        .bind(update.updated_at)
        .bind(&key[..])
        .execute(&mut *self.tx)
        .await
        .map_err(map_sqlx)?;
        ensure_affected(result.rows_affected(), "article")
    }

    async fn delete_article(&mut self, identity: &ArticleIdentity) -> DomainResult<()> {
        let key = identity.storage_key();
        let result = sqlx::query("DELETE FROM articles WHERE article_uuid = $1")
            .bind(&key[..])
            .execute(&mut *self.tx)
            .await
            .map_err(map_sqlx)?;
        ensure_affected(result.rows_affected(), "article")
    }

    async fn insert_extension(
        &mut self,
        identity: &ArticleIdentity,
        extension: &ArticleExtension,
    ) -> DomainResult<()> {
        let key = identity.storage_key();
        let query = match extension {
            ArticleExtension::Post(post) => sqlx::query(
                "INSERT INTO article_posts (article_uuid, sub_title, body, featured_img, main_img)
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(&key[..])
            .bind(post.sub_title.as_deref())
            .bind(post.body.as_deref())
            .bind(post.featured_img.as_ref().map(MediaRef::as_str))
            .bind(post.main_img.as_ref().map(MediaRef::as_str)),
            ArticleExtension::Discussion(discussion) => sqlx::query(
                "INSERT INTO article_discussions (article_uuid, body, closed) VALUES ($1, $2, $3)",
            )
            .bind(&key[..])
            .bind(discussion.body.as_deref())
            .bind(discussion.closed),
        };

        query.execute(&mut *self.tx).await.map_err(map_sqlx)?;
        Ok(())
    }

    async fn update_extension(
        &mut self,
        identity: &ArticleIdentity,
        extension: &ArticleExtension,
    ) -> DomainResult<()> {
        let key = identity.storage_key();
        let query = match extension {
            ArticleExtension::Post(post) => sqlx::query(
                "UPDATE article_posts SET sub_title = $1, body = $2, featured_img = $3, main_img = $4
                 WHERE article_uuid = $5",
            )
            .bind(post.sub_title.as_deref())
            .bind(post.body.as_deref())
            .bind(post.featured_img.as_ref().map(MediaRef::as_str))
            .bind(post.main_img.as_ref().map(MediaRef::as_str))
            .bind(&key[..]),
            ArticleExtension::Discussion(discussion) => sqlx::query(
                "UPDATE article_discussions SET body = $1, closed = $2 WHERE article_uuid = $3",
            )
            .bind(discussion.body.as_deref())
            .bind(discussion.closed)
            .bind(&key[..]),
        };

        let result = query.execute(&mut *self.tx).await.map_err(map_sqlx)?;
        ensure_affected(result.rows_affected(), extension.kind().as_str())
    }

    async fn delete_extension(
        &mut self,
        kind: ArticleKind,
        identity: &ArticleIdentity,
    ) -> DomainResult<()> {
        let key = identity.storage_key();
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("DELETE FROM ");
        builder.push(extension_table(kind));
        builder.push(" WHERE article_uuid = ");
        builder.push_bind(key.to_vec());

        let result = builder
            .build()
            .execute(&mut *self.tx)
            .await
            .map_err(map_sqlx)?;
        ensure_affected(result.rows_affected(), kind.as_str())
    }

    async fn clear_tags(&mut self, identity: &ArticleIdentity) -> DomainResult<()> {
        let key = identity.storage_key();
        sqlx::query("DELETE FROM article_tags WHERE article_uuid = $1")
            .bind(&key[..])
            .execute(&mut *self.tx)
            .await
            .map_err(map_sqlx)?;
        Ok(())
    }

    async fn insert_tags(
        &mut self,
        identity: &ArticleIdentity,
        tags: &[TagId],
    ) -> DomainResult<()> {
        if tags.is_empty() {
            return Ok(());
        }

        let key = identity.storage_key().to_vec();
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("INSERT INTO article_tags (article_uuid, tag_id) ");
        builder.push_values(tags, |mut row, tag| {
            row.push_bind(key.clone()).push_bind(i64::from(*tag));
        });
        builder.push(" ON CONFLICT DO NOTHING");

        builder
            .build()
            .execute(&mut *self.tx)
            .await
            .map_err(map_sqlx)?;
        Ok(())
    }

    async fn commit(self: Box<Self>) -> DomainResult<()> {
        let Self { tx } = *self;
        tx.commit().await.map_err(map_sqlx)
    }

    async fn rollback(self: Box<Self>) -> DomainResult<()> {
        let Self { tx } = *self;
        tx.rollback().await.map_err(map_sqlx)
    }
}
