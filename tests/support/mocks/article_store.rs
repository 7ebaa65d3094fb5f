// tests/support/mocks/article_store.rs
use async_trait::async_trait;
use folio_core::domain::article::{
    Article, ArticleExtension, ArticleIdentity, ArticleKind, ArticleReadRepository,
    ArticleRecord, ArticleSlug, ArticleUnitOfWork, ArticleUpdate, ArticleWriteRepository,
    DiscussionExtension, NewArticle, PostExtension, StorageKey,
};
use folio_core::domain::errors::{DomainError, DomainResult};
use folio_core::domain::tag::TagId;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// 失敗を注入する書き込みステップ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailPoint {
    InsertArticle,
    InsertExtension,
    InsertTags,
    UpdateArticle,
    UpdateExtension,
    ClearTags,
    DeleteExtension,
    DeleteArticle,
    Commit,
}

/// Rows keyed by storage key, mirroring the relational layout.
#[derive(Debug, Clone, Default)]
struct Tables {
    articles: BTreeMap<StorageKey, Article>,
    posts: BTreeMap<StorageKey, PostExtension>,
    discussions: BTreeMap<StorageKey, DiscussionExtension>,
    article_tags: BTreeSet<(StorageKey, TagId)>,
}

impl Tables {
    fn record(&self, key: &StorageKey, kind: ArticleKind) -> Option<ArticleRecord> {
        let article = self.articles.get(key).filter(|a| a.kind == kind)?;
        let extension = match kind {
            ArticleKind::Post => ArticleExtension::Post(self.posts.get(key)?.clone()),
            ArticleKind::Discussion => {
                ArticleExtension::Discussion(self.discussions.get(key)?.clone())
            }
        };
        Some(ArticleRecord {
            article: article.clone(),
            extension,
        })
    }
}

/// インメモリの記事ストア（読み取り・書き込み・ユニットオブワーク）
///
/// Writes go to a private copy of the tables that replaces the shared state
/// only on commit. Foreign keys are enforced without cascade, so a base row
/// cannot be deleted while its extension or tag rows remain.
#[derive(Default)]
pub struct InMemoryArticleStore {
    tables: Arc<Mutex<Tables>>,
    fail_on: Arc<Mutex<Option<FailPoint>>>,
    commits: Arc<AtomicUsize>,
    rollbacks: Arc<AtomicUsize>,
}

impl InMemoryArticleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next unit of work fail at `point`.
    pub fn fail_on(&self, point: FailPoint) {
        *self.fail_on.lock().unwrap() = Some(point);
    }

    pub fn commits(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    pub fn rollbacks(&self) -> usize {
        self.rollbacks.load(Ordering::SeqCst)
    }

    /// Debug rendering of every table, for before/after comparisons.
    pub fn dump(&self) -> String {
        format!("{:?}", self.tables.lock().unwrap())
    }

    pub fn article_count(&self) -> usize {
        self.tables.lock().unwrap().articles.len()
    }

    pub fn has_base_row(&self, identity: &ArticleIdentity) -> bool {
        self.tables
            .lock()
            .unwrap()
            .articles
            .contains_key(&identity.storage_key())
    }

    pub fn has_extension_row(&self, identity: &ArticleIdentity) -> bool {
        let key = identity.storage_key();
        let tables = self.tables.lock().unwrap();
        tables.posts.contains_key(&key) || tables.discussions.contains_key(&key)
    }

    /// Association rows referencing `identity`.
    pub fn tag_rows(&self, identity: &ArticleIdentity) -> Vec<TagId> {
        let key = identity.storage_key();
        self.tables
            .lock()
            .unwrap()
            .article_tags
            .iter()
            .filter(|(k, _)| *k == key)
            .map(|(_, tag)| *tag)
            .collect()
    }
}

#[async_trait]
impl ArticleReadRepository for InMemoryArticleStore {
    async fn find_by_identity(
        &self,
        kind: ArticleKind,
        identity: &ArticleIdentity,
    ) -> DomainResult<Option<ArticleRecord>> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .record(&identity.storage_key(), kind))
    }

    async fn find_by_slug(
        &self,
        kind: ArticleKind,
        slug: &ArticleSlug,
    ) -> DomainResult<Option<ArticleRecord>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .articles
            .iter()
            .find(|(_, a)| a.slug == *slug)
            .and_then(|(key, _)| tables.record(key, kind)))
    }

    async fn slug_owner(&self, slug: &ArticleSlug) -> DomainResult<Option<ArticleIdentity>> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .articles
            .values()
            .find(|a| a.slug == *slug)
            .map(|a| a.identity))
    }

    async fn list_page(
        &self,
        kind: ArticleKind,
        offset: u64,
        limit: u32,
    ) -> DomainResult<(Vec<ArticleRecord>, u64)> {
        let tables = self.tables.lock().unwrap();
        let mut records: Vec<(StorageKey, ArticleRecord)> = tables
            .articles
            .keys()
            .filter_map(|key| tables.record(key, kind).map(|r| (*key, r)))
            .collect();
        records.sort_by(|(ka, a), (kb, b)| {
            b.article
                .created_at
                .cmp(&a.article.created_at)
                .then_with(|| kb.cmp(ka))
        });

        let total = records.len() as u64;
        let page = records
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .map(|(_, r)| r)
            .collect();
        Ok((page, total))
    }

    async fn tag_ids(&self, identity: &ArticleIdentity) -> DomainResult<Vec<TagId>> {
        Ok(self.tag_rows(identity))
    }
}

#[async_trait]
impl ArticleWriteRepository for InMemoryArticleStore {
    async fn begin(&self) -> DomainResult<Box<dyn ArticleUnitOfWork>> {
        let working = self.tables.lock().unwrap().clone();
        let fail_on = self.fail_on.lock().unwrap().take();
        Ok(Box::new(InMemoryUnitOfWork {
            shared: Arc::clone(&self.tables),
            working,
            fail_on,
            commits: Arc::clone(&self.commits),
            rollbacks: Arc::clone(&self.rollbacks),
        }))
    }
}

struct InMemoryUnitOfWork {
    shared: Arc<Mutex<Tables>>,
    working: Tables,
    fail_on: Option<FailPoint>,
    commits: Arc<AtomicUsize>,
    rollbacks: Arc<AtomicUsize>,
}

impl InMemoryUnitOfWork {
    fn check(&self, point: FailPoint) -> DomainResult<()> {
        if self.fail_on == Some(point) {
            Err(DomainError::Persistence(format!("injected failure at {point:?}")))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ArticleUnitOfWork for InMemoryUnitOfWork {
    async fn insert_article(&mut self, article: &NewArticle) -> DomainResult<()> {
        self.check(FailPoint::InsertArticle)?;
        let key = article.identity.storage_key();
        if self.working.articles.contains_key(&key) {
            return Err(DomainError::Conflict("article already exists".into()));
        }
        if self.working.articles.values().any(|a| a.slug == article.slug) {
            return Err(DomainError::Conflict("slug already exists".into()));
        }
        self.working.articles.insert(key, article.clone().into());
        Ok(())
    }

    async fn update_article(&mut self, update: &ArticleUpdate) -> DomainResult<()> {
        self.check(FailPoint::UpdateArticle)?;
        let key = update.identity.storage_key();
        if self
            .working
            .articles
            .iter()
            .any(|(k, a)| *k != key && a.slug == update.slug)
        {
            return Err(DomainError::Conflict("slug already exists".into()));
        }
        let article = self
            .working
            .articles
            .get_mut(&key)
            .ok_or_else(|| DomainError::NotFound("article not found".into()))?;
        article.apply(update);
        Ok(())
    }

    async fn delete_article(&mut self, identity: &ArticleIdentity) -> DomainResult<()> {
        self.check(FailPoint::DeleteArticle)?;
        let key = identity.storage_key();
        let referenced = self.working.posts.contains_key(&key)
            || self.working.discussions.contains_key(&key)
            || self.working.article_tags.iter().any(|(k, _)| *k == key);
        if referenced {
            return Err(DomainError::Conflict("article is still referenced".into()));
        }
        self.working
            .articles
            .remove(&key)
            .map(|_| ())
            .ok_or_else(|| DomainError::NotFound("article not found".into()))
    }

    async fn insert_extension(
        &mut self,
        identity: &ArticleIdentity,
        extension: &ArticleExtension,
    ) -> DomainResult<()> {
        self.check(FailPoint::InsertExtension)?;
        let key = identity.storage_key();
        let base = self
            .working
            .articles
            .get(&key)
            .ok_or_else(|| DomainError::NotFound("article not found".into()))?;
        if base.kind != extension.kind() {
            return Err(DomainError::Validation("extension kind mismatch".into()));
        }
        match extension {
            ArticleExtension::Post(post) => {
                self.working.posts.insert(key, post.clone());
            }
            ArticleExtension::Discussion(discussion) => {
                self.working.discussions.insert(key, discussion.clone());
            }
        }
        Ok(())
    }

    async fn update_extension(
        &mut self,
        identity: &ArticleIdentity,
        extension: &ArticleExtension,
    ) -> DomainResult<()> {
        self.check(FailPoint::UpdateExtension)?;
        let key = identity.storage_key();
        let slot_exists = match extension {
            ArticleExtension::Post(_) => self.working.posts.contains_key(&key),
            ArticleExtension::Discussion(_) => self.working.discussions.contains_key(&key),
        };
        if !slot_exists {
            return Err(DomainError::NotFound("extension not found".into()));
        }
        match extension {
            ArticleExtension::Post(post) => {
                self.working.posts.insert(key, post.clone());
            }
            ArticleExtension::Discussion(discussion) => {
                self.working.discussions.insert(key, discussion.clone());
            }
        }
        Ok(())
    }

    async fn delete_extension(
        &mut self,
        kind: ArticleKind,
        identity: &ArticleIdentity,
    ) -> DomainResult<()> {
        self.check(FailPoint::DeleteExtension)?;
        let key = identity.storage_key();
        let removed = match kind {
            ArticleKind::Post => self.working.posts.remove(&key).is_some(),
            ArticleKind::Discussion => self.working.discussions.remove(&key).is_some(),
        };
        if removed {
            Ok(())
        } else {
            Err(DomainError::NotFound("extension not found".into()))
        }
    }

    async fn clear_tags(&mut self, identity: &ArticleIdentity) -> DomainResult<()> {
        self.check(FailPoint::ClearTags)?;
        let key = identity.storage_key();
        self.working.article_tags.retain(|(k, _)| *k != key);
        Ok(())
    }

    async fn insert_tags(
        &mut self,
        identity: &ArticleIdentity,
        tags: &[TagId],
    ) -> DomainResult<()> {
        self.check(FailPoint::InsertTags)?;
        let key = identity.storage_key();
        if !self.working.articles.contains_key(&key) {
            return Err(DomainError::NotFound("article not found".into()));
        }
        for tag in tags {
            self.working.article_tags.insert((key, *tag));
        }
        Ok(())
    }

    async fn commit(self: Box<Self>) -> DomainResult<()> {
        self.check(FailPoint::Commit)?;
        let Self {
            shared,
            working,
            commits,
            ..
        } = *self;
        *shared.lock().unwrap() = working;
        commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> DomainResult<()> {
        self.rollbacks.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
