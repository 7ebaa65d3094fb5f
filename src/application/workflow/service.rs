// src/application/workflow/service.rs
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::{
    application::{
        error::{ApplicationError, ApplicationResult},
        ports::{
            identity::IdentityAllocator, media::MediaStore, time::Clock, util::SlugGenerator,
        },
        validation::BaseFields,
    },
    domain::{
        article::{
            ArticleIdentity, ArticleKind, ArticleReadRepository, ArticleSlug,
            ArticleWriteRepository, services::ArticleSlugService,
        },
        tag::TagRepository,
    },
};

use super::tags::UnknownTagPolicy;

/// Collaborators shared by the workflows of every kind.
#[derive(Clone)]
pub struct WorkflowPorts {
    pub read_repo: Arc<dyn ArticleReadRepository>,
    pub write_repo: Arc<dyn ArticleWriteRepository>,
    pub tag_repo: Arc<dyn TagRepository>,
    pub media_store: Arc<dyn MediaStore>,
    pub identities: Arc<dyn IdentityAllocator>,
    pub slugger: Arc<dyn SlugGenerator>,
    pub clock: Arc<dyn Clock>,
    pub tag_policy: UnknownTagPolicy,
}

pub struct ArticleWorkflow {
    pub(super) kind: ArticleKind,
    pub(super) read_repo: Arc<dyn ArticleReadRepository>,
    pub(super) write_repo: Arc<dyn ArticleWriteRepository>,
    pub(super) tag_repo: Arc<dyn TagRepository>,
    pub(super) media_store: Arc<dyn MediaStore>,
    pub(super) identities: Arc<dyn IdentityAllocator>,
    pub(super) slug_service: ArticleSlugService,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) tag_policy: UnknownTagPolicy,
}

impl ArticleWorkflow {
    pub fn new(kind: ArticleKind, ports: WorkflowPorts) -> Self {
        let slug_service =
            ArticleSlugService::new(Arc::clone(&ports.read_repo), Arc::clone(&ports.slugger));

        Self {
            kind,
            read_repo: ports.read_repo,
            write_repo: ports.write_repo,
            tag_repo: ports.tag_repo,
            media_store: ports.media_store,
            identities: ports.identities,
            slug_service,
            clock: ports.clock,
            tag_policy: ports.tag_policy,
        }
    }

    pub fn kind(&self) -> ArticleKind {
        self.kind
    }

    /// A malformed id cannot name an existing article.
    pub(super) fn parse_identity(&self, id: &str) -> ApplicationResult<ArticleIdentity> {
        ArticleIdentity::parse(id).map_err(|_| self.not_found())
    }

    pub(super) fn not_found(&self) -> ApplicationError {
        ApplicationError::not_found(format!("{} not found", self.kind))
    }

    /// Explicit slug if given, otherwise one derived from the title; made
    /// unique across all articles. `current` keeps its own slug on update.
    pub(super) async fn unique_slug(
        &self,
        base: &BaseFields,
        current: Option<ArticleIdentity>,
        now: DateTime<Utc>,
    ) -> ApplicationResult<ArticleSlug> {
        let source = base
            .slug
            .as_ref()
            .map_or(base.title.as_str(), ArticleSlug::as_str);
        Ok(self
            .slug_service
            .generate_unique_slug(source, current, now)
            .await?)
    }
}
