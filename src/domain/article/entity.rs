// src/domain/article/entity.rs
use crate::domain::article::identity::ArticleIdentity;
use crate::domain::article::kind::ArticleKind;
use crate::domain::article::value_objects::{ArticleSlug, ArticleTitle, MediaRef};
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};

/// Shared row common to every article kind.
#[derive(Debug, Clone)]
pub struct Article {
    pub identity: ArticleIdentity,
    pub kind: ArticleKind,
    pub author_id: UserId,
    pub title: ArticleTitle,
    pub slug: ArticleSlug,
    pub lead: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    /// Apply an update to the in-memory row. Identity, kind, author and
    /// creation time are left untouched.
    pub fn apply(&mut self, update: &ArticleUpdate) {
        self.title = update.title.clone();
        self.slug = update.slug.clone();
        self.lead = update.lead.clone();
        self.updated_at = update.updated_at;
    }
}

#[derive(Debug, Clone)]
pub struct NewArticle {
    pub identity: ArticleIdentity,
    pub kind: ArticleKind,
    pub author_id: UserId,
    pub title: ArticleTitle,
    pub slug: ArticleSlug,
    pub lead: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<NewArticle> for Article {
    fn from(value: NewArticle) -> Self {
        Self {
            identity: value.identity,
            kind: value.kind,
            author_id: value.author_id,
            title: value.title,
            slug: value.slug,
            lead: value.lead,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// Full replacement of the mutable base fields.
#[derive(Debug, Clone)]
pub struct ArticleUpdate {
    pub identity: ArticleIdentity,
    pub title: ArticleTitle,
    pub slug: ArticleSlug,
    pub lead: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Media slots an extension can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaSlot {
    FeaturedImage,
    MainImage,
}

impl MediaSlot {
    pub fn field_name(&self) -> &'static str {
        match self {
            MediaSlot::FeaturedImage => "featured_img",
            MediaSlot::MainImage => "main_img",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostExtension {
    pub sub_title: Option<String>,
    pub body: Option<String>,
    pub featured_img: Option<MediaRef>,
    pub main_img: Option<MediaRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscussionExtension {
    pub body: Option<String>,
    pub closed: bool,
}

/// Kind-specific row, keyed by the same identity as its [`Article`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleExtension {
    Post(PostExtension),
    Discussion(DiscussionExtension),
}

impl ArticleExtension {
    pub fn kind(&self) -> ArticleKind {
        match self {
            ArticleExtension::Post(_) => ArticleKind::Post,
            ArticleExtension::Discussion(_) => ArticleKind::Discussion,
        }
    }

    pub fn media_slots(&self) -> &'static [MediaSlot] {
        match self {
            ArticleExtension::Post(_) => &[MediaSlot::FeaturedImage, MediaSlot::MainImage],
            ArticleExtension::Discussion(_) => &[],
        }
    }

    pub fn media(&self, slot: MediaSlot) -> Option<&MediaRef> {
        match (self, slot) {
            (ArticleExtension::Post(post), MediaSlot::FeaturedImage) => post.featured_img.as_ref(),
            (ArticleExtension::Post(post), MediaSlot::MainImage) => post.main_img.as_ref(),
            (ArticleExtension::Discussion(_), _) => None,
        }
    }

    /// Set the media reference for `slot`. Slots the kind does not carry are
    /// ignored.
    pub fn set_media(&mut self, slot: MediaSlot, media: Option<MediaRef>) {
        match (self, slot) {
            (ArticleExtension::Post(post), MediaSlot::FeaturedImage) => post.featured_img = media,
            (ArticleExtension::Post(post), MediaSlot::MainImage) => post.main_img = media,
            (ArticleExtension::Discussion(_), _) => {}
        }
    }
}

/// Base row joined with its extension row.
#[derive(Debug, Clone)]
pub struct ArticleRecord {
    pub article: Article,
    pub extension: ArticleExtension,
}
