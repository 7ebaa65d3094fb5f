use crate::application::ports::media::MediaUpload;
use crate::domain::article::{ArticleExtension, ArticleKind, ArticleRecord, MediaRef, MediaSlot};
use crate::domain::tag::TagId;
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::serde_time;

/// Unvalidated input for create and update, shared by every article kind.
/// Fields a kind does not use are ignored by that kind's validator.
#[derive(Debug, Clone, Default)]
pub struct ArticleInput {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub lead: Option<String>,
    pub sub_title: Option<String>,
    pub body: Option<String>,
    pub closed: Option<bool>,
    pub featured_img: Option<MediaUpload>,
    pub main_img: Option<MediaUpload>,
    pub tags: Option<Vec<i64>>,
}

impl ArticleInput {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn lead(mut self, lead: impl Into<String>) -> Self {
        self.lead = Some(lead.into());
        self
    }

    pub fn sub_title(mut self, sub_title: impl Into<String>) -> Self {
        self.sub_title = Some(sub_title.into());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn closed(mut self, closed: bool) -> Self {
        self.closed = Some(closed);
        self
    }

    pub fn tags(mut self, tags: impl Into<Vec<i64>>) -> Self {
        self.tags = Some(tags.into());
        self
    }

    pub fn media(mut self, slot: MediaSlot, upload: MediaUpload) -> Self {
        match slot {
            MediaSlot::FeaturedImage => self.featured_img = Some(upload),
            MediaSlot::MainImage => self.main_img = Some(upload),
        }
        self
    }

    pub fn upload(&self, slot: MediaSlot) -> Option<&MediaUpload> {
        match slot {
            MediaSlot::FeaturedImage => self.featured_img.as_ref(),
            MediaSlot::MainImage => self.main_img.as_ref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ArticleExtensionDto {
    Post {
        sub_title: Option<String>,
        body: Option<String>,
        featured_img: Option<String>,
        main_img: Option<String>,
    },
    Discussion {
        body: Option<String>,
        closed: bool,
    },
}

impl From<ArticleExtension> for ArticleExtensionDto {
    fn from(extension: ArticleExtension) -> Self {
        match extension {
            ArticleExtension::Post(post) => Self::Post {
                sub_title: post.sub_title,
                body: post.body,
                featured_img: post.featured_img.map(MediaRef::into_inner),
                main_img: post.main_img.map(MediaRef::into_inner),
            },
            ArticleExtension::Discussion(discussion) => Self::Discussion {
                body: discussion.body,
                closed: discussion.closed,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ArticleDetailDto {
    pub id: String,
    pub kind: ArticleKind,
    pub author_id: i64,
    pub title: String,
    pub slug: String,
    pub lead: Option<String>,
    pub tags: Vec<i64>,
    #[serde(flatten)]
    pub extension: ArticleExtensionDto,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

impl ArticleDetailDto {
    pub fn from_record(record: ArticleRecord, tags: &[TagId]) -> Self {
        let ArticleRecord { article, extension } = record;
        Self {
            id: article.identity.text(),
            kind: article.kind,
            author_id: article.author_id.into(),
            title: article.title.into_inner(),
            slug: article.slug.into_inner(),
            lead: article.lead,
            tags: tags.iter().copied().map(i64::from).collect(),
            extension: extension.into(),
            created_at: article.created_at,
            updated_at: article.updated_at,
        }
    }
}

/// Listing projection of base and extension fields.
#[derive(Debug, Clone, Serialize)]
pub struct ArticleSummaryDto {
    pub id: String,
    pub kind: ArticleKind,
    pub author_id: i64,
    pub title: String,
    pub slug: String,
    pub lead: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_img: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed: Option<bool>,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

impl From<ArticleRecord> for ArticleSummaryDto {
    fn from(record: ArticleRecord) -> Self {
        let ArticleRecord { article, extension } = record;
        let (featured_img, closed) = match extension {
            ArticleExtension::Post(post) => (post.featured_img.map(MediaRef::into_inner), None),
            ArticleExtension::Discussion(discussion) => (None, Some(discussion.closed)),
        };
        Self {
            id: article.identity.text(),
            kind: article.kind,
            author_id: article.author_id.into(),
            title: article.title.into_inner(),
            slug: article.slug.into_inner(),
            lead: article.lead,
            featured_img,
            closed,
            created_at: article.created_at,
            updated_at: article.updated_at,
        }
    }
}
