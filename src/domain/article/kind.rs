// src/domain/article/kind.rs
use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Discriminator stored on the base article row. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleKind {
    Post,
    Discussion,
}

impl ArticleKind {
    pub const ALL: [ArticleKind; 2] = [ArticleKind::Post, ArticleKind::Discussion];

    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleKind::Post => "post",
            ArticleKind::Discussion => "discussion",
        }
    }

    /// Plural collection name used in URLs (`posts`, `discussions`).
    pub fn collection(&self) -> &'static str {
        match self {
            ArticleKind::Post => "posts",
            ArticleKind::Discussion => "discussions",
        }
    }

    pub fn from_collection(segment: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.collection() == segment)
    }
}

impl fmt::Display for ArticleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArticleKind {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s {
            "post" => Ok(ArticleKind::Post),
            "discussion" => Ok(ArticleKind::Discussion),
            other => Err(DomainError::Validation(format!(
                "unknown article kind: {other}"
            ))),
        }
    }
}
