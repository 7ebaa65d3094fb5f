// src/domain/article/identity.rs
use crate::domain::errors::{DomainError, DomainResult};
use std::fmt;
use uuid::Uuid;

/// Length of the binary storage key.
pub const STORAGE_KEY_LEN: usize = 16;

/// Binary form of an [`ArticleIdentity`], used as the join key across the
/// article, extension and tag association tables.
pub type StorageKey = [u8; STORAGE_KEY_LEN];

/// Identity of an article.
///
/// One UUID exposed through two encodings: the hyphenated text used at the API
/// boundary and a 16-byte key with the time fields swapped so that keys sort by
/// the embedded version-1 timestamp. Both are derived from the same value, so
/// they cannot drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArticleIdentity(Uuid);

impl ArticleIdentity {
    pub fn from_uuid(uuid: Uuid) -> DomainResult<Self> {
        if uuid.is_nil() {
            return Err(DomainError::Validation("article id cannot be nil".into()));
        }
        Ok(Self(uuid))
    }

    /// Parse the textual form.
    pub fn parse(text: &str) -> DomainResult<Self> {
        let uuid = Uuid::parse_str(text.trim())
            .map_err(|_| DomainError::Validation(format!("invalid article id: {text}")))?;
        Self::from_uuid(uuid)
    }

    /// Rebuild the identity from its storage key.
    pub fn from_storage_key(key: &[u8]) -> DomainResult<Self> {
        let key: &StorageKey = key.try_into().map_err(|_| {
            DomainError::Validation(format!(
                "article storage key must be {STORAGE_KEY_LEN} bytes, got {}",
                key.len()
            ))
        })?;

        let mut bytes = [0u8; STORAGE_KEY_LEN];
        // time_low
        bytes[0..4].copy_from_slice(&key[4..8]);
        // time_mid
        bytes[4..6].copy_from_slice(&key[2..4]);
        // time_hi_and_version
        bytes[6..8].copy_from_slice(&key[0..2]);
        bytes[8..].copy_from_slice(&key[8..]);

        Self::from_uuid(Uuid::from_bytes(bytes))
    }

    pub fn uuid(&self) -> Uuid {
        self.0
    }

    pub fn text(&self) -> String {
        self.0.hyphenated().to_string()
    }

    /// Order-preserving binary key: `time_hi | time_mid | time_low | rest`.
    pub fn storage_key(&self) -> StorageKey {
        let bytes = self.0.as_bytes();
        let mut key = [0u8; STORAGE_KEY_LEN];
        key[0..2].copy_from_slice(&bytes[6..8]);
        key[2..4].copy_from_slice(&bytes[4..6]);
        key[4..8].copy_from_slice(&bytes[0..4]);
        key[8..].copy_from_slice(&bytes[8..]);
        key
    }
}

impl fmt::Display for ArticleIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}
