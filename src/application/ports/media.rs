// src/application/ports/media.rs
use crate::application::ApplicationResult;
use crate::domain::article::{MediaRef, MediaSlot};
use async_trait::async_trait;
use bytes::Bytes;

/// Raw uploaded file as received from the caller.
#[derive(Debug, Clone)]
pub struct MediaUpload {
    pub content_type: String,
    pub data: Bytes,
}

impl MediaUpload {
    pub fn new(content_type: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    /// An upload without payload counts as "nothing uploaded".
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Persist the upload and return a reference to it. Fails with
    /// `ApplicationError::Upload` for unsupported content or storage errors.
    async fn store(&self, slot: MediaSlot, upload: &MediaUpload) -> ApplicationResult<MediaRef>;
}
