// tests/support/mocks/media.rs
use async_trait::async_trait;
use folio_core::application::{
    ApplicationResult,
    error::ApplicationError,
    ports::media::{MediaStore, MediaUpload},
};
use folio_core::domain::article::{MediaRef, MediaSlot};
use std::sync::Mutex;

/// 保存呼び出しを記録するメディアストア
#[derive(Default)]
pub struct RecordingMediaStore {
    calls: Mutex<Vec<(MediaSlot, usize)>>,
}

impl RecordingMediaStore {
    /// Slot and payload size of every stored upload, in call order.
    pub fn calls(&self) -> Vec<(MediaSlot, usize)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaStore for RecordingMediaStore {
    async fn store(&self, slot: MediaSlot, upload: &MediaUpload) -> ApplicationResult<MediaRef> {
        let mut calls = self.calls.lock().unwrap();
        calls.push((slot, upload.data.len()));
        let reference = format!("/uploads/{}-{}.png", slot.field_name(), calls.len());
        Ok(MediaRef::new(reference)?)
    }
}

/// 常に失敗するメディアストア
#[derive(Default)]
pub struct FailingMediaStore;

#[async_trait]
impl MediaStore for FailingMediaStore {
    async fn store(&self, slot: MediaSlot, _upload: &MediaUpload) -> ApplicationResult<MediaRef> {
        Err(ApplicationError::upload(format!(
            "{}: storage unavailable",
            slot.field_name()
        )))
    }
}
