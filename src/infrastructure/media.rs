// src/infrastructure/media.rs
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::ports::media::{MediaStore, MediaUpload};
use crate::domain::article::{MediaRef, MediaSlot};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use uuid::Uuid;

/// Default upper bound for a single upload (5 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

fn extension_for(content_type: &str) -> Option<&'static str> {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    match essence.as_str() {
        "image/png" => Some("png"),
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

/// Content-addressed image store on the local filesystem.
///
/// Files are named `<slot>-<blake3>.<ext>` inside `root`, so storing the same
/// bytes twice for a slot yields the same reference. The returned reference is
/// the public URL path under `public_prefix`.
#[derive(Debug, Clone)]
pub struct LocalMediaStore {
    root: PathBuf,
    public_prefix: String,
    max_bytes: usize,
}

impl LocalMediaStore {
    pub fn new(root: impl Into<PathBuf>, public_prefix: impl Into<String>, max_bytes: usize) -> Self {
        let prefix = public_prefix.into();
        Self {
            root: root.into(),
            public_prefix: prefix.trim_end_matches('/').to_string(),
            max_bytes,
        }
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    pub fn public_prefix(&self) -> &str {
        &self.public_prefix
    }

    // Temp names are unique per writer. A failed rename still counts as
    // stored when the content-named target exists.
    async fn write_atomically(
        &self,
        field: &str,
        file_name: &str,
        upload: &MediaUpload,
    ) -> ApplicationResult<()> {
        let target = self.root.join(file_name);
        let temp = self
            .root
            .join(format!(".{file_name}.{}.tmp", Uuid::new_v4().simple()));

        if let Err(e) = fs::write(&temp, &upload.data).await {
            tracing::warn!(path = %temp.display(), error = %e, "media: write failed");
            let _ = fs::remove_file(&temp).await;
            return Err(ApplicationError::upload(format!("{field}: could not write file")));
        }

        match fs::rename(&temp, &target).await {
            Ok(()) => Ok(()),
            Err(e) => {
                let _ = fs::remove_file(&temp).await;
                if fs::try_exists(&target).await.unwrap_or(false) {
                    tracing::debug!(file = %file_name, "media: concurrent writer stored content first");
                    Ok(())
                } else {
                    tracing::warn!(from = %temp.display(), to = %target.display(), error = %e, "media: rename failed");
                    Err(ApplicationError::upload(format!("{field}: could not write file")))
                }
            }
        }
    }
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    async fn store(&self, slot: MediaSlot, upload: &MediaUpload) -> ApplicationResult<MediaRef> {
        let field = slot.field_name();
        if upload.is_empty() {
            return Err(ApplicationError::upload(format!("{field}: file is empty")));
        }
        if upload.data.len() > self.max_bytes {
            return Err(ApplicationError::upload(format!(
                "{field}: file exceeds {} bytes",
                self.max_bytes
            )));
        }
        let ext = extension_for(&upload.content_type).ok_or_else(|| {
            ApplicationError::upload(format!(
                "{field}: unsupported content type {}",
                upload.content_type
            ))
        })?;

        let digest = blake3::hash(&upload.data);
        let file_name = format!("{field}-{}.{ext}", digest.to_hex());
        let target = self.root.join(&file_name);

        fs::create_dir_all(&self.root).await.map_err(|e| {
            tracing::warn!(dir = %self.root.display(), error = %e, "media: create_dir_all failed");
            ApplicationError::upload(format!("{field}: storage unavailable"))
        })?;

        let exists = fs::try_exists(&target).await.map_err(|e| {
            tracing::warn!(path = %target.display(), error = %e, "media: stat failed");
            ApplicationError::upload(format!("{field}: storage unavailable"))
        })?;
        if exists {
            tracing::debug!(file = %file_name, "media: content already stored");
        } else {
            self.write_atomically(field, &file_name, upload).await?;
        }

        Ok(MediaRef::new(format!("{}/{file_name}", self.public_prefix))?)
    }
}
