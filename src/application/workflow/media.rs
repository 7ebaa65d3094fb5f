// src/application/workflow/media.rs
use super::ArticleWorkflow;
use crate::{
    application::{dto::ArticleInput, error::ApplicationResult, ports::media::MediaUpload},
    domain::article::{ArticleExtension, MediaRef, MediaSlot},
};

impl ArticleWorkflow {
    /// Fill every media slot the extension carries. `previous` is the stored
    /// extension on update and `None` on create.
    pub(super) async fn attach_media(
        &self,
        input: &ArticleInput,
        extension: &mut ArticleExtension,
        previous: Option<&ArticleExtension>,
    ) -> ApplicationResult<()> {
        for &slot in extension.media_slots() {
            let prior = previous.and_then(|stored| stored.media(slot)).cloned();
            let resolved = self.resolve_media(input.upload(slot), slot, prior).await?;
            extension.set_media(slot, resolved);
        }
        Ok(())
    }

    /// Only a non-empty upload replaces the previous reference.
    async fn resolve_media(
        &self,
        upload: Option<&MediaUpload>,
        slot: MediaSlot,
        previous: Option<MediaRef>,
    ) -> ApplicationResult<Option<MediaRef>> {
        match upload.filter(|upload| !upload.is_empty()) {
            Some(upload) => {
                let stored = self.media_store.store(slot, upload).await?;
                tracing::debug!(
                    kind = %self.kind,
                    field = slot.field_name(),
                    media = %stored,
                    "stored upload"
                );
                Ok(Some(stored))
            }
            None => Ok(previous),
        }
    }
}
