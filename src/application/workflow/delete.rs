// src/application/workflow/delete.rs
use super::{
    ArticleWorkflow,
    unit_of_work::{delete_all, finish},
};
use crate::application::error::ApplicationResult;

impl ArticleWorkflow {
    /// Remove the tag associations, the extension row and the base row.
    pub async fn delete(&self, id: &str) -> ApplicationResult<()> {
        let identity = self.parse_identity(id)?;
        self.read_repo
            .find_by_identity(self.kind, &identity)
            .await?
            .ok_or_else(|| self.not_found())?;

        let mut uow = self.write_repo.begin().await?;
        let outcome = delete_all(uow.as_mut(), self.kind, &identity).await;
        finish(uow, outcome, &identity).await?;

        tracing::info!(article_id = %identity, kind = %self.kind, "article deleted");
        Ok(())
    }
}
