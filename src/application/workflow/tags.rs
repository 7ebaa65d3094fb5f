// src/application/workflow/tags.rs
use std::collections::BTreeSet;
use std::str::FromStr;

use super::ArticleWorkflow;
use crate::{
    application::{error::ApplicationResult, validation::FieldErrors},
    domain::{
        errors::{DomainError, DomainResult},
        tag::TagId,
    },
};

/// What to do with requested tag ids that are not in the catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownTagPolicy {
    /// Keep only the ids found in the catalog.
    #[default]
    Drop,
    /// Fail validation on the `tags` field.
    Reject,
}

impl FromStr for UnknownTagPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "drop" => Ok(Self::Drop),
            "reject" => Ok(Self::Reject),
            other => Err(DomainError::Validation(format!(
                "unknown tag policy: {other} (expected drop or reject)"
            ))),
        }
    }
}

impl ArticleWorkflow {
    /// Intersect `requested` with the tag catalog.
    pub(super) async fn resolve_tags(&self, requested: &[TagId]) -> ApplicationResult<Vec<TagId>> {
        if requested.is_empty() {
            return Ok(Vec::new());
        }

        let known: BTreeSet<TagId> = self
            .tag_repo
            .find_by_ids(requested)
            .await?
            .into_iter()
            .map(|tag| tag.id)
            .collect();

        let unknown: Vec<TagId> = requested
            .iter()
            .filter(|id| !known.contains(*id))
            .copied()
            .collect();

        if !unknown.is_empty() {
            match self.tag_policy {
                UnknownTagPolicy::Drop => {
                    tracing::warn!(kind = %self.kind, unknown = ?unknown, "dropping unknown tag ids");
                }
                UnknownTagPolicy::Reject => {
                    let listed = unknown
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(", ");
                    return Err(FieldErrors::single("tags", format!("unknown tag ids: {listed}")).into());
                }
            }
        }

        Ok(requested
            .iter()
            .filter(|id| known.contains(*id))
            .copied()
            .collect())
    }
}
