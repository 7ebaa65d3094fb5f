// src/application/workflow/mod.rs
//! Publish workflow shared by every article kind.
//!
//! One [`ArticleWorkflow`] instance exists per [`ArticleKind`]; the kind
//! selects the validator, the extension shape and the media slots, while
//! identity allocation, tag replacement and the unit of work live here once.
//!
//! [`ArticleKind`]: crate::domain::article::ArticleKind
mod create;
mod delete;
mod media;
mod queries;
mod service;
mod tags;
mod unit_of_work;
mod update;

pub use queries::{DEFAULT_LIMIT, MAX_LIMIT};
pub use service::{ArticleWorkflow, WorkflowPorts};
pub use tags::UnknownTagPolicy;
