// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::workflow::{ArticleWorkflow, WorkflowPorts},
    domain::article::ArticleKind,
};

pub struct ApplicationServices {
    pub posts: Arc<ArticleWorkflow>,
    pub discussions: Arc<ArticleWorkflow>,
}

impl ApplicationServices {
    pub fn new(ports: WorkflowPorts) -> Self {
        Self {
            posts: Arc::new(ArticleWorkflow::new(ArticleKind::Post, ports.clone())),
            discussions: Arc::new(ArticleWorkflow::new(ArticleKind::Discussion, ports)),
        }
    }

    pub fn workflow(&self, kind: ArticleKind) -> Arc<ArticleWorkflow> {
        match kind {
            ArticleKind::Post => Arc::clone(&self.posts),
            ArticleKind::Discussion => Arc::clone(&self.discussions),
        }
    }
}
