// tests/support/helpers.rs
use super::mocks::{FixedClock, InMemoryArticleStore, InMemoryTagCatalog, RecordingMediaStore};
use axum::body;
use axum::http::StatusCode;
use folio_core::application::{
    dto::AuthenticatedActor,
    ports::{media::MediaStore, media::MediaUpload, time::Clock},
    services::ApplicationServices,
    workflow::{ArticleWorkflow, UnknownTagPolicy, WorkflowPorts},
};
use folio_core::domain::user::UserId;
use folio_core::infrastructure::{
    identity::TimeOrderedIdentityAllocator, util::DefaultSlugGenerator,
};
use folio_core::presentation::http::{
    routes::{RouterOptions, build_router},
    state::HttpState,
};
use serde_json::Value;
use std::sync::Arc;

/// テスト用に組み立てたサービス一式とモック
pub struct TestHarness {
    pub store: Arc<InMemoryArticleStore>,
    pub tags: Arc<InMemoryTagCatalog>,
    pub media: Arc<RecordingMediaStore>,
    pub services: Arc<ApplicationServices>,
}

pub struct HarnessBuilder {
    tag_ids: Vec<i64>,
    policy: UnknownTagPolicy,
    clock: Arc<dyn Clock>,
    media_store: Option<Arc<dyn MediaStore>>,
}

impl HarnessBuilder {
    pub fn tags(mut self, ids: &[i64]) -> Self {
        self.tag_ids = ids.to_vec();
        self
    }

    pub fn policy(mut self, policy: UnknownTagPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn media_store(mut self, store: Arc<dyn MediaStore>) -> Self {
        self.media_store = Some(store);
        self
    }

    pub fn build(self) -> TestHarness {
        let store = Arc::new(InMemoryArticleStore::new());
        let tags = Arc::new(InMemoryTagCatalog::with_ids(&self.tag_ids));
        let media = Arc::new(RecordingMediaStore::default());
        let media_store: Arc<dyn MediaStore> = match self.media_store {
            Some(custom) => custom,
            None => media.clone() as Arc<dyn MediaStore>,
        };

        let services = Arc::new(ApplicationServices::new(WorkflowPorts {
            read_repo: store.clone(),
            write_repo: store.clone(),
            tag_repo: tags.clone(),
            media_store,
            identities: Arc::new(TimeOrderedIdentityAllocator::new()),
            slugger: Arc::new(DefaultSlugGenerator),
            clock: self.clock,
            tag_policy: self.policy,
        }));

        TestHarness {
            store,
            tags,
            media,
            services,
        }
    }
}

impl TestHarness {
    pub fn builder() -> HarnessBuilder {
        HarnessBuilder {
            tag_ids: vec![1, 2, 3],
            policy: UnknownTagPolicy::Drop,
            clock: Arc::new(FixedClock),
            media_store: None,
        }
    }

    /// Catalog with tags 1, 2 and 3, unknown ids dropped, fixed clock.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn posts(&self) -> Arc<ArticleWorkflow> {
        Arc::clone(&self.services.posts)
    }

    pub fn discussions(&self) -> Arc<ArticleWorkflow> {
        Arc::clone(&self.services.discussions)
    }

    pub fn router(&self) -> axum::Router {
        let state = HttpState {
            services: Arc::clone(&self.services),
        };
        build_router(state, RouterOptions::default())
    }
}

pub fn actor() -> AuthenticatedActor {
    AuthenticatedActor::new(UserId::new(7).unwrap())
}

pub fn png(bytes: &[u8]) -> MediaUpload {
    MediaUpload::new("image/png", bytes.to_vec())
}

pub async fn json_body(resp: axum::response::Response) -> Value {
    let body_bytes = body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body_bytes).expect("expected valid json body")
}

/// Assert that a response is an ErrorResponse JSON with the expected status and error string.
pub async fn assert_error_response(
    resp: axum::response::Response,
    expected_status: StatusCode,
    expected_error: &str,
) -> Value {
    assert_eq!(resp.status(), expected_status);
    let ct = resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    assert!(ct.starts_with("application/json"), "unexpected content-type: {}", ct);
    let json = json_body(resp).await;
    let err_field = json.get("error").and_then(|v| v.as_str()).unwrap_or("");
    let msg_field = json.get("message").and_then(|v| v.as_str()).unwrap_or("");
    assert_eq!(err_field, expected_error, "unexpected error field: {}", err_field);
    assert!(!msg_field.is_empty(), "expected non-empty message field in ErrorResponse");
    json
}
