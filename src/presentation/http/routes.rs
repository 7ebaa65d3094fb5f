// src/presentation/http/routes.rs
use crate::presentation::http::controllers::articles;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json, Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::get,
};
use serde::Serialize;
use std::{path::PathBuf, time::Duration};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

/// Default request body cap, large enough for two base64 encoded images.
pub const DEFAULT_BODY_LIMIT: usize = 16 * 1024 * 1024;

/// Mount point for stored uploads.
#[derive(Debug, Clone)]
pub struct UploadMount {
    pub dir: PathBuf,
    pub public_prefix: String,
}

#[derive(Debug, Clone)]
pub struct RouterOptions {
    pub uploads: Option<UploadMount>,
    /// Empty or containing `*` allows any origin.
    pub allowed_origins: Vec<String>,
    pub body_limit: usize,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            uploads: None,
            allowed_origins: Vec::new(),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() || origins.iter().any(|o| o == "*") {
        AllowOrigin::from(Any)
    } else {
        let values: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(values)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600))
}

pub fn build_router(state: HttpState, options: RouterOptions) -> Router {
    let mut router = Router::new()
        .route("/health", get(health))
        .route(
            "/api/v1/{collection}",
            get(articles::list_articles).post(articles::create_article),
        )
        .route(
            "/api/v1/{collection}/by-slug/{slug}",
            get(articles::get_article_by_slug),
        )
        .route(
            "/api/v1/{collection}/{id}",
            get(articles::get_article)
                .put(articles::update_article)
                .delete(articles::delete_article),
        );

    if let Some(uploads) = options.uploads {
        router = router.nest_service(&uploads.public_prefix, ServeDir::new(uploads.dir));
    }

    router
        .layer(DefaultBodyLimit::max(options.body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&options.allowed_origins))
        .layer(Extension(state))
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

pub async fn health() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok".into(),
    })
}
