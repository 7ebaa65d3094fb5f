// src/presentation/http/controllers/articles.rs
use crate::application::{
    dto::{ArticleDetailDto, ArticleInput, ArticleSummaryDto, Page},
    error::ApplicationError,
    ports::media::MediaUpload,
    workflow::{ArticleWorkflow, DEFAULT_LIMIT},
};
use crate::domain::article::{ArticleKind, MediaSlot};
use crate::presentation::http::error::{HttpError, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Actor;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
    http::StatusCode,
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::Deserialize;
use std::sync::Arc;

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    i64::from(DEFAULT_LIMIT)
}

#[derive(Debug, Deserialize)]
pub struct ArticleListParams {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

/// Uploaded image; `data` is base64 encoded.
#[derive(Debug, Deserialize)]
pub struct MediaPayload {
    pub content_type: String,
    pub data: String,
}

impl MediaPayload {
    fn into_upload(self, slot: MediaSlot) -> HttpResult<MediaUpload> {
        let data = STANDARD.decode(self.data.trim()).map_err(|_| {
            HttpError::from_error(ApplicationError::upload(format!(
                "{}: data is not valid base64",
                slot.field_name()
            )))
        })?;
        Ok(MediaUpload::new(self.content_type, data))
    }
}

/// Create and update body. Fields a kind does not use are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct ArticleRequest {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub lead: Option<String>,
    pub sub_title: Option<String>,
    pub body: Option<String>,
    pub closed: Option<bool>,
    pub featured_img: Option<MediaPayload>,
    pub main_img: Option<MediaPayload>,
    pub tags: Option<Vec<i64>>,
}

impl ArticleRequest {
    fn into_input(self) -> HttpResult<ArticleInput> {
        let featured_img = self
            .featured_img
            .map(|payload| payload.into_upload(MediaSlot::FeaturedImage))
            .transpose()?;
        let main_img = self
            .main_img
            .map(|payload| payload.into_upload(MediaSlot::MainImage))
            .transpose()?;

        Ok(ArticleInput {
            title: self.title,
            slug: self.slug,
            lead: self.lead,
            sub_title: self.sub_title,
            body: self.body,
            closed: self.closed,
            featured_img,
            main_img,
            tags: self.tags,
        })
    }
}

fn workflow(state: &HttpState, collection: &str) -> HttpResult<Arc<ArticleWorkflow>> {
    ArticleKind::from_collection(collection)
        .map(|kind| state.services.workflow(kind))
        .ok_or_else(|| {
            HttpError::from_error(ApplicationError::not_found(format!(
                "unknown collection: {collection}"
            )))
        })
}

pub async fn list_articles(
    Extension(state): Extension<HttpState>,
    Path(collection): Path<String>,
    Query(params): Query<ArticleListParams>,
) -> HttpResult<Json<Page<ArticleSummaryDto>>> {
    let page = workflow(&state, &collection)?
        .list(params.page, params.limit)
        .await
        .into_http()?;
    Ok(Json(page))
}

pub async fn get_article(
    Extension(state): Extension<HttpState>,
    Path((collection, id)): Path<(String, String)>,
) -> HttpResult<Json<ArticleDetailDto>> {
    let detail = workflow(&state, &collection)?
        .get_by_identity(&id)
        .await
        .into_http()?;
    Ok(Json(detail))
}

pub async fn get_article_by_slug(
    Extension(state): Extension<HttpState>,
    Path((collection, slug)): Path<(String, String)>,
) -> HttpResult<Json<ArticleDetailDto>> {
    let detail = workflow(&state, &collection)?
        .get_by_slug(&slug)
        .await
        .into_http()?;
    Ok(Json(detail))
}

pub async fn create_article(
    Extension(state): Extension<HttpState>,
    Actor(actor): Actor,
    Path(collection): Path<String>,
    Json(payload): Json<ArticleRequest>,
) -> HttpResult<(StatusCode, Json<ArticleDetailDto>)> {
    let workflow = workflow(&state, &collection)?;
    let input = payload.into_input()?;
    let detail = workflow.create(&actor, input).await.into_http()?;
    Ok((StatusCode::CREATED, Json(detail)))
}

pub async fn update_article(
    Extension(state): Extension<HttpState>,
    Actor(_actor): Actor,
    Path((collection, id)): Path<(String, String)>,
    Json(payload): Json<ArticleRequest>,
) -> HttpResult<Json<ArticleDetailDto>> {
    let workflow = workflow(&state, &collection)?;
    let input = payload.into_input()?;
    let detail = workflow.update(input, &id).await.into_http()?;
    Ok(Json(detail))
}

pub async fn delete_article(
    Extension(state): Extension<HttpState>,
    Actor(_actor): Actor,
    Path((collection, id)): Path<(String, String)>,
) -> HttpResult<StatusCode> {
    workflow(&state, &collection)?
        .delete(&id)
        .await
        .into_http()?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_maps_to_input_with_decoded_uploads() {
        let request: ArticleRequest = serde_json::from_value(serde_json::json!({
            "title": "Hello",
            "tags": [2, 1],
            "featured_img": {
                "content_type": "image/png",
                "data": STANDARD.encode(b"png-bytes"),
            }
        }))
        .unwrap();

        let input = request.into_input().unwrap();
        assert_eq!(input.title.as_deref(), Some("Hello"));
        assert_eq!(input.tags, Some(vec![2, 1]));
        let upload = input.upload(MediaSlot::FeaturedImage).unwrap();
        assert_eq!(upload.data.as_ref(), b"png-bytes");
        assert!(input.upload(MediaSlot::MainImage).is_none());
    }

    #[test]
    fn invalid_base64_is_an_upload_error() {
        let request = ArticleRequest {
            main_img: Some(MediaPayload {
                content_type: "image/png".into(),
                data: "not base64!".into(),
            }),
            ..ArticleRequest::default()
        };

        let err = request.into_input().unwrap_err();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
