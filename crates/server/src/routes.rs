// ABOUTME: HTTP handlers for the reelsnap server: video lookup, companion form and health check.
// ABOUTME: The lookup handler validates the JSON body and turns pipeline outcomes into API responses.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::{Html, IntoResponse};
use axum::Json;
use reelsnap_core::ExtractionResult;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::AppState;

/// Body of `POST /api/get-video`.
///
/// `url` is kept loosely typed so a wrong JSON type reads as an unsupported
/// URL rather than a malformed body.
#[derive(Debug, Default, Deserialize)]
pub struct GetVideoRequest {
    #[serde(default)]
    pub url: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GetVideoResponse {
    pub video_url: String,
}

impl GetVideoRequest {
    fn target(&self) -> Result<&str, ApiError> {
        match &self.url {
            None | Some(Value::Null) => Err(ApiError::MissingUrl),
            Some(Value::String(s)) if s.trim().is_empty() => Err(ApiError::MissingUrl),
            Some(Value::String(s)) => Ok(s),
            Some(_) => Err(ApiError::UnsupportedUrl),
        }
    }
}

pub async fn get_video(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GetVideoRequest>, JsonRejection>,
) -> Result<Json<GetVideoResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!(%rejection, "unreadable request body");
        ApiError::MissingUrl
    })?;
    let target = request.target()?;

    match state.client.fetch_video(target).await? {
        ExtractionResult::Found(video_url) => Ok(Json(GetVideoResponse { video_url })),
        ExtractionResult::NotFound => Err(ApiError::NotFound),
    }
}

/// Companion page that posts to the lookup endpoint.
pub async fn form() -> impl IntoResponse {
    Html(include_str!("form.html"))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
