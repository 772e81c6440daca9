// ABOUTME: ApiError, the HTTP-facing error type of the reelsnap server.
// ABOUTME: Maps core ParseError categories onto status codes and fixed JSON error bodies.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use reelsnap_core::{ErrorCode, ParseError};
use serde_json::json;

/// Every non-success response the API can produce.
///
/// Display strings are the exact `error` texts returned to callers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("no url provided")]
    MissingUrl,

    #[error("unsupported url")]
    UnsupportedUrl,

    /// The page answered with a non-success status.
    #[error("failed to fetch instagram page")]
    Upstream {
        status: u16,
        #[source]
        source: ParseError,
    },

    #[error("video url not found - instagram may block or changed markup")]
    NotFound,

    #[error("too many requests, please try again later")]
    RateLimited { retry_after_secs: u64 },

    /// Anything else, including network failures where no response arrived.
    #[error("internal error")]
    Internal(#[source] anyhow::Error),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingUrl | ApiError::UnsupportedUrl => StatusCode::BAD_REQUEST,
            ApiError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ParseError> for ApiError {
    fn from(err: ParseError) -> Self {
        match err.code {
            ErrorCode::InvalidUrl | ErrorCode::UnsupportedHost => ApiError::UnsupportedUrl,
            ErrorCode::Fetch => match err.status {
                Some(status) => ApiError::Upstream {
                    status,
                    source: err,
                },
                None => ApiError::Internal(err.into()),
            },
            ErrorCode::Timeout | ErrorCode::Ssrf | ErrorCode::Internal => {
                ApiError::Internal(err.into())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        match self {
            ApiError::Upstream { status: upstream, source } => {
                tracing::warn!(error = %source, "upstream fetch failed");
                (status, Json(json!({ "error": message, "status": upstream }))).into_response()
            }
            ApiError::RateLimited { retry_after_secs } => {
                let mut response = (status, Json(json!({ "error": message }))).into_response();
                response.headers_mut().insert(
                    header::RETRY_AFTER,
                    HeaderValue::from(retry_after_secs),
                );
                response
            }
            ApiError::Internal(err) => {
                tracing::error!(error = ?err, "request failed");
                (status, Json(json!({ "error": message }))).into_response()
            }
            _ => (status, Json(json!({ "error": message }))).into_response(),
        }
    }
}
