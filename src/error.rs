use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::models::MAX_TTL_SECONDS;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Unavailable pastes all map to the same [`ApiError::NotFound`] so callers
/// cannot distinguish a missing id from an expired or view-exhausted one.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ApiError {
    #[error("content is required and must be non-empty")]
    EmptyContent,
    #[error("ttl_seconds must be between 1 and {max}", max = MAX_TTL_SECONDS)]
    InvalidTtl,
    #[error("max_views must be >= 1")]
    InvalidMaxViews,
    #[error("paste not found, expired, or view limit exceeded")]
    NotFound,
    #[error("paste store unavailable")]
    Store {
        #[from]
        source: redis::RedisError,
    },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            ApiError::EmptyContent => StatusCode::BAD_REQUEST,
            ApiError::InvalidTtl => StatusCode::BAD_REQUEST,
            ApiError::InvalidMaxViews => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Store { .. } => StatusCode::SERVICE_UNAVAILABLE,
        };

        (status_code, Json(json!({ "error": format!("{self}") }))).into_response()
    }
}
