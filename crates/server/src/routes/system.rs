use axum::{http::StatusCode, Json};
use common::types::{Message, LIVENESS_TEXT};
use utoipa::OpenApi;

use crate::errors::ApiError;
use crate::openapi::ApiDoc;

/// Liveness check.
#[utoipa::path(get, path = "/", tag = "system", responses((status = 200, description = "Server is up", body = String)))]
pub async fn root() -> &'static str {
    LIVENESS_TEXT
}

/// Always fails through the internal error path.
#[utoipa::path(get, path = "/error", tag = "system", responses((status = 500, description = "Generic failure", body = crate::openapi::MessageDoc)))]
pub async fn fail() -> Result<&'static str, ApiError> {
    Err(ApiError::Internal(anyhow::anyhow!("Example error")))
}

pub async fn not_found() -> (StatusCode, Json<Message>) {
    (StatusCode::NOT_FOUND, Json(Message::new("Route not found")))
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
