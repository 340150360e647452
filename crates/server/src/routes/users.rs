use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use service::resources::USERS;
use service::storage::Record;

use crate::errors::ApiError;
use crate::state::AppState;

/// Fields copied from the request body into a new user; anything else is dropped.
const USER_FIELDS: [&str; 6] = ["username", "password", "name", "email", "phoneNumber", "profilePicture"];
const REQUIRED_FIELDS: [&str; 3] = ["username", "password", "email"];

fn present(body: &Record, field: &str) -> bool {
    body.get(field).and_then(Value::as_str).is_some_and(|s| !s.is_empty())
}

#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = crate::openapi::CreateUserRequest,
    responses(
        (status = 201, description = "User created, password omitted", body = crate::openapi::RecordDoc),
        (status = 400, description = "Missing username, password or email", body = crate::openapi::MessageDoc),
        (status = 409, description = "Username taken", body = crate::openapi::MessageDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Record>, JsonRejection>,
) -> Result<(StatusCode, Json<Record>), ApiError> {
    let Json(body) = payload?;
    if !REQUIRED_FIELDS.iter().all(|f| present(&body, f)) {
        return Err(ApiError::Validation("Username, password, and email are required".into()));
    }

    let user: Record = body
        .into_iter()
        .filter(|(k, v)| USER_FIELDS.contains(&k.as_str()) && !v.is_null())
        .collect();
    let created = state
        .repo
        .create_unique(&USERS, "username", "Username already exists", user)
        .await?;
    Ok((StatusCode::CREATED, Json(USERS.redact(created))))
}
