use axum::{extract::rejection::JsonRejection, extract::State, Json};
use service::auth::domain::{AuthSession, LoginInput};

use crate::errors::ApiError;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body = crate::openapi::LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = crate::openapi::LoginResponse),
        (status = 401, description = "Bad credentials", body = crate::openapi::MessageDoc)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginInput>, JsonRejection>,
) -> Result<Json<AuthSession>, ApiError> {
    let Json(input) = payload?;
    let session = state.auth.login(input).await?;
    Ok(Json(session))
}
