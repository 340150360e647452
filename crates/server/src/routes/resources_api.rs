//! Shared list/get/create/update/delete handlers. The resource being served
//! comes from the `Extension<&ResourceSpec>` its sub-router carries.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use common::types::Message;
use serde::Deserialize;
use service::resources::{DeleteReply, ResourceSpec};
use service::storage::Record;

use crate::errors::ApiError;
use crate::state::AppState;

type Spec = Extension<&'static ResourceSpec>;

/// List filters. Each one only applies to the resource that declares it; an
/// empty value counts as absent.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// users: case-insensitive exact match
    pub username: Option<String>,
    /// users: case-insensitive exact match
    pub email: Option<String>,
    /// hosts: case-insensitive exact match
    pub name: Option<String>,
    /// properties: case-insensitive exact match
    pub location: Option<String>,
    /// properties: maximum price per night
    pub price_per_night: Option<String>,
    /// properties: case-insensitive substring
    pub amenities: Option<String>,
    /// bookings: exact match
    pub user_id: Option<String>,
}

impl ListQuery {
    /// `(param, value)` pairs for the filters actually given.
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("username", &self.username),
            ("email", &self.email),
            ("name", &self.name),
            ("location", &self.location),
            ("pricePerNight", &self.price_per_night),
            ("amenities", &self.amenities),
            ("userId", &self.user_id),
        ]
        .into_iter()
        .filter_map(|(param, value)| value.as_deref().filter(|v| !v.is_empty()).map(|v| (param, v)))
        .collect()
    }
}

#[utoipa::path(
    get,
    path = "/{resource}",
    tag = "resources",
    params(
        ("resource" = String, Path, description = "users, hosts, properties, amenities, bookings or reviews"),
        ListQuery
    ),
    responses((status = 200, description = "Matching records", body = [crate::openapi::RecordDoc]))
)]
pub async fn list(
    State(state): State<AppState>,
    Extension(spec): Spec,
    Query(query): Query<ListQuery>,
) -> Json<Vec<Record>> {
    let pairs = query.pairs();
    Json(state.repo.list(spec, pairs.iter().copied()).await)
}

#[utoipa::path(
    get,
    path = "/{resource}/{id}",
    tag = "resources",
    params(
        ("resource" = String, Path, description = "Collection name"),
        ("id" = String, Path, description = "Record id")
    ),
    responses(
        (status = 200, description = "The record", body = crate::openapi::RecordDoc),
        (status = 404, description = "No record with that id", body = crate::openapi::MessageDoc)
    )
)]
pub async fn get(
    State(state): State<AppState>,
    Extension(spec): Spec,
    Path(id): Path<String>,
) -> Result<Json<Record>, ApiError> {
    Ok(Json(state.repo.get(spec, &id).await?))
}

#[utoipa::path(
    post,
    path = "/{resource}",
    tag = "resources",
    params(("resource" = String, Path, description = "Collection name")),
    request_body = crate::openapi::RecordDoc,
    responses(
        (status = 201, description = "Created record", body = crate::openapi::RecordDoc),
        (status = 400, description = "Body is not a JSON object", body = crate::openapi::MessageDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Extension(spec): Spec,
    payload: Result<Json<Record>, JsonRejection>,
) -> Result<(StatusCode, Json<Record>), ApiError> {
    let Json(body) = payload?;
    let created = state.repo.create(spec, body).await;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/{resource}/{id}",
    tag = "resources",
    params(
        ("resource" = String, Path, description = "Collection name"),
        ("id" = String, Path, description = "Record id")
    ),
    request_body = crate::openapi::RecordDoc,
    responses(
        (status = 200, description = "Merged record", body = crate::openapi::RecordDoc),
        (status = 404, description = "No record with that id", body = crate::openapi::MessageDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Extension(spec): Spec,
    Path(id): Path<String>,
    payload: Result<Json<Record>, JsonRejection>,
) -> Result<Json<Record>, ApiError> {
    let Json(patch) = payload?;
    Ok(Json(state.repo.update(spec, &id, patch).await?))
}

#[utoipa::path(
    delete,
    path = "/{resource}/{id}",
    tag = "resources",
    params(
        ("resource" = String, Path, description = "Collection name"),
        ("id" = String, Path, description = "Record id")
    ),
    responses(
        (status = 200, description = "Deleted (hosts, amenities, reviews)", body = crate::openapi::MessageDoc),
        (status = 204, description = "Deleted (properties, bookings)"),
        (status = 404, description = "No record with that id", body = crate::openapi::MessageDoc)
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Extension(spec): Spec,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    state.repo.delete(spec, &id).await?;
    Ok(match spec.delete_reply {
        DeleteReply::Message => (StatusCode::OK, Json(Message::new(spec.deleted_message()))).into_response(),
        DeleteReply::NoContent => StatusCode::NO_CONTENT.into_response(),
    })
}
