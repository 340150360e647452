use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(ToSchema)]
pub struct LoginRequest { pub username: String, pub password: String }

#[derive(ToSchema)]
pub struct LoginResponse { pub message: String, pub token: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub profile_picture: Option<String>,
}

/// Any record: a flat JSON object; `id` is assigned by the server.
#[derive(ToSchema)]
pub struct RecordDoc { pub id: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::system::root,
        crate::routes::system::fail,
        crate::routes::auth::login,
        crate::routes::users::create,
        crate::routes::resources_api::list,
        crate::routes::resources_api::get,
        crate::routes::resources_api::create,
        crate::routes::resources_api::update,
        crate::routes::resources_api::delete,
    ),
    components(
        schemas(
            MessageDoc,
            LoginRequest,
            LoginResponse,
            CreateUserRequest,
            RecordDoc,
        )
    ),
    tags(
        (name = "system"),
        (name = "auth"),
        (name = "users"),
        (name = "resources"),
    )
)]
pub struct ApiDoc;
