use axum::{
    routing::{get, post},
    Extension, Router,
};
use service::resources::{self, ResourceSpec};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::errors;
use crate::state::AppState;

pub mod auth;
pub mod resources_api;
pub mod system;
pub mod users;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// `/<name>` and `/<name>/:id` served by the shared CRUD handlers.
fn resource_router(spec: &'static ResourceSpec) -> Router<AppState> {
    Router::new()
        .route("/", get(resources_api::list).post(resources_api::create))
        .route(
            "/:id",
            get(resources_api::get).put(resources_api::update).delete(resources_api::delete),
        )
        .layer(Extension(spec))
}

fn users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(resources_api::list).post(users::create))
        .route("/:id", get(resources_api::get))
        .layer(Extension(&resources::USERS))
}

/// Panic catching plus request tracing, applied to the whole router.
pub fn with_error_boundary(router: Router) -> Router {
    router
        .layer(CatchPanicLayer::custom(errors::panic_response))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

/// Build the full application router.
pub fn build_router(state: AppState) -> Router {
    let mut app = Router::new()
        .route("/", get(system::root))
        .route("/error", get(system::fail))
        .route("/login", post(auth::login))
        .route("/api-docs/openapi.json", get(system::openapi_json))
        .nest("/users", users_router());

    for spec in resources::generic() {
        app = app.nest(&format!("/{}", spec.name), resource_router(spec));
    }

    let app = app.fallback(system::not_found).with_state(state).layer(build_cors());
    with_error_boundary(app)
}
