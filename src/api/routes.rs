//! Router configuration for the API.

use std::time::Duration;

use axum::http::StatusCode;
use axum::{middleware, Router};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{
    admin_middleware, auth_middleware, global_error_handler, logging_middleware,
    request_id_middleware,
};
use crate::state::AppState;

pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";
pub const SWAGGER_PATH: &str = "/swagger-ui";

/// Routes plus their OpenAPI description, before global middleware.
///
/// `/health` and `/auth` are public, `/admin` needs `ROLE_ADMIN`, every
/// other route needs a valid bearer token.
pub fn api_router(state: &AppState) -> OpenApiRouter<AppState> {
    let protected = OpenApiRouter::new()
        .merge(handlers::users::user_routes())
        .merge(handlers::todos::todo_routes())
        .merge(handlers::comments::comment_routes())
        .merge(handlers::managers::manager_routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    // route_layer: last added runs first, so auth precedes the admin gate
    let admin = handlers::admin::admin_routes()
        .route_layer(middleware::from_fn(admin_middleware))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(handlers::health::health_routes())
        .merge(handlers::auth::auth_routes())
        .merge(protected)
        .merge(admin)
}

/// Creates the application router with Swagger UI and all middleware.
///
/// # Middleware Order
/// Outermost first: request id, access log, error-body normaliser, timeout,
/// CORS, compression.
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    let (router, openapi) = api_router(&state).split_for_parts();

    router
        .merge(SwaggerUi::new(SWAGGER_PATH).url(OPENAPI_PATH, openapi))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(timeout_layer(request_timeout))
        .layer(middleware::from_fn(global_error_handler))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

/// Requests running past `request_timeout` are answered with 408.
fn timeout_layer(request_timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, request_timeout)
}
