//! Signup and signin.

use axum::{extract::State, Json};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::AUTH_TAG;
use crate::api::dto::{ErrorResponse, SigninRequest, SignupRequest, TokenResponse};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::ValidatedJson;

/// Public routes: `POST /auth/signup`, `POST /auth/signin`.
pub fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(signup))
        .routes(routes!(signin))
}

/// Registers a user and returns a bearer token.
#[utoipa::path(
    post,
    path = "/auth/signup",
    tag = AUTH_TAG,
    request_body = SignupRequest,
    responses(
        (status = 200, description = "User registered", body = TokenResponse),
        (status = 400, description = "Email already exists or invalid role", body = ErrorResponse)
    )
)]
async fn signup(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SignupRequest>,
) -> AppResult<Json<TokenResponse>> {
    let bearer_token = state
        .services
        .auth
        .signup(
            &payload.email,
            &payload.password,
            &payload.user_role,
            &payload.nickname,
        )
        .await?;

    Ok(Json(TokenResponse { bearer_token }))
}

#[utoipa::path(
    post,
    path = "/auth/signin",
    tag = AUTH_TAG,
    request_body = SigninRequest,
    responses(
        (status = 200, description = "Signed in", body = TokenResponse),
        (status = 400, description = "User not registered", body = ErrorResponse),
        (status = 401, description = "Wrong password", body = ErrorResponse)
    )
)]
async fn signin(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SigninRequest>,
) -> AppResult<Json<TokenResponse>> {
    let bearer_token = state
        .services
        .auth
        .signin(&payload.email, &payload.password)
        .await?;

    Ok(Json(TokenResponse { bearer_token }))
}
