//! User profile endpoints for the authenticated caller.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::USER_TAG;
use crate::api::dto::{ChangeNicknameRequest, ChangePasswordRequest, ErrorResponse, UserResponse};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::jwt::AuthUser;
use crate::utils::ValidatedJson;

/// # Routes
/// - `GET /users/{user_id}`
/// - `PUT /users` - change password
/// - `PATCH /users/nickname`
pub fn user_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(get_user))
        .routes(routes!(change_password))
        .routes(routes!(change_nickname))
}

#[utoipa::path(
    get,
    path = "/users/{user_id}",
    tag = USER_TAG,
    params(("user_id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 400, description = "User not found", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<UserResponse>> {
    let user = state.services.users.get_user(user_id).await?;
    Ok(Json(user.into()))
}

/// Changes the caller's password; identity comes from the token.
#[utoipa::path(
    put,
    path = "/users",
    tag = USER_TAG,
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed"),
        (status = 400, description = "Wrong password or weak new password", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn change_password(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<ChangePasswordRequest>,
) -> AppResult<()> {
    state
        .services
        .users
        .change_password(&auth_user, &payload.old_password, &payload.new_password)
        .await
}

#[utoipa::path(
    patch,
    path = "/users/nickname",
    tag = USER_TAG,
    request_body = ChangeNicknameRequest,
    responses(
        (status = 200, description = "Nickname changed", body = UserResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn change_nickname(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<ChangeNicknameRequest>,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .services
        .users
        .change_nickname(&auth_user, &payload.nickname)
        .await?;
    Ok(Json(user.into()))
}
