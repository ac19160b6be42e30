//! Admin-only user management.

use axum::{
    extract::{Path, State},
    Json,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::ADMIN_TAG;
use crate::api::dto::{ErrorResponse, UserRoleChangeRequest, UserRoleResponse};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::ValidatedJson;

pub fn admin_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(change_user_role))
}

/// Changes a user's role.
#[utoipa::path(
    patch,
    path = "/admin/users/{user_id}",
    tag = ADMIN_TAG,
    params(("user_id" = i64, Path, description = "User id")),
    request_body = UserRoleChangeRequest,
    responses(
        (status = 200, description = "Role updated", body = UserRoleResponse),
        (status = 400, description = "Invalid user role or user not found", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn change_user_role(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UserRoleChangeRequest>,
) -> AppResult<Json<UserRoleResponse>> {
    let user = state.services.users.update_role(user_id, &payload.role).await?;
    Ok(Json(user.into()))
}
