//! Todo manager endpoints.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::MANAGER_TAG;
use crate::api::dto::{ErrorResponse, ManagerResponse, ManagerSaveRequest};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::jwt::AuthUser;
use crate::utils::ValidatedJson;

pub fn manager_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(get_managers, save_manager))
        .routes(routes!(delete_manager))
}

/// Registers another user as manager of a todo the caller owns.
#[utoipa::path(
    post,
    path = "/todos/{todo_id}/managers",
    tag = MANAGER_TAG,
    params(("todo_id" = i64, Path, description = "Todo id")),
    request_body = ManagerSaveRequest,
    responses(
        (status = 200, description = "Manager registered", body = ManagerResponse),
        (status = 400, description = "Todo or user not found", body = ErrorResponse),
        (status = 403, description = "Caller does not own the todo", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn save_manager(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(todo_id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<ManagerSaveRequest>,
) -> AppResult<Json<ManagerResponse>> {
    let saved = state
        .services
        .managers
        .save_manager(&auth_user, todo_id, payload.manager_user_id)
        .await?;
    Ok(Json(saved.into()))
}

#[utoipa::path(
    get,
    path = "/todos/{todo_id}/managers",
    tag = MANAGER_TAG,
    params(("todo_id" = i64, Path, description = "Todo id")),
    responses(
        (status = 200, description = "Managers", body = Vec<ManagerResponse>),
        (status = 400, description = "Todo not found", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn get_managers(
    State(state): State<AppState>,
    Path(todo_id): Path<i64>,
) -> AppResult<Json<Vec<ManagerResponse>>> {
    let managers = state.services.managers.get_managers(todo_id).await?;
    Ok(Json(managers.into_iter().map(ManagerResponse::from).collect()))
}

#[utoipa::path(
    delete,
    path = "/todos/{todo_id}/managers/{manager_id}",
    tag = MANAGER_TAG,
    params(
        ("todo_id" = i64, Path, description = "Todo id"),
        ("manager_id" = i64, Path, description = "Manager id")
    ),
    responses(
        (status = 200, description = "Manager removed"),
        (status = 400, description = "Todo or manager not found", body = ErrorResponse),
        (status = 403, description = "Caller does not own the todo", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn delete_manager(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path((todo_id, manager_id)): Path<(i64, i64)>,
) -> AppResult<()> {
    state
        .services
        .managers
        .delete_manager(&auth_user, todo_id, manager_id)
        .await
}
