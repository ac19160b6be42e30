use axum::{
    extract::{Path, State},
    Extension, Json,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::COMMENT_TAG;
use crate::api::dto::{CommentResponse, CommentSaveRequest, ErrorResponse};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::jwt::AuthUser;
use crate::utils::ValidatedJson;

pub fn comment_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(get_comments, save_comment))
}

#[utoipa::path(
    post,
    path = "/todos/{todo_id}/comments",
    tag = COMMENT_TAG,
    params(("todo_id" = i64, Path, description = "Todo id")),
    request_body = CommentSaveRequest,
    responses(
        (status = 200, description = "Comment created", body = CommentResponse),
        (status = 400, description = "Todo not found", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn save_comment(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(todo_id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<CommentSaveRequest>,
) -> AppResult<Json<CommentResponse>> {
    let saved = state
        .services
        .comments
        .save_comment(&auth_user, todo_id, &payload.contents)
        .await?;
    Ok(Json(saved.into()))
}

/// Comments on a todo with their authors.
#[utoipa::path(
    get,
    path = "/todos/{todo_id}/comments",
    tag = COMMENT_TAG,
    params(("todo_id" = i64, Path, description = "Todo id")),
    responses(
        (status = 200, description = "Comments", body = Vec<CommentResponse>)
    ),
    security(("bearerAuth" = []))
)]
async fn get_comments(
    State(state): State<AppState>,
    Path(todo_id): Path<i64>,
) -> AppResult<Json<Vec<CommentResponse>>> {
    let comments = state.services.comments.get_comments(todo_id).await?;
    Ok(Json(comments.into_iter().map(CommentResponse::from).collect()))
}
