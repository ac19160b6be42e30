//! Todo endpoints.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::TODO_TAG;
use crate::api::dto::{
    ErrorResponse, PagedResponse, TodoListQuery, TodoResponse, TodoSaveRequest, TodoSaveResponse,
    TodoSearchQuery, TodoSearchResponse,
};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::jwt::AuthUser;
use crate::utils::{ValidatedJson, ValidatedQuery};

/// # Routes
/// - `GET /todos`, `POST /todos`
/// - `GET /todos/search`
/// - `GET /todos/{todo_id}`, `DELETE /todos/{todo_id}`
pub fn todo_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(get_todos, save_todo))
        .routes(routes!(search_todos))
        .routes(routes!(get_todo, delete_todo))
}

/// Creates a todo stamped with today's weather.
#[utoipa::path(
    post,
    path = "/todos",
    tag = TODO_TAG,
    request_body = TodoSaveRequest,
    responses(
        (status = 200, description = "Todo created", body = TodoSaveResponse),
        (status = 500, description = "Weather lookup failed", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn save_todo(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<TodoSaveRequest>,
) -> AppResult<Json<TodoSaveResponse>> {
    let saved = state
        .services
        .todos
        .save_todo(&auth_user, &payload.title, &payload.contents)
        .await?;
    Ok(Json(saved.into()))
}

/// Lists todos, most recently modified first.
#[utoipa::path(
    get,
    path = "/todos",
    tag = TODO_TAG,
    params(TodoListQuery),
    responses(
        (status = 200, description = "Page of todos", body = PagedResponse<TodoResponse>),
        (status = 400, description = "Invalid paging or date", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn get_todos(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<TodoListQuery>,
) -> AppResult<Json<PagedResponse<TodoResponse>>> {
    let (page, params) = query.into_parts();
    let todos = state.services.todos.get_todos(page, params).await?;
    Ok(Json(PagedResponse::from_page(todos, TodoResponse::from)))
}

/// Searches todos by title, manager nickname and creation date.
#[utoipa::path(
    get,
    path = "/todos/search",
    tag = TODO_TAG,
    params(TodoSearchQuery),
    responses(
        (status = 200, description = "Page of matching todos", body = PagedResponse<TodoSearchResponse>),
        (status = 400, description = "Invalid paging or date", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn search_todos(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<TodoSearchQuery>,
) -> AppResult<Json<PagedResponse<TodoSearchResponse>>> {
    let (page, params) = query.into_parts();
    let results = state.services.todos.search_todos(page, params).await?;
    Ok(Json(PagedResponse::from_page(results, TodoSearchResponse::from)))
}

#[utoipa::path(
    get,
    path = "/todos/{todo_id}",
    tag = TODO_TAG,
    params(("todo_id" = i64, Path, description = "Todo id")),
    responses(
        (status = 200, description = "Todo with its owner", body = TodoResponse),
        (status = 400, description = "Todo not found", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn get_todo(
    State(state): State<AppState>,
    Path(todo_id): Path<i64>,
) -> AppResult<Json<TodoResponse>> {
    let todo = state.services.todos.get_todo(todo_id).await?;
    Ok(Json(todo.into()))
}

/// Deletes a todo owned by the caller, with its managers and comments.
#[utoipa::path(
    delete,
    path = "/todos/{todo_id}",
    tag = TODO_TAG,
    params(("todo_id" = i64, Path, description = "Todo id")),
    responses(
        (status = 200, description = "Todo deleted"),
        (status = 400, description = "Todo not found", body = ErrorResponse),
        (status = 403, description = "Caller does not own the todo", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn delete_todo(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(todo_id): Path<i64>,
) -> AppResult<()> {
    state.services.todos.delete_todo(&auth_user, todo_id).await
}
