//! Todo service: creation with a weather snapshot, listing, lookup, search
//! and owner-only deletion.

use std::sync::Arc;

use diesel_async::scoped_futures::ScopedFutureExt;

use crate::db::{read_only, transactional, AsyncDbPool};
use crate::error::{AppError, AppResult};
use crate::external::WeatherProvider;
use crate::models::{NewTodo, Todo, User, UserProfile};
use crate::repositories::{Repositories, TodoListFilter, TodoSearchFilter, TodoSummary};
use crate::utils::date::date_range;
use crate::utils::jwt::AuthUser;

/// 1-indexed page request as received from the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub size: i64,
}

impl PageRequest {
    pub fn new(page: i64, size: i64) -> Self {
        Self {
            page: page.max(1),
            size: size.max(1),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.size)
    }

    pub fn limit(&self) -> i64 {
        self.size
    }
}

/// Rows of one page plus the total number of matches.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub request: PageRequest,
}

/// Raw listing parameters; dates are `yyyyMMdd`, empty means unbounded.
#[derive(Debug, Clone, Default)]
pub struct TodoListParams {
    pub weather: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TodoSearchParams {
    pub title: Option<String>,
    pub nickname: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Clone)]
pub struct TodoService {
    pool: AsyncDbPool,
    repos: Repositories,
    weather: Arc<dyn WeatherProvider>,
}

impl TodoService {
    pub fn new(pool: AsyncDbPool, repos: Repositories, weather: Arc<dyn WeatherProvider>) -> Self {
        Self {
            pool,
            repos,
            weather,
        }
    }

    /// Creates a todo owned by the caller and registers the caller as its
    /// first manager, both in one transaction.
    ///
    /// The weather is fetched before the transaction opens; if the lookup
    /// fails nothing is written.
    pub async fn save_todo(
        &self,
        auth_user: &AuthUser,
        title: &str,
        contents: &str,
    ) -> AppResult<(Todo, UserProfile)> {
        let owner = UserProfile::from_auth_user(auth_user)?;
        let weather = self.weather.today_weather().await?;

        let new_todo = NewTodo::new(title.to_string(), contents.to_string(), weather, owner.id);
        let repos = self.repos;
        let todo = transactional(&self.pool, |conn| {
            async move {
                let todo = repos.todos.create(conn, &new_todo).await?;
                repos
                    .managers
                    .create(conn, &new_todo.owner_manager(todo.id))
                    .await?;
                Ok(todo)
            }
            .scope_boxed()
        })
        .await?;

        tracing::info!(todo_id = todo.id, user_id = owner.id, weather = %todo.weather, "Todo created");
        Ok((todo, owner))
    }

    /// Listing filtered by exact weather and a `modified_at` date range,
    /// most recently modified first.
    pub async fn get_todos(
        &self,
        page: PageRequest,
        params: TodoListParams,
    ) -> AppResult<Page<(Todo, User)>> {
        let (modified_from, modified_to) =
            date_range(params.start_date.as_deref(), params.end_date.as_deref())?;
        let filter = TodoListFilter {
            weather: params.weather.filter(|w| !w.is_empty()),
            modified_from,
            modified_to,
        };

        let repos = self.repos;
        let (items, total) = read_only(&self.pool, |conn| {
            async move {
                repos
                    .todos
                    .find_all(conn, &filter, page.offset(), page.limit())
                    .await
            }
            .scope_boxed()
        })
        .await?;

        Ok(Page {
            items,
            total,
            request: page,
        })
    }

    /// One todo with its owner, or `Todo not found`.
    pub async fn get_todo(&self, todo_id: i64) -> AppResult<(Todo, User)> {
        let repos = self.repos;
        read_only(&self.pool, |conn| {
            async move {
                repos
                    .todos
                    .find_by_id_with_user(conn, todo_id)
                    .await?
                    .ok_or_else(|| AppError::not_found("Todo"))
            }
            .scope_boxed()
        })
        .await
    }

    pub async fn search_todos(
        &self,
        page: PageRequest,
        params: TodoSearchParams,
    ) -> AppResult<Page<TodoSummary>> {
        let (created_from, created_to) =
            date_range(params.start_date.as_deref(), params.end_date.as_deref())?;
        let filter = TodoSearchFilter {
            title: non_blank(params.title),
            manager_nickname: non_blank(params.nickname),
            created_from,
            created_to,
        };

        let repos = self.repos;
        let (items, total) = read_only(&self.pool, |conn| {
            async move {
                repos
                    .todos
                    .search(conn, &filter, page.offset(), page.limit())
                    .await
            }
            .scope_boxed()
        })
        .await?;

        Ok(Page {
            items,
            total,
            request: page,
        })
    }

    /// Deletes a todo the caller owns; its managers and comments cascade.
    pub async fn delete_todo(&self, auth_user: &AuthUser, todo_id: i64) -> AppResult<()> {
        let repos = self.repos;
        let user_id = auth_user.id;
        transactional(&self.pool, |conn| {
            async move {
                let todo = repos
                    .todos
                    .find_by_id(conn, todo_id)
                    .await?
                    .ok_or_else(|| AppError::not_found("Todo"))?;
                if !todo.is_owned_by(user_id) {
                    return Err(AppError::forbidden("Only the todo owner can delete it"));
                }
                repos.todos.delete(conn, todo_id).await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await?;

        tracing::info!(todo_id, user_id, "Todo deleted");
        Ok(())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
