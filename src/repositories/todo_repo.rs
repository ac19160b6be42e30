//! Todo repository: owner joins, the filtered listing and the search query.

use std::collections::HashMap;

use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use jiff::civil::DateTime;
use jiff_diesel::ToDiesel;

use crate::error::{AppError, AppResult};
use crate::models::{NewTodo, Todo, User};
use crate::schema::{comments, managers, todos, users};

/// Filter for the main listing. `weather` is matched exactly; the range
/// applies to `modified_at` and is inclusive on both ends.
#[derive(Debug, Clone, PartialEq)]
pub struct TodoListFilter {
    pub weather: Option<String>,
    pub modified_from: DateTime,
    pub modified_to: DateTime,
}

/// Filter for `/todos/search`. Text filters are case-insensitive substrings;
/// the range applies to `created_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct TodoSearchFilter {
    pub title: Option<String>,
    pub manager_nickname: Option<String>,
    pub created_from: DateTime,
    pub created_to: DateTime,
}

/// One search hit with its related row counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoSummary {
    pub id: i64,
    pub title: String,
    pub manager_count: i64,
    pub comment_count: i64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TodoRepository;

impl TodoRepository {
    pub async fn create(&self, conn: &mut AsyncPgConnection, new_todo: &NewTodo) -> AppResult<Todo> {
        diesel::insert_into(todos::table)
            .values(new_todo)
            .returning(Todo::as_returning())
            .get_result(conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn find_by_id(&self, conn: &mut AsyncPgConnection, todo_id: i64) -> AppResult<Option<Todo>> {
        todos::table
            .find(todo_id)
            .select(Todo::as_select())
            .first(conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Loads a todo together with its owner in a single query.
    pub async fn find_by_id_with_user(
        &self,
        conn: &mut AsyncPgConnection,
        todo_id: i64,
    ) -> AppResult<Option<(Todo, User)>> {
        todos::table
            .inner_join(users::table)
            .filter(todos::id.eq(todo_id))
            .select((Todo::as_select(), User::as_select()))
            .first(conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Page of todos joined with their owners, most recently modified first.
    ///
    /// # Returns
    /// Tuple of (rows, total matching count)
    pub async fn find_all(
        &self,
        conn: &mut AsyncPgConnection,
        filter: &TodoListFilter,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<(Todo, User)>, i64)> {
        let mut query = todos::table
            .inner_join(users::table)
            .select((Todo::as_select(), User::as_select()))
            .filter(todos::modified_at.between(
                filter.modified_from.to_diesel(),
                filter.modified_to.to_diesel(),
            ))
            .into_boxed();
        if let Some(weather) = &filter.weather {
            query = query.filter(todos::weather.eq(weather.clone()));
        }

        let rows = query
            .order((todos::modified_at.desc(), todos::id.desc()))
            .offset(offset)
            .limit(limit)
            .load(conn)
            .await
            .map_err(AppError::from)?;

        let total = filtered_todos(filter)
            .count()
            .get_result::<i64>(conn)
            .await
            .map_err(AppError::from)?;

        Ok((rows, total))
    }

    /// Title / manager-nickname / creation-date search, newest first.
    pub async fn search(
        &self,
        conn: &mut AsyncPgConnection,
        filter: &TodoSearchFilter,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<TodoSummary>, i64)> {
        let rows: Vec<(i64, String)> = searched_todos(filter)
            .select((todos::id, todos::title))
            .order((todos::created_at.desc(), todos::id.desc()))
            .offset(offset)
            .limit(limit)
            .load(conn)
            .await
            .map_err(AppError::from)?;

        let total = searched_todos(filter)
            .count()
            .get_result::<i64>(conn)
            .await
            .map_err(AppError::from)?;

        if rows.is_empty() {
            return Ok((Vec::new(), total));
        }

        let ids: Vec<i64> = rows.iter().map(|(id, _)| *id).collect();

        let manager_counts: HashMap<i64, i64> = managers::table
            .filter(managers::todo_id.eq_any(ids.clone()))
            .group_by(managers::todo_id)
            .select((managers::todo_id, diesel::dsl::count_star()))
            .load::<(i64, i64)>(conn)
            .await
            .map_err(AppError::from)?
            .into_iter()
            .collect();

        let comment_counts: HashMap<i64, i64> = comments::table
            .filter(comments::todo_id.eq_any(ids))
            .group_by(comments::todo_id)
            .select((comments::todo_id, diesel::dsl::count_star()))
            .load::<(i64, i64)>(conn)
            .await
            .map_err(AppError::from)?
            .into_iter()
            .collect();

        let summaries = rows
            .into_iter()
            .map(|(id, title)| TodoSummary {
                id,
                title,
                manager_count: manager_counts.get(&id).copied().unwrap_or(0),
                comment_count: comment_counts.get(&id).copied().unwrap_or(0),
            })
            .collect();

        Ok((summaries, total))
    }

    /// Deletes a todo. Managers and comments go with it through `ON DELETE CASCADE`.
    pub async fn delete(&self, conn: &mut AsyncPgConnection, todo_id: i64) -> AppResult<usize> {
        diesel::delete(todos::table.find(todo_id))
            .execute(conn)
            .await
            .map_err(AppError::from)
    }
}

fn filtered_todos(filter: &TodoListFilter) -> todos::BoxedQuery<'static, Pg> {
    let mut query = todos::table
        .filter(todos::modified_at.between(
            filter.modified_from.to_diesel(),
            filter.modified_to.to_diesel(),
        ))
        .into_boxed();
    if let Some(weather) = &filter.weather {
        query = query.filter(todos::weather.eq(weather.clone()));
    }
    query
}

fn searched_todos(filter: &TodoSearchFilter) -> todos::BoxedQuery<'static, Pg> {
    let mut query = todos::table
        .filter(todos::created_at.between(
            filter.created_from.to_diesel(),
            filter.created_to.to_diesel(),
        ))
        .into_boxed();
    if let Some(title) = &filter.title {
        query = query.filter(todos::title.ilike(contains_pattern(title)));
    }
    if let Some(nickname) = &filter.manager_nickname {
        let managed = managers::table
            .inner_join(users::table)
            .filter(users::nickname.ilike(contains_pattern(nickname)))
            .select(managers::todo_id);
        query = query.filter(todos::id.eq_any(managed));
    }
    query
}

/// `%term%` with LIKE metacharacters escaped.
fn contains_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}
