//! Todo DTOs.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::pagination::{default_page, default_page_size};
use super::user::UserResponse;
use crate::models::{Todo, User, UserProfile};
use crate::repositories::TodoSummary;
use crate::services::{PageRequest, TodoListParams, TodoSearchParams};

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct TodoSaveRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    #[schema(min_length = 1, max_length = 255, example = "Buy groceries")]
    pub title: String,
    #[validate(length(min = 1, message = "Contents are required"))]
    pub contents: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TodoSaveResponse {
    pub id: i64,
    pub title: String,
    pub contents: String,
    #[schema(example = "Sunny")]
    pub weather: String,
    pub user: UserResponse,
}

impl From<(Todo, UserProfile)> for TodoSaveResponse {
    fn from((todo, owner): (Todo, UserProfile)) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            contents: todo.contents,
            weather: todo.weather,
            user: owner.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TodoResponse {
    pub id: i64,
    pub title: String,
    pub contents: String,
    pub weather: String,
    pub user: UserResponse,
    #[schema(value_type = String, format = DateTime, example = "2025-01-05T09:30:00")]
    pub created_at: String,
    #[schema(value_type = String, format = DateTime, example = "2025-01-05T09:30:00")]
    pub modified_at: String,
}

impl From<(Todo, User)> for TodoResponse {
    fn from((todo, user): (Todo, User)) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            contents: todo.contents,
            weather: todo.weather,
            user: user.into(),
            created_at: todo.created_at.to_jiff().to_string(),
            modified_at: todo.modified_at.to_jiff().to_string(),
        }
    }
}

/// `GET /todos` query. Dates are `yyyyMMdd`; empty values count as absent.
#[derive(Debug, Deserialize, IntoParams, Validate)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct TodoListQuery {
    /// Page number (1-based)
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "Page must be at least 1"))]
    #[param(minimum = 1, example = 1)]
    pub page: i64,
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100, message = "Size must be between 1 and 100"))]
    #[param(minimum = 1, maximum = 100, example = 10)]
    pub size: i64,
    /// Exact, case-sensitive weather match. An empty value (`?weather=`)
    /// is treated as absent and does not filter.
    #[param(example = "Sunny")]
    pub weather: Option<String>,
    /// Earliest modification date (inclusive)
    #[param(example = "20250101")]
    pub start_date: Option<String>,
    /// Latest modification date (inclusive)
    #[param(example = "20251231")]
    pub end_date: Option<String>,
}

impl TodoListQuery {
    pub fn into_parts(self) -> (PageRequest, TodoListParams) {
        (
            PageRequest::new(self.page, self.size),
            TodoListParams {
                weather: self.weather,
                start_date: self.start_date,
                end_date: self.end_date,
            },
        )
    }
}

/// `GET /todos/search` query.
#[derive(Debug, Deserialize, IntoParams, Validate)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct TodoSearchQuery {
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "Page must be at least 1"))]
    #[param(minimum = 1, example = 1)]
    pub page: i64,
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100, message = "Size must be between 1 and 100"))]
    #[param(minimum = 1, maximum = 100, example = 10)]
    pub size: i64,
    /// Case-insensitive substring of the title
    pub title: Option<String>,
    /// Case-insensitive substring of any manager's nickname
    pub nickname: Option<String>,
    /// Earliest creation date (inclusive), `yyyyMMdd`
    pub start_date: Option<String>,
    /// Latest creation date (inclusive), `yyyyMMdd`
    pub end_date: Option<String>,
}

impl TodoSearchQuery {
    pub fn into_parts(self) -> (PageRequest, TodoSearchParams) {
        (
            PageRequest::new(self.page, self.size),
            TodoSearchParams {
                title: self.title,
                nickname: self.nickname,
                start_date: self.start_date,
                end_date: self.end_date,
            },
        )
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TodoSearchResponse {
    pub id: i64,
    pub title: String,
    pub manager_count: i64,
    pub comment_count: i64,
}

impl From<TodoSummary> for TodoSearchResponse {
    fn from(summary: TodoSummary) -> Self {
        Self {
            id: summary.id,
            title: summary.title,
            manager_count: summary.manager_count,
            comment_count: summary.comment_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRole;
    use jiff_diesel::ToDiesel;

    #[test]
    fn test_todo_response_shape() {
        let at = jiff::civil::date(2025, 1, 5).at(9, 30, 0, 0).to_diesel();
        let todo = Todo {
            id: 3,
            title: "t".to_string(),
            contents: "c".to_string(),
            weather: "Sunny".to_string(),
            user_id: 1,
            created_at: at,
            modified_at: at,
        };
        let user = User {
            id: 1,
            email: "a@example.com".to_string(),
            password: "secret-hash".to_string(),
            user_role: UserRole::User,
            nickname: "a".to_string(),
            created_at: at,
            modified_at: at,
        };

        let json = serde_json::to_value(TodoResponse::from((todo, user))).unwrap();
        assert_eq!(json["user"], serde_json::json!({"id": 1, "email": "a@example.com", "nickname": "a"}));
        assert_eq!(json["createdAt"], "2025-01-05T09:30:00");
        assert_eq!(json["modifiedAt"], "2025-01-05T09:30:00");
        assert!(!json.to_string().contains("secret-hash"));
    }

    #[test]
    fn test_list_query_defaults() {
        let query: TodoListQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.size, 10);

        let (page, params) = query.into_parts();
        assert_eq!(page.offset(), 0);
        assert!(params.weather.is_none());
    }
}
