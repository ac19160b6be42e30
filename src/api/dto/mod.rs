//! Data Transfer Objects for API requests and responses.
//!
//! JSON field names are camelCase.

mod auth;
mod comment;
mod error;
mod health;
mod manager;
mod pagination;
mod todo;
mod user;

pub use auth::{SigninRequest, SignupRequest, TokenResponse};
pub use comment::{CommentResponse, CommentSaveRequest};
pub use error::{status_name, ErrorResponse};
pub use health::{ComponentHealth, HealthResponse, HealthStatus};
pub use manager::{ManagerResponse, ManagerSaveRequest};
pub use pagination::PagedResponse;
pub use todo::{
    TodoListQuery, TodoResponse, TodoSaveRequest, TodoSaveResponse, TodoSearchQuery,
    TodoSearchResponse,
};
pub use user::{
    ChangeNicknameRequest, ChangePasswordRequest, UserResponse, UserRoleChangeRequest,
    UserRoleResponse,
};
