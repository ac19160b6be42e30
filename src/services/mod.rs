//! Service layer for business logic operations.
//!
//! Services own the transaction scope of each operation and coordinate the
//! stateless repositories inside it.

mod auth_service;
mod comment_service;
mod manager_service;
mod todo_service;
mod user_service;

pub use auth_service::AuthService;
pub use comment_service::CommentService;
pub use manager_service::ManagerService;
pub use todo_service::{Page, PageRequest, TodoListParams, TodoSearchParams, TodoService};
pub use user_service::UserService;

use std::sync::Arc;

use crate::db::AsyncDbPool;
use crate::external::WeatherProvider;
use crate::repositories::Repositories;
use crate::utils::jwt::JwtService;

/// Aggregates all services for convenient access.
///
/// Cloning is cheap: the pool and the weather provider are reference counted.
#[derive(Clone)]
pub struct Services {
    pub auth: AuthService,
    pub users: UserService,
    pub todos: TodoService,
    pub comments: CommentService,
    pub managers: ManagerService,
}

impl Services {
    /// Wires every service from its explicit collaborators.
    pub fn new(pool: AsyncDbPool, jwt: JwtService, weather: Arc<dyn WeatherProvider>) -> Self {
        let repos = Repositories::new();
        Self {
            auth: AuthService::new(pool.clone(), repos, jwt),
            users: UserService::new(pool.clone(), repos),
            todos: TodoService::new(pool.clone(), repos, weather),
            comments: CommentService::new(pool.clone(), repos),
            managers: ManagerService::new(pool, repos),
        }
    }
}
