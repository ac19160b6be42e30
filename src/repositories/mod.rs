//! Repository layer for data access operations.
//!
//! Repositories are stateless and borrow a connection per call, so a service
//! can run several of them inside one transaction.

mod comment_repo;
mod manager_repo;
mod todo_repo;
mod user_repo;

pub use comment_repo::CommentRepository;
pub use manager_repo::ManagerRepository;
pub use todo_repo::{TodoListFilter, TodoRepository, TodoSearchFilter, TodoSummary};
pub use user_repo::UserRepository;

/// Aggregates all repositories for convenient access.
#[derive(Debug, Clone, Copy, Default)]
pub struct Repositories {
    pub users: UserRepository,
    pub todos: TodoRepository,
    pub managers: ManagerRepository,
    pub comments: CommentRepository,
}

impl Repositories {
    pub fn new() -> Self {
        Self::default()
    }
}
