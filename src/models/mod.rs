mod comment;
mod manager;
mod todo;
mod user;

pub use comment::{Comment, NewComment};
pub use manager::{Manager, NewManager};
pub use todo::{NewTodo, Todo};
pub use user::{NewUser, User, UserProfile, UserRole};
