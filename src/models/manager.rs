use diesel::prelude::*;
use jiff_diesel::DateTime;

use super::{Todo, User};

/// Grants a user management rights over a todo. Rows go away with their todo.
#[derive(Debug, Queryable, Selectable, Identifiable, Associations, Clone)]
#[diesel(belongs_to(User))]
#[diesel(belongs_to(Todo))]
#[diesel(table_name = crate::schema::managers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Manager {
    pub id: i64,
    pub user_id: i64,
    pub todo_id: i64,
    pub created_at: DateTime,
    pub modified_at: DateTime,
}

#[derive(Debug, Insertable, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::managers)]
pub struct NewManager {
    pub user_id: i64,
    pub todo_id: i64,
}
