use diesel::prelude::*;
use jiff_diesel::DateTime;

use super::{NewManager, User};

/// Todo row. `user_id` is the owner and never changes after insert.
#[derive(Debug, Queryable, Selectable, Identifiable, Associations, Clone)]
#[diesel(belongs_to(User))]
#[diesel(table_name = crate::schema::todos)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub contents: String,
    pub weather: String,
    pub user_id: i64,
    pub created_at: DateTime,
    pub modified_at: DateTime,
}

impl Todo {
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user_id == user_id
    }
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::todos)]
pub struct NewTodo {
    pub title: String,
    pub contents: String,
    pub weather: String,
    pub user_id: i64,
}

impl NewTodo {
    pub fn new(title: String, contents: String, weather: String, owner_id: i64) -> Self {
        Self {
            title,
            contents,
            weather,
            user_id: owner_id,
        }
    }

    /// The owner's own manager row, written in the same transaction as the todo.
    pub fn owner_manager(&self, todo_id: i64) -> NewManager {
        NewManager {
            user_id: self.user_id,
            todo_id,
        }
    }
}
