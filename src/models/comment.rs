use diesel::prelude::*;
use jiff_diesel::DateTime;

use super::{Todo, User};

#[derive(Debug, Queryable, Selectable, Identifiable, Associations, Clone)]
#[diesel(belongs_to(User))]
#[diesel(belongs_to(Todo))]
#[diesel(table_name = crate::schema::comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Comment {
    pub id: i64,
    pub contents: String,
    pub user_id: i64,
    pub todo_id: i64,
    pub created_at: DateTime,
    pub modified_at: DateTime,
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::comments)]
pub struct NewComment {
    pub contents: String,
    pub user_id: i64,
    pub todo_id: i64,
}
