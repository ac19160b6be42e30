use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::error::{AppError, AppResult};
use crate::models::{Comment, NewComment, User};
use crate::schema::{comments, users};

#[derive(Debug, Clone, Copy, Default)]
pub struct CommentRepository;

impl CommentRepository {
    pub async fn create(&self, conn: &mut AsyncPgConnection, new_comment: &NewComment) -> AppResult<Comment> {
        diesel::insert_into(comments::table)
            .values(new_comment)
            .returning(Comment::as_returning())
            .get_result(conn)
            .await
            .map_err(AppError::from)
    }

    /// Comments on a todo joined with their authors, in insertion order.
    pub async fn find_by_todo_id_with_user(
        &self,
        conn: &mut AsyncPgConnection,
        todo_id: i64,
    ) -> AppResult<Vec<(Comment, User)>> {
        comments::table
            .inner_join(users::table)
            .filter(comments::todo_id.eq(todo_id))
            .order(comments::id.asc())
            .select((Comment::as_select(), User::as_select()))
            .load(conn)
            .await
            .map_err(AppError::from)
    }
}
