use diesel_async::scoped_futures::ScopedFutureExt;

use crate::db::{read_only, transactional, AsyncDbPool};
use crate::error::{AppError, AppResult};
use crate::models::{Comment, NewComment, User, UserProfile};
use crate::repositories::Repositories;
use crate::utils::jwt::AuthUser;

#[derive(Clone)]
pub struct CommentService {
    pool: AsyncDbPool,
    repos: Repositories,
}

impl CommentService {
    pub fn new(pool: AsyncDbPool, repos: Repositories) -> Self {
        Self { pool, repos }
    }

    /// Adds a comment by the caller to an existing todo.
    pub async fn save_comment(
        &self,
        auth_user: &AuthUser,
        todo_id: i64,
        contents: &str,
    ) -> AppResult<(Comment, UserProfile)> {
        let author = UserProfile::from_auth_user(auth_user)?;
        let new_comment = NewComment {
            contents: contents.to_string(),
            user_id: author.id,
            todo_id,
        };

        let repos = self.repos;
        let comment = transactional(&self.pool, |conn| {
            async move {
                repos
                    .todos
                    .find_by_id(conn, todo_id)
                    .await?
                    .ok_or_else(|| AppError::not_found("Todo"))?;
                repos.comments.create(conn, &new_comment).await
            }
            .scope_boxed()
        })
        .await?;

        Ok((comment, author))
    }

    pub async fn get_comments(&self, todo_id: i64) -> AppResult<Vec<(Comment, User)>> {
        let repos = self.repos;
        read_only(&self.pool, |conn| {
            async move { repos.comments.find_by_todo_id_with_user(conn, todo_id).await }
                .scope_boxed()
        })
        .await
    }
}
