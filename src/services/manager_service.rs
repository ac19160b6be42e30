//! Manager service: the todo owner grants and revokes management rights.

use diesel_async::scoped_futures::ScopedFutureExt;

use crate::db::{read_only, transactional, AsyncDbPool};
use crate::error::{AppError, AppResult};
use crate::models::{Manager, NewManager, User};
use crate::repositories::Repositories;
use crate::utils::jwt::AuthUser;

#[derive(Clone)]
pub struct ManagerService {
    pool: AsyncDbPool,
    repos: Repositories,
}

impl ManagerService {
    pub fn new(pool: AsyncDbPool, repos: Repositories) -> Self {
        Self { pool, repos }
    }

    /// Registers `manager_user_id` on a todo owned by the caller.
    pub async fn save_manager(
        &self,
        auth_user: &AuthUser,
        todo_id: i64,
        manager_user_id: i64,
    ) -> AppResult<(Manager, User)> {
        let repos = self.repos;
        let owner_id = auth_user.id;
        let (manager, user) = transactional(&self.pool, |conn| {
            async move {
                let todo = repos
                    .todos
                    .find_by_id(conn, todo_id)
                    .await?
                    .ok_or_else(|| AppError::not_found("Todo"))?;
                if !todo.is_owned_by(owner_id) {
                    return Err(AppError::forbidden(
                        "Only the todo owner can register managers",
                    ));
                }

                let manager_user = repos
                    .users
                    .find_by_id(conn, manager_user_id)
                    .await?
                    .ok_or_else(|| AppError::not_found("Manager user"))?;
                if manager_user.id == owner_id {
                    return Err(AppError::bad_request(
                        "The todo owner is already a manager",
                    ));
                }

                let manager = repos
                    .managers
                    .create(
                        conn,
                        &NewManager {
                            user_id: manager_user.id,
                            todo_id,
                        },
                    )
                    .await?;
                Ok((manager, manager_user))
            }
            .scope_boxed()
        })
        .await?;

        tracing::info!(todo_id, manager_id = manager.id, user_id = user.id, "Manager registered");
        Ok((manager, user))
    }

    /// Managers of an existing todo with their users.
    pub async fn get_managers(&self, todo_id: i64) -> AppResult<Vec<(Manager, User)>> {
        let repos = self.repos;
        read_only(&self.pool, |conn| {
            async move {
                repos
                    .todos
                    .find_by_id(conn, todo_id)
                    .await?
                    .ok_or_else(|| AppError::not_found("Todo"))?;
                repos.managers.find_by_todo_id_with_user(conn, todo_id).await
            }
            .scope_boxed()
        })
        .await
    }

    pub async fn delete_manager(
        &self,
        auth_user: &AuthUser,
        todo_id: i64,
        manager_id: i64,
    ) -> AppResult<()> {
        let repos = self.repos;
        let owner_id = auth_user.id;
        transactional(&self.pool, |conn| {
            async move {
                let todo = repos
                    .todos
                    .find_by_id(conn, todo_id)
                    .await?
                    .ok_or_else(|| AppError::not_found("Todo"))?;
                if !todo.is_owned_by(owner_id) {
                    return Err(AppError::forbidden("Only the todo owner can remove managers"));
                }

                let manager = repos
                    .managers
                    .find_by_id(conn, manager_id)
                    .await?
                    .ok_or_else(|| AppError::not_found("Manager"))?;
                if manager.todo_id != todo.id {
                    return Err(AppError::bad_request(
                        "Manager is not assigned to this todo",
                    ));
                }

                repos.managers.delete(conn, manager_id).await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await?;

        tracing::info!(todo_id, manager_id, "Manager removed");
        Ok(())
    }
}
