//! User service: profile lookup and the three self/admin mutations.

use diesel_async::scoped_futures::ScopedFutureExt;

use crate::db::{read_only, transactional, AsyncDbPool};
use crate::error::{AppError, AppResult};
use crate::models::{User, UserRole};
use crate::repositories::Repositories;
use crate::utils::jwt::AuthUser;
use crate::utils::password::{hash_password, is_strong_password, verify_password};

#[derive(Clone)]
pub struct UserService {
    pool: AsyncDbPool,
    repos: Repositories,
}

impl UserService {
    pub fn new(pool: AsyncDbPool, repos: Repositories) -> Self {
        Self { pool, repos }
    }

    /// Gets a user by id, or `User not found`.
    pub async fn get_user(&self, user_id: i64) -> AppResult<User> {
        let repos = self.repos;
        read_only(&self.pool, |conn| {
            async move {
                repos
                    .users
                    .find_by_id(conn, user_id)
                    .await?
                    .ok_or_else(|| AppError::not_found("User"))
            }
            .scope_boxed()
        })
        .await
    }

    /// Replaces the caller's password after checking the old one.
    pub async fn change_password(
        &self,
        auth_user: &AuthUser,
        old_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        if !is_strong_password(new_password) {
            return Err(AppError::bad_request(
                "New password must be at least 8 characters and contain a digit and an uppercase letter",
            ));
        }

        let repos = self.repos;
        let user_id = auth_user.id;
        transactional(&self.pool, |conn| {
            async move {
                let mut user = repos
                    .users
                    .find_by_id(conn, user_id)
                    .await?
                    .ok_or_else(|| AppError::not_found("User"))?;

                if verify_password(new_password, &user.password)? {
                    return Err(AppError::bad_request(
                        "New password must differ from the current password",
                    ));
                }
                if !verify_password(old_password, &user.password)? {
                    return Err(AppError::bad_request("Wrong password"));
                }

                user.change_password(hash_password(new_password)?);
                repos.users.save(conn, &user).await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await?;

        tracing::info!(user_id, "Password changed");
        Ok(())
    }

    pub async fn change_nickname(&self, auth_user: &AuthUser, nickname: &str) -> AppResult<User> {
        let repos = self.repos;
        let user_id = auth_user.id;
        let nickname = nickname.trim().to_string();
        transactional(&self.pool, |conn| {
            async move {
                let mut user = repos
                    .users
                    .find_by_id(conn, user_id)
                    .await?
                    .ok_or_else(|| AppError::not_found("User"))?;

                user.change_nickname(nickname);
                repos.users.save(conn, &user).await
            }
            .scope_boxed()
        })
        .await
    }

    /// Admin operation: assigns `role` (`USER`, `ROLE_ADMIN`, ...) to a user.
    pub async fn update_role(&self, user_id: i64, role: &str) -> AppResult<User> {
        let role = role
            .parse::<UserRole>()
            .map_err(|_| AppError::bad_request("Invalid user role"))?;

        let repos = self.repos;
        let user = transactional(&self.pool, |conn| {
            async move {
                let mut user = repos
                    .users
                    .find_by_id(conn, user_id)
                    .await?
                    .ok_or_else(|| AppError::not_found("User"))?;

                user.update_role(role);
                repos.users.save(conn, &user).await
            }
            .scope_boxed()
        })
        .await?;

        tracing::info!(user_id, role = %role, "User role updated");
        Ok(user)
    }
}
