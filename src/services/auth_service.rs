//! Signup and signin. Both answer with a `Bearer` access token.

use diesel_async::scoped_futures::ScopedFutureExt;

use crate::db::{read_only, transactional, AsyncDbPool};
use crate::error::{AppError, AppResult};
use crate::models::{NewUser, UserRole};
use crate::repositories::Repositories;
use crate::utils::jwt::JwtService;
use crate::utils::password::{hash_password, verify_password};

#[derive(Clone)]
pub struct AuthService {
    pool: AsyncDbPool,
    repos: Repositories,
    jwt: JwtService,
}

impl AuthService {
    pub fn new(pool: AsyncDbPool, repos: Repositories, jwt: JwtService) -> Self {
        Self { pool, repos, jwt }
    }

    /// Registers a user and returns a token for it.
    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        user_role: &str,
        nickname: &str,
    ) -> AppResult<String> {
        let role = user_role
            .parse::<UserRole>()
            .map_err(|_| AppError::bad_request("Invalid user role"))?;

        let new_user = NewUser {
            email: email.trim().to_string(),
            password: hash_password(password)?,
            user_role: role,
            nickname: nickname.trim().to_string(),
        };

        let repos = self.repos;
        let user = transactional(&self.pool, |conn| {
            async move {
                if repos.users.exists_by_email(conn, &new_user.email).await? {
                    return Err(AppError::bad_request("Email already exists"));
                }
                repos.users.create(conn, &new_user).await
            }
            .scope_boxed()
        })
        .await?;

        tracing::info!(user_id = user.id, role = %user.user_role, "User registered");
        self.jwt.create_token(&user)
    }

    pub async fn signin(&self, email: &str, password: &str) -> AppResult<String> {
        let repos = self.repos;
        let email = email.trim().to_string();
        let user = read_only(&self.pool, |conn| {
            async move {
                repos
                    .users
                    .find_by_email(conn, &email)
                    .await?
                    .ok_or_else(|| AppError::bad_request("User not registered"))
            }
            .scope_boxed()
        })
        .await?;

        if !verify_password(password, &user.password)? {
            tracing::warn!(user_id = user.id, "Signin with wrong password");
            return Err(AppError::unauthorized("Wrong password"));
        }

        self.jwt.create_token(&user)
    }
}
