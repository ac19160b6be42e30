//! User repository.
//!
//! Every method borrows a connection so callers decide the transaction scope.

use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::error::{AppError, AppResult};
use crate::models::{NewUser, User};

/// Stateless; copies are free.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserRepository;

impl UserRepository {
    /// Inserts a user and returns the stored row.
    pub async fn create(&self, conn: &mut AsyncPgConnection, new_user: &NewUser) -> AppResult<User> {
        use crate::schema::users::dsl::*;

        diesel::insert_into(users)
            .values(new_user)
            .returning(User::as_returning())
            .get_result(conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn find_by_id(&self, conn: &mut AsyncPgConnection, user_id: i64) -> AppResult<Option<User>> {
        use crate::schema::users::dsl::*;

        users
            .find(user_id)
            .select(User::as_select())
            .first(conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    pub async fn find_by_email(
        &self,
        conn: &mut AsyncPgConnection,
        user_email: &str,
    ) -> AppResult<Option<User>> {
        use crate::schema::users::dsl::*;

        users
            .filter(email.eq(user_email))
            .select(User::as_select())
            .first(conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    pub async fn exists_by_email(&self, conn: &mut AsyncPgConnection, user_email: &str) -> AppResult<bool> {
        use crate::schema::users::dsl::*;

        diesel::select(diesel::dsl::exists(users.filter(email.eq(user_email))))
            .get_result(conn)
            .await
            .map_err(AppError::from)
    }

    /// Writes back the mutable fields of `user` (password, role, nickname)
    /// and bumps `modified_at`.
    pub async fn save(&self, conn: &mut AsyncPgConnection, user: &User) -> AppResult<User> {
        use crate::schema::users::dsl::*;

        diesel::update(users.find(user.id))
            .set((
                password.eq(&user.password),
                user_role.eq(user.user_role),
                nickname.eq(&user.nickname),
                modified_at.eq(diesel::dsl::now),
            ))
            .returning(User::as_returning())
            .get_result(conn)
            .await
            .map_err(AppError::from)
    }
}
