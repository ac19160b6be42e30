use diesel::AsExpression;
use diesel::FromSqlRow;
use diesel::deserialize::{self, FromSql};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::serialize::{self, Output, ToSql};
use diesel::sql_types::Text;
use jiff_diesel::DateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use std::str::FromStr;

use crate::error::{AppError, AppResult};
use crate::utils::jwt::AuthUser;

/// Role of a user, stored as its authority string (`ROLE_USER` / `ROLE_ADMIN`).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    utoipa::ToSchema,
    AsExpression,
    FromSqlRow,
)]
#[diesel(sql_type = Text)]
pub enum UserRole {
    #[serde(rename = "ROLE_USER")]
    User,
    #[serde(rename = "ROLE_ADMIN")]
    Admin,
}

impl UserRole {
    pub fn authority(&self) -> &'static str {
        match self {
            UserRole::User => "ROLE_USER",
            UserRole::Admin => "ROLE_ADMIN",
        }
    }

    /// Exact inverse of [`UserRole::authority`].
    pub fn from_authority(authority: &str) -> Option<Self> {
        [UserRole::User, UserRole::Admin]
            .into_iter()
            .find(|role| role.authority() == authority)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.authority())
    }
}

/// Parses `ROLE_USER`, `USER`, `role_admin`, ... into a role.
/// Unknown strings yield `()`; callers pick the error that fits their layer.
impl FromStr for UserRole {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        match upper.strip_prefix("ROLE_").unwrap_or(&upper) {
            "USER" => Ok(UserRole::User),
            "ADMIN" => Ok(UserRole::Admin),
            _ => Err(()),
        }
    }
}

impl diesel::query_builder::QueryId for UserRole {
    type QueryId = UserRole;
    const HAS_STATIC_QUERY_ID: bool = false;
}

impl ToSql<Text, Pg> for UserRole {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.authority().as_bytes())?;
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<Text, Pg> for UserRole {
    fn from_sql(
        bytes: <Pg as diesel::backend::Backend>::RawValue<'_>,
    ) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
        s.parse()
            .map_err(|_| format!("Unrecognized user_role: {}", s).into())
    }
}

/// User row as stored in the database.
#[derive(Debug, Queryable, Selectable, Identifiable, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password: String,
    pub user_role: UserRole,
    pub nickname: String,
    pub created_at: DateTime,
    pub modified_at: DateTime,
}

impl User {
    /// Replaces the stored password hash. The caller hashes the password first.
    pub fn change_password(&mut self, password_hash: String) {
        self.password = password_hash;
    }

    pub fn update_role(&mut self, role: UserRole) {
        self.user_role = role;
    }

    pub fn change_nickname(&mut self, nickname: String) {
        self.nickname = nickname;
    }
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub user_role: UserRole,
    pub nickname: String,
}

/// Detached user projection rebuilt from an authenticated session, without
/// touching the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub nickname: String,
    pub role: UserRole,
}

impl UserProfile {
    /// Builds the projection from the session value. The first authority must
    /// name a known role; anything else means the token issuer and the role
    /// set disagree, which is a server-side configuration fault.
    pub fn from_auth_user(auth_user: &AuthUser) -> AppResult<Self> {
        let authority = auth_user.authorities.first().cloned().unwrap_or_default();
        let role = UserRole::from_authority(&authority).ok_or_else(|| AppError::InvalidRole {
            authority: authority.clone(),
        })?;

        Ok(Self {
            id: auth_user.id,
            email: auth_user.email.clone(),
            nickname: auth_user.nickname.clone(),
            role,
        })
    }
}
