//! Fixtures for tests that need a real PostgreSQL.
//!
//! Set `TODO_TEST_DATABASE_URL` to run them; without it they return early.
//! Rows are tagged with a random suffix so parallel tests never see each
//! other's data.

use diesel_async::scoped_futures::ScopedFutureExt;
use tokio::sync::OnceCell;

use crate::config::DatabaseConfig;
use crate::db::{establish_async_connection_pool, run_pending_migrations, transactional, AsyncDbPool};
use crate::models::{NewUser, User, UserRole};
use crate::repositories::Repositories;
use crate::utils::jwt::AuthUser;

pub const TEST_DATABASE_URL_ENV: &str = "TODO_TEST_DATABASE_URL";

static MIGRATED: OnceCell<()> = OnceCell::const_new();

/// A migrated pool, or `None` when no test database is configured.
pub async fn test_pool() -> Option<AsyncDbPool> {
    let url = std::env::var(TEST_DATABASE_URL_ENV).ok()?;

    MIGRATED
        .get_or_init(|| async {
            run_pending_migrations(&url)
                .await
                .expect("test database migrations should apply");
        })
        .await;

    let config = DatabaseConfig {
        url,
        max_connections: 4,
        min_connections: 0,
        ..Default::default()
    };
    Some(
        establish_async_connection_pool(&config)
            .await
            .expect("test database should accept connections"),
    )
}

pub fn unique_tag() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..12].to_string()
}

/// Inserts a `ROLE_USER` account and returns it with its session value.
pub async fn create_user(pool: &AsyncDbPool, tag: &str) -> (User, AuthUser) {
    let new_user = NewUser {
        email: format!("{tag}@example.com"),
        password: "not-a-real-hash".to_string(),
        user_role: UserRole::User,
        nickname: format!("nick-{tag}"),
    };
    let repos = Repositories::new();
    let user = transactional(pool, |conn| {
        async move { repos.users.create(conn, &new_user).await }.scope_boxed()
    })
    .await
    .expect("test user should insert");

    let auth = AuthUser::new(user.id, user.email.clone(), user.nickname.clone(), user.user_role);
    (user, auth)
}
