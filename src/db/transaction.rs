//! Transaction scopes for service methods.
//!
//! Every service call runs its repository work inside exactly one of these.
//! diesel-async commits when the closure returns `Ok` and rolls back when it
//! returns `Err` or the future is dropped mid-flight.

use diesel_async::scoped_futures::ScopedBoxFuture;
use diesel_async::{AsyncConnection, AsyncPgConnection};

use crate::db::AsyncDbPool;
use crate::error::AppResult;

/// Runs `f` in a read-write transaction.
pub async fn transactional<'a, T, F>(pool: &AsyncDbPool, f: F) -> AppResult<T>
where
    F: for<'r> FnOnce(&'r mut AsyncPgConnection) -> ScopedBoxFuture<'a, 'r, AppResult<T>>
        + Send
        + 'a,
    T: Send + 'a,
{
    let mut pooled = pool.get().await?;
    let conn: &mut AsyncPgConnection = &mut pooled;
    conn.transaction(f).await
}

/// Runs `f` in a `READ ONLY` transaction. PostgreSQL rejects any write issued
/// inside it, and the failed statement rolls the whole scope back.
pub async fn read_only<'a, T, F>(pool: &AsyncDbPool, f: F) -> AppResult<T>
where
    F: for<'r> FnOnce(&'r mut AsyncPgConnection) -> ScopedBoxFuture<'a, 'r, AppResult<T>>
        + Send
        + 'a,
    T: Send + 'a,
{
    let mut pooled = pool.get().await?;
    let conn: &mut AsyncPgConnection = &mut pooled;
    conn.build_transaction()
        .read_only()
        .run(f)
        .await
}

#[cfg(test)]
mod tests {
    use diesel_async::scoped_futures::ScopedFutureExt;

    use super::*;
    use crate::db::test_support::{create_user, test_pool, unique_tag};
    use crate::error::AppError;
    use crate::models::{NewUser, UserRole};
    use crate::repositories::Repositories;

    fn new_user(tag: &str) -> NewUser {
        NewUser {
            email: format!("{tag}@example.com"),
            password: "hash".to_string(),
            user_role: UserRole::User,
            nickname: tag.to_string(),
        }
    }

    #[tokio::test]
    async fn test_read_only_rejects_writes() {
        let Some(pool) = test_pool().await else { return };
        let repos = Repositories::new();
        let tag = unique_tag();
        let user = new_user(&tag);

        let result = read_only(&pool, |conn| {
            async move { repos.users.create(conn, &user).await }.scope_boxed()
        })
        .await;
        assert!(result.is_err());

        let email = format!("{tag}@example.com");
        let exists = read_only(&pool, |conn| {
            async move { repos.users.exists_by_email(conn, &email).await }.scope_boxed()
        })
        .await
        .unwrap();
        assert!(!exists);
    }

    #[tokio::test]
    async fn test_error_rolls_back_earlier_writes() {
        let Some(pool) = test_pool().await else { return };
        let repos = Repositories::new();
        let tag = unique_tag();
        let user = new_user(&tag);

        let result: AppResult<()> = transactional(&pool, |conn| {
            async move {
                repos.users.create(conn, &user).await?;
                Err(AppError::bad_request("abort"))
            }
            .scope_boxed()
        })
        .await;
        assert!(matches!(result, Err(AppError::BadRequest { .. })));

        let email = format!("{tag}@example.com");
        let exists = read_only(&pool, |conn| {
            async move { repos.users.exists_by_email(conn, &email).await }.scope_boxed()
        })
        .await
        .unwrap();
        assert!(!exists);
    }

    #[tokio::test]
    async fn test_committed_write_is_visible() {
        let Some(pool) = test_pool().await else { return };
        let (user, _) = create_user(&pool, &unique_tag()).await;

        let repos = Repositories::new();
        let user_id = user.id;
        let found = read_only(&pool, |conn| {
            async move { repos.users.find_by_id(conn, user_id).await }.scope_boxed()
        })
        .await
        .unwrap();
        assert_eq!(found.map(|u| u.email), Some(user.email));
    }
}
