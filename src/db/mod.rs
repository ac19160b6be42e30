//! Database access: connection pool, transaction scopes and embedded
//! migrations.

pub mod migrate;
mod pool;
pub mod transaction;

#[cfg(test)]
pub(crate) mod test_support;

use diesel_migrations::{EmbeddedMigrations, embed_migrations};

pub use migrate::{pending_migrations, revert_migrations, run_pending_migrations};
pub use pool::{AsyncDbPool, establish_async_connection_pool, lazy_connection_pool};
pub use transaction::{read_only, transactional};

/// SQL migrations compiled into the binary from `migrations/`.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");
