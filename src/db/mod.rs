use std::str::FromStr;

use sqlx::{
    migrate::MigrateError,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use thiserror::Error;

pub mod queries;

/// Errors raised by write operations on the word list store
#[derive(Debug, Error)]
pub enum StoreError {
    /// A word list with this name already exists. Re-importing under the same
    /// name is a user error and is never retried.
    #[error("A wordlist with the same name already exists: {0}")]
    DuplicateName(String),

    #[error("Wordlist name is longer than {max} characters: {length}")]
    NameTooLong { length: usize, max: usize },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] MigrateError),
}

pub async fn create_pool(database_url: &str, max_connections: u32) -> sqlx::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), StoreError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// In-memory database with the schema applied, for tests
#[cfg(test)]
pub async fn test_pool() -> SqlitePool {
    let pool = create_pool("sqlite::memory:", 1)
        .await
        .expect("in-memory pool should open");
    run_migrations(&pool)
        .await
        .expect("migrations should apply to an empty database");
    pool
}
