//! For interacting with the database.

use super::config::DatabaseConfig;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Sqlite, SqlitePool,
};
use std::str::FromStr;
#[cfg(test)]
use std::time::Duration;

/// The database backend.
pub type Db = Sqlite;

/// A common database pool type.
pub type DbPool = SqlitePool;

/// Statements creating the tables the application needs, if absent.
const SCHEMA: &str = include_str!("../../schema.sql");

/// Connects to the database based on some configuration.
///
/// Connections are opened lazily, so this does not touch the database.
pub fn init_db(config: &DatabaseConfig) -> Result<DbPool, sqlx::Error> {
    let db_options = SqliteConnectOptions::from_str(&config.url)?.create_if_missing(true);
    let db = SqlitePoolOptions::new()
        .acquire_timeout(config.acquire_timeout)
        .min_connections(1)
        .max_connections(config.max_connections)
        .connect_lazy_with(db_options);
    Ok(db)
}

/// Creates the tables if they do not exist yet.
#[tracing::instrument(skip(db))]
pub async fn init_schema(db: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(SCHEMA).execute(db).await?;
    tracing::info!("Database schema ready");
    Ok(())
}

/// An in-memory database with the schema applied.
///
/// The pool holds on to a single connection, since every
/// in-memory connection would otherwise see its own database.
#[cfg(test)]
pub(crate) async fn test_db() -> DbPool {
    let db = SqlitePoolOptions::new()
        .min_connections(1)
        .max_connections(1)
        .idle_timeout(None::<Duration>)
        .max_lifetime(None::<Duration>)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    init_schema(&db).await.unwrap();
    db
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn schema_can_be_applied_twice() {
        let db = test_db().await;
        init_schema(&db).await.unwrap();
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM todos")
            .fetch_one(&db)
            .await
            .unwrap();
        assert_eq!(0, count);
    }
}
