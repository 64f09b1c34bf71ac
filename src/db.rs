use std::str::FromStr;

use anyhow::Result;
use sea_orm::{DatabaseConnection, SqlxSqliteConnector};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

pub type DbPool = SqlitePool;
pub type OrmConn = DatabaseConnection;

/// Open the SQLite pool, creating the database file (and its directory) when missing.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");
    let pool = if in_memory {
        // Each new connection to an in-memory database sees a fresh, empty
        // schema, so keep exactly one connection alive for the pool's lifetime.
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?
    } else {
        if let Some(parent) = options.get_filename().parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options.journal_mode(SqliteJournalMode::Wal))
            .await?
    };

    Ok(pool)
}

/// Wrap the sqlx pool in a SeaORM connection sharing the same connections.
pub fn create_orm_conn(pool: DbPool) -> OrmConn {
    SqlxSqliteConnector::from_sqlx_sqlite_pool(pool)
}

pub async fn ping(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
