#![allow(dead_code)]

use sea_orm::{ConnectionTrait, Statement};
use sea_orm_migration::MigratorTrait;
use tecnorte_storefront::{
    config::AppConfig, db::create_pool, migration::Migrator, state::AppState,
};
use tempfile::TempDir;

pub const MEMORY_DB: &str = "sqlite::memory:";

/// Fresh migrated in-memory database with receipts under a temp directory.
/// Keep the returned `TempDir` alive for the duration of the test.
pub async fn setup_state() -> anyhow::Result<(AppState, TempDir)> {
    setup_state_with(|_| {}).await
}

pub async fn setup_state_with(
    customize: impl FnOnce(&mut AppConfig),
) -> anyhow::Result<(AppState, TempDir)> {
    build_state(&[], customize).await
}

/// Like [`setup_state`], but `existing_schema` runs first, the way tables
/// created by an earlier deployment would already be present.
pub async fn setup_state_over(existing_schema: &[&str]) -> anyhow::Result<(AppState, TempDir)> {
    build_state(existing_schema, |_| {}).await
}

async fn build_state(
    existing_schema: &[&str],
    customize: impl FnOnce(&mut AppConfig),
) -> anyhow::Result<(AppState, TempDir)> {
    let dir = tempfile::tempdir()?;
    let mut config = AppConfig::with_data_dir(dir.path(), MEMORY_DB);
    customize(&mut config);

    let pool = create_pool(&config.database_url, config.database_max_connections).await?;
    let state = AppState::new(pool, config);

    let backend = state.orm.get_database_backend();
    for sql in existing_schema {
        state
            .orm
            .execute(Statement::from_string(backend, sql.to_string()))
            .await?;
    }
    Migrator::up(&state.orm, None).await?;

    Ok((state, dir))
}
