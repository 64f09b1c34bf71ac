use sea_orm_migration::MigratorTrait;
use tecnorte_storefront::{config::AppConfig, db, migration::Migrator};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    let pool = db::create_pool(&config.database_url, config.database_max_connections).await?;
    let orm = db::create_orm_conn(pool);

    let pending = Migrator::get_pending_migrations(&orm).await?;
    if pending.is_empty() {
        println!("Database is up to date");
        return Ok(());
    }

    for migration in &pending {
        println!("Applying {}", migration.name());
    }
    Migrator::up(&orm, None).await?;
    println!("Migrations applied: {}", pending.len());
    Ok(())
}
