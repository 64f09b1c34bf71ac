use std::net::SocketAddr;

use sea_orm_migration::MigratorTrait;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tecnorte_storefront::{
    config::AppConfig, migration::Migrator, routes::build_app, state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tecnorte_storefront=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    tokio::fs::create_dir_all(&config.receipts_dir).await?;
    tracing::info!(
        data_dir = %config.data_dir.display(),
        receipts_dir = %config.receipts_dir.display(),
        "storage ready"
    );

    let state = AppState::connect(config.clone()).await?;

    if config.run_migrations_on_start {
        Migrator::up(&state.orm, None).await?;
    } else {
        let pending = Migrator::get_pending_migrations(&state.orm).await?;
        if !pending.is_empty() {
            tracing::warn!(
                pending = pending.len(),
                "database has pending migrations; run the `migrate` binary"
            );
        }
    }

    let app = build_app(state);

    let addr = SocketAddr::from((config.host.parse::<std::net::IpAddr>()?, config.port));
    tracing::info!("listening on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;

    Ok(())
}
