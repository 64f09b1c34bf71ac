use sea_orm::{EntityTrait, PaginatorTrait};
use sea_orm_migration::MigratorTrait;
use serde_json::json;
use tecnorte_storefront::{
    config::AppConfig, dto::products::ProductPayload, entity::Produtos, migration::Migrator,
    services::product_service, state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    let state = AppState::connect(config).await?;
    // Ensure migrations are applied.
    Migrator::up(&state.orm, None).await?;

    let existing = Produtos::find().count(&state.orm).await?;
    if existing > 0 {
        println!("Catalog already has {existing} products, nothing to seed");
        return Ok(());
    }

    for (nome, custo, margem, categoria) in [
        ("Camiseta", 40.0, 50.0, "diversos"),
        ("Mouse Gamer", 80.0, 62.5, "informatica"),
        ("Teclado Mecânico", 160.0, 56.25, "acessorios"),
    ] {
        let product = product_service::create_product(
            &state,
            ProductPayload {
                nome: Some(nome.to_string()),
                custo: Some(json!(custo)),
                margem: Some(json!(margem)),
                estoque: Some(json!(10)),
                categoria: Some(categoria.to_string()),
                ..Default::default()
            },
        )
        .await?;
        println!("Seeded {} (id {}) at R$ {:.2}", product.nome, product.id, product.preco);
    }

    Ok(())
}
