//! Ordered schema steps, each applied once and recorded in `seaql_migrations`.

use sea_orm_migration::prelude::*;

mod m20240601_000001_create_produtos;
mod m20240601_000002_backfill_produtos_columns;
mod m20240601_000003_create_pedidos;
mod m20240601_000004_add_pedidos_idempotency_key;
mod m20240601_000005_backfill_pedidos_columns;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_produtos::Migration),
            Box::new(m20240601_000002_backfill_produtos_columns::Migration),
            Box::new(m20240601_000003_create_pedidos::Migration),
            Box::new(m20240601_000004_add_pedidos_idempotency_key::Migration),
            Box::new(m20240601_000005_backfill_pedidos_columns::Migration),
        ]
    }
}

#[derive(DeriveIden)]
pub(crate) enum Produtos {
    Table,
    Id,
    Nome,
    Preco,
    Descricao,
    Categoria,
    Custo,
    Margem,
    Estoque,
    Imagem,
    Imagens,
    Foto1,
    Foto2,
    Foto3,
}

#[derive(DeriveIden)]
pub(crate) enum Pedidos {
    Table,
    Id,
    ClienteNome,
    ClienteContato,
    ClienteEndereco,
    Itens,
    Total,
    Pagamento,
    Data,
    IdempotencyKey,
}
