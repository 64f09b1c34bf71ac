use sea_orm_migration::prelude::*;

use super::Pedidos;

const INDEX_NAME: &str = "idx_pedidos_idempotency_key";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        if !manager.has_column("pedidos", "idempotency_key").await? {
            manager
                .alter_table(
                    Table::alter()
                        .table(Pedidos::Table)
                        .add_column(&mut ColumnDef::new(Pedidos::IdempotencyKey).text().to_owned())
                        .to_owned(),
                )
                .await?;
        }

        manager
            .create_index(
                Index::create()
                    .name(INDEX_NAME)
                    .table(Pedidos::Table)
                    .col(Pedidos::IdempotencyKey)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name(INDEX_NAME).to_owned())
            .await
    }
}
