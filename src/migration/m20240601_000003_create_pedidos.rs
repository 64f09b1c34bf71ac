use sea_orm_migration::prelude::*;

use super::Pedidos;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Pedidos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Pedidos::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Pedidos::ClienteNome).text().not_null())
                    .col(ColumnDef::new(Pedidos::ClienteContato).text().not_null())
                    .col(ColumnDef::new(Pedidos::ClienteEndereco).text())
                    .col(ColumnDef::new(Pedidos::Itens).text().not_null())
                    .col(ColumnDef::new(Pedidos::Total).double().not_null().default(0.0))
                    .col(ColumnDef::new(Pedidos::Pagamento).text())
                    .col(
                        ColumnDef::new(Pedidos::Data)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Pedidos::Table).to_owned())
            .await
    }
}
