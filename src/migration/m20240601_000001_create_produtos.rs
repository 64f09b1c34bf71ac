use sea_orm_migration::prelude::*;

use super::Produtos;

/// The first catalog shape: one image per product. Databases created by
/// older deployments already have this table and skip the step.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Produtos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Produtos::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Produtos::Nome).text().not_null())
                    .col(ColumnDef::new(Produtos::Preco).double().not_null().default(0.0))
                    .col(ColumnDef::new(Produtos::Descricao).text())
                    .col(ColumnDef::new(Produtos::Imagem).text())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Produtos::Table).to_owned())
            .await
    }
}
