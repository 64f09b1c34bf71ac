use sea_orm_migration::prelude::*;

use super::Produtos;

/// Columns later catalog versions introduced. Each one is added only when the
/// table lacks it, so fresh and long-lived databases converge on one shape.
#[derive(DeriveMigrationName)]
pub struct Migration;

fn columns() -> Vec<(&'static str, ColumnDef)> {
    vec![
        ("categoria", ColumnDef::new(Produtos::Categoria).text().to_owned()),
        ("custo", ColumnDef::new(Produtos::Custo).double().default(0.0).to_owned()),
        ("margem", ColumnDef::new(Produtos::Margem).double().default(0.0).to_owned()),
        ("estoque", ColumnDef::new(Produtos::Estoque).integer().default(0).to_owned()),
        ("imagem", ColumnDef::new(Produtos::Imagem).text().to_owned()),
        ("imagens", ColumnDef::new(Produtos::Imagens).text().to_owned()),
        ("foto1", ColumnDef::new(Produtos::Foto1).text().to_owned()),
        ("foto2", ColumnDef::new(Produtos::Foto2).text().to_owned()),
        ("foto3", ColumnDef::new(Produtos::Foto3).text().to_owned()),
    ]
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, mut column) in columns() {
            if manager.has_column("produtos", name).await? {
                continue;
            }
            manager
                .alter_table(
                    Table::alter()
                        .table(Produtos::Table)
                        .add_column(&mut column)
                        .to_owned(),
                )
                .await?;
        }
        Ok(())
    }

    async fn down(&self, _manager: &SchemaManager) -> Result<(), DbErr> {
        // Legacy readers depend on these columns; they are never dropped.
        Ok(())
    }
}
