use sea_orm_migration::prelude::*;

use super::Pedidos;

/// Orders tables from the first storefront only stored name, contact, items,
/// payment and date. Missing columns are added as nullable or defaulted so
/// existing rows stay readable.
#[derive(DeriveMigrationName)]
pub struct Migration;

fn columns() -> Vec<(&'static str, ColumnDef)> {
    vec![
        ("cliente_nome", ColumnDef::new(Pedidos::ClienteNome).text().default("").to_owned()),
        ("cliente_contato", ColumnDef::new(Pedidos::ClienteContato).text().default("").to_owned()),
        ("cliente_endereco", ColumnDef::new(Pedidos::ClienteEndereco).text().to_owned()),
        ("itens", ColumnDef::new(Pedidos::Itens).text().default("[]").to_owned()),
        ("total", ColumnDef::new(Pedidos::Total).double().default(0.0).to_owned()),
        ("pagamento", ColumnDef::new(Pedidos::Pagamento).text().to_owned()),
        ("data", ColumnDef::new(Pedidos::Data).timestamp_with_time_zone().to_owned()),
    ]
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, mut column) in columns() {
            if manager.has_column("pedidos", name).await? {
                continue;
            }
            manager
                .alter_table(
                    Table::alter()
                        .table(Pedidos::Table)
                        .add_column(&mut column)
                        .to_owned(),
                )
                .await?;
        }
        Ok(())
    }

    async fn down(&self, _manager: &SchemaManager) -> Result<(), DbErr> {
        Ok(())
    }
}
