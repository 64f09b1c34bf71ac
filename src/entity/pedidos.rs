use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "pedidos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub cliente_nome: String,
    pub cliente_contato: String,
    pub cliente_endereco: Option<String>,
    /// JSON array of item snapshots.
    #[sea_orm(column_type = "Text")]
    pub itens: String,
    pub total: f64,
    pub pagamento: Option<String>,
    pub data: DateTimeUtc,
    pub idempotency_key: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
