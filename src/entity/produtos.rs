use sea_orm::entity::prelude::*;

/// Catalog row. Image columns keep every historical shape side by side.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "produtos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub nome: String,
    pub preco: f64,
    pub descricao: Option<String>,
    pub categoria: Option<String>,
    pub custo: Option<f64>,
    pub margem: Option<f64>,
    pub estoque: Option<i32>,
    #[sea_orm(column_type = "Text", nullable)]
    pub imagem: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub imagens: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub foto1: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub foto2: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub foto3: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
