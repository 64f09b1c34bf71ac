use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::coerce::round2;

/// Catalog tags the storefront knows how to title; anything else passes through.
const CATEGORY_TITLES: &[(&str, &str)] = &[
    ("promocao", "Promoção do dia"),
    ("informatica", "Informática"),
    ("diversos", "Diversos"),
    ("acessorios", "Acessórios"),
    ("carregadores", "Carregadores"),
    ("notebooks", "Notebooks"),
];

pub fn category_title(tag: &str) -> Option<&'static str> {
    CATEGORY_TITLES
        .iter()
        .find(|(known, _)| *known == tag)
        .map(|(_, title)| *title)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: i32,
    pub nome: String,
    pub preco: f64,
    pub descricao: Option<String>,
    pub categoria: Option<String>,
    #[serde(
        rename = "categoriaTitulo",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub categoria_titulo: Option<String>,
    pub custo: f64,
    pub margem: f64,
    pub estoque: i32,
    /// Canonical image list, at most three entries for anything written by this service.
    pub imagens: Vec<String>,
}

/// Line item snapshot; independent of the live product it was bought from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    pub nome: String,
    pub quantidade: u32,
    pub preco: f64,
}

impl OrderItem {
    /// Line subtotal, rounded to cents the way it is printed.
    pub fn subtotal(&self) -> f64 {
        round2(self.preco * f64::from(self.quantidade))
    }
}

/// Sum of the rounded line subtotals, so printed lines always add up.
pub fn order_total(items: &[OrderItem]) -> f64 {
    round2(items.iter().map(OrderItem::subtotal).sum())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Customer {
    pub nome: String,
    pub contato: String,
    pub endereco: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: i32,
    pub itens: Vec<OrderItem>,
    pub total: f64,
    pub cliente: Customer,
    pub pagamento: Option<String>,
    pub data: DateTime<Utc>,
    /// Public receipt URL, present once the receipt file exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cupom: Option<String>,
}
