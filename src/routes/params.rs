use serde::Deserialize;
use utoipa::ToSchema;

/// Catalog filters for `GET /produtos`; every field is optional.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ProductQuery {
    /// Substring over name and description (ASCII case-insensitive).
    pub q: Option<String>,
    pub categoria: Option<String>,
    pub min_preco: Option<f64>,
    pub max_preco: Option<f64>,
}
