use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Checkout body. Accepts the nested `cliente`/`customer` object as well as
/// the flat `cliente_nome`/`cliente_contato` fields older storefronts send.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    #[serde(alias = "itens")]
    #[schema(value_type = Option<Vec<OrderItemInput>>)]
    pub items: Option<Value>,
    /// Informational only; the server recomputes the total from the items.
    #[schema(value_type = Option<f64>)]
    pub total: Option<Value>,
    #[serde(alias = "customer")]
    pub cliente: Option<CustomerInput>,
    pub cliente_nome: Option<String>,
    pub cliente_contato: Option<String>,
    pub cliente_endereco: Option<String>,
    #[serde(alias = "payment")]
    pub pagamento: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CustomerInput {
    #[serde(alias = "name")]
    pub nome: Option<String>,
    #[serde(alias = "phone")]
    pub telefone: Option<String>,
    pub contato: Option<String>,
    #[serde(alias = "address")]
    pub endereco: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct OrderItemInput {
    #[serde(alias = "name")]
    pub nome: Option<String>,
    #[serde(alias = "quantity", alias = "qtd")]
    #[schema(value_type = Option<u32>)]
    pub quantidade: Option<Value>,
    #[serde(alias = "price")]
    #[schema(value_type = Option<f64>)]
    pub preco: Option<Value>,
}

/// Checkout result consumed by the storefront.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderPlaced {
    pub sucesso: bool,
    pub mensagem: String,
    pub pedido_id: i32,
    pub total: f64,
    /// Public receipt URL; `null` when the receipt could not be produced.
    pub pdf: Option<String>,
    /// Same URL under the field name older clients read.
    pub cupom: Option<String>,
    pub link_whats: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub erro_cupom: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub duplicado: bool,
}
