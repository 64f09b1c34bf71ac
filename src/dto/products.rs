use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::images::LegacyImageFields;

/// Product fields as posted by the admin panel. Every field is optional so the
/// same shape serves creation and partial updates; numbers may arrive as
/// strings and are coerced by the repository.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ProductPayload {
    pub nome: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub preco: Option<Value>,
    pub descricao: Option<String>,
    pub categoria: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub custo: Option<Value>,
    #[schema(value_type = Option<f64>)]
    pub margem: Option<Value>,
    #[schema(value_type = Option<i32>)]
    pub estoque: Option<Value>,
    /// Image list, either as an array or as JSON text.
    #[schema(value_type = Option<Vec<String>>)]
    pub imagens: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub imagem: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub foto1: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub foto2: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub foto3: Option<Value>,
}

impl ProductPayload {
    pub fn image_fields(&self) -> LegacyImageFields {
        LegacyImageFields {
            slots: [self.foto1.clone(), self.foto2.clone(), self.foto3.clone()],
            imagens: self.imagens.clone(),
            imagem: self.imagem.clone(),
        }
    }
}
