use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error payload shared by every endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct ErrorBody {
    pub erro: String,
}

impl ErrorBody {
    pub fn new(erro: impl Into<String>) -> Self {
        Self { erro: erro.into() }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct Deleted {
    pub sucesso: bool,
}

impl Deleted {
    pub fn ok() -> Self {
        Self { sucesso: true }
    }
}
