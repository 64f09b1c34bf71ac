use std::sync::Arc;

use crate::{
    coerce::NumericPolicy,
    config::AppConfig,
    db::{DbPool, OrmConn, create_orm_conn, create_pool},
    locks::KeyedLocks,
    receipt::ReceiptGenerator,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub config: Arc<AppConfig>,
    pub receipts: ReceiptGenerator,
    /// Serializes read-modify-write of a single product.
    pub product_locks: KeyedLocks<i32>,
    /// Serializes order creation sharing one idempotency key.
    pub idempotency_locks: KeyedLocks<String>,
}

impl AppState {
    pub fn new(pool: DbPool, config: AppConfig) -> Self {
        let receipts = ReceiptGenerator::new(&config.receipts_dir, &config.public_base_url);
        Self {
            orm: create_orm_conn(pool.clone()),
            pool,
            config: Arc::new(config),
            receipts,
            product_locks: KeyedLocks::new(),
            idempotency_locks: KeyedLocks::new(),
        }
    }

    pub async fn connect(config: AppConfig) -> anyhow::Result<Self> {
        let pool = create_pool(&config.database_url, config.database_max_connections).await?;
        Ok(Self::new(pool, config))
    }

    pub fn numeric_policy(&self) -> NumericPolicy {
        NumericPolicy::new(self.config.strict_numeric_validation)
    }
}
