//! Validation and persistence of orders.
//!
//! Nothing here knows about receipts or messaging; a [`NewOrder`] either
//! passes validation in full and is committed, or nothing is written.

use std::time::Duration;

use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait};
use serde_json::Value;

use crate::{
    coerce::{Numeric, round2},
    db::OrmConn,
    dto::orders::CreateOrderRequest,
    entity::pedidos::{ActiveModel, Column, Entity as Pedidos, Model as OrderModel},
    error::{AppError, AppResult},
    models::{Customer, Order, OrderItem, order_total},
};

const MAX_IDEMPOTENCY_KEY_LEN: usize = 255;

/// A validated order that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub itens: Vec<OrderItem>,
    pub total: f64,
    pub cliente: Customer,
    pub pagamento: Option<String>,
    pub idempotency_key: Option<String>,
}

pub fn validate(
    request: CreateOrderRequest,
    idempotency_key: Option<String>,
) -> AppResult<NewOrder> {
    let raw_items = match request.items {
        Some(Value::Array(items)) if !items.is_empty() => items,
        Some(Value::Array(_)) => return Err(AppError::validation("O pedido não possui itens")),
        Some(_) => return Err(AppError::validation("Itens do pedido inválidos")),
        None => return Err(AppError::validation("Itens do pedido são obrigatórios")),
    };

    let itens = raw_items
        .iter()
        .enumerate()
        .map(|(index, raw)| parse_item(index + 1, raw))
        .collect::<AppResult<Vec<_>>>()?;

    let cliente = request.cliente.unwrap_or_default();
    let nome = non_blank(cliente.nome)
        .or_else(|| non_blank(request.cliente_nome))
        .ok_or_else(|| AppError::validation("Nome do cliente é obrigatório"))?;
    let contato = non_blank(cliente.telefone)
        .or_else(|| non_blank(cliente.contato))
        .or_else(|| non_blank(request.cliente_contato))
        .ok_or_else(|| AppError::validation("Contato do cliente é obrigatório"))?;
    let endereco =
        non_blank(cliente.endereco).or_else(|| non_blank(request.cliente_endereco));

    let idempotency_key = non_blank(idempotency_key);
    if idempotency_key
        .as_ref()
        .is_some_and(|key| key.len() > MAX_IDEMPOTENCY_KEY_LEN)
    {
        return Err(AppError::validation("Idempotency-Key muito longa"));
    }

    let total = order_total(&itens);
    if let Some(claimed) = Numeric::parse(request.total.as_ref()).value() {
        if round2(claimed) != total {
            tracing::warn!(claimed, computed = total, "client total differs from items");
        }
    }

    Ok(NewOrder {
        itens,
        total,
        cliente: Customer {
            nome,
            contato,
            endereco,
        },
        pagamento: non_blank(request.pagamento),
        idempotency_key,
    })
}

fn parse_item(position: usize, raw: &Value) -> AppResult<OrderItem> {
    let invalid = |reason: &str| AppError::validation(format!("Item {position}: {reason}"));

    let nome = raw
        .get("nome")
        .or_else(|| raw.get("name"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| invalid("nome é obrigatório"))?;

    let quantidade = ["quantidade", "quantity", "qtd"]
        .iter()
        .find_map(|key| raw.get(*key))
        .map(|v| Numeric::parse(Some(v)))
        .and_then(Numeric::value)
        .filter(|q| *q >= 1.0 && q.fract() == 0.0 && *q <= f64::from(u32::MAX))
        .ok_or_else(|| invalid("quantidade deve ser um inteiro positivo"))?;

    let preco = raw
        .get("preco")
        .or_else(|| raw.get("price"))
        .map(|v| Numeric::parse(Some(v)))
        .and_then(Numeric::value)
        .filter(|p| *p >= 0.0)
        .ok_or_else(|| invalid("preço inválido"))?;

    Ok(OrderItem {
        nome: nome.to_string(),
        quantidade: quantidade as u32,
        preco,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Insert the order and return the row as committed.
pub async fn record(orm: &OrmConn, order: NewOrder) -> AppResult<Order> {
    let itens = serde_json::to_string(&order.itens).map_err(anyhow::Error::from)?;

    let txn = orm.begin().await?;
    let inserted = Pedidos::insert(ActiveModel {
        id: NotSet,
        cliente_nome: Set(order.cliente.nome),
        cliente_contato: Set(order.cliente.contato),
        cliente_endereco: Set(order.cliente.endereco),
        itens: Set(itens),
        total: Set(order.total),
        pagamento: Set(order.pagamento),
        data: Set(Utc::now()),
        idempotency_key: Set(order.idempotency_key),
    })
    .exec(&txn)
    .await?;

    let committed = Pedidos::find_by_id(inserted.last_insert_id)
        .one(&txn)
        .await?
        .ok_or_else(|| anyhow::anyhow!("order {} vanished after insert", inserted.last_insert_id))?;
    txn.commit().await?;

    tracing::info!(order_id = committed.id, total = committed.total, "order recorded");
    Ok(order_from_entity(committed))
}

/// Most recent order carrying `key`, if it was placed within `window`.
pub async fn find_recent_by_key(
    orm: &OrmConn,
    key: &str,
    window: Duration,
) -> AppResult<Option<Order>> {
    let latest = Pedidos::find()
        .filter(Column::IdempotencyKey.eq(key))
        .order_by_desc(Column::Id)
        .one(orm)
        .await?;

    Ok(latest
        .filter(|model| {
            (Utc::now() - model.data)
                .to_std()
                .map_or(true, |age| age <= window)
        })
        .map(order_from_entity))
}

pub async fn get_order(orm: &OrmConn, id: i32) -> AppResult<Order> {
    let order = Pedidos::find_by_id(id).one(orm).await?;
    let order = match order {
        Some(o) => o,
        None => return Err(AppError::not_found("Pedido não encontrado")),
    };
    Ok(order_from_entity(order))
}

pub async fn list_orders(orm: &OrmConn) -> AppResult<Vec<Order>> {
    let orders = Pedidos::find()
        .order_by_desc(Column::Id)
        .all(orm)
        .await?
        .into_iter()
        .map(order_from_entity)
        .collect();
    Ok(orders)
}

fn order_from_entity(model: OrderModel) -> Order {
    let itens = serde_json::from_str::<Vec<OrderItem>>(&model.itens).unwrap_or_else(|err| {
        tracing::warn!(order_id = model.id, error = %err, "stored order items are unreadable");
        Vec::new()
    });

    Order {
        id: model.id,
        itens,
        total: model.total,
        cliente: Customer {
            nome: model.cliente_nome,
            contato: model.cliente_contato,
            endereco: model.cliente_endereco,
        },
        pagamento: model.pagamento,
        data: model.data,
        cupom: None,
    }
}
