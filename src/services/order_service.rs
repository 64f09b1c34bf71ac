use crate::{
    dto::orders::{CreateOrderRequest, OrderPlaced},
    error::AppResult,
    messaging::whatsapp_link,
    models::Order,
    services::order_recorder,
    state::AppState,
};

const PLACED: &str = "Pedido registrado e cupom gerado com sucesso!";
const PLACED_WITHOUT_RECEIPT: &str = "Pedido registrado, mas o cupom não pôde ser gerado.";
const DUPLICATE: &str = "Pedido já registrado anteriormente.";

/// Validate, persist, then produce the receipt and messaging link.
///
/// Once the order row is committed the call succeeds even if the receipt
/// cannot be written; the failure is reported through `erro_cupom`.
pub async fn place_order(
    state: &AppState,
    request: CreateOrderRequest,
    idempotency_key: Option<String>,
) -> AppResult<OrderPlaced> {
    let new_order = order_recorder::validate(request, idempotency_key)?;

    let Some(key) = new_order.idempotency_key.clone() else {
        let order = order_recorder::record(&state.orm, new_order).await?;
        return Ok(finish(state, order, false).await);
    };

    let guard = state.idempotency_locks.lock(key.clone()).await;
    let outcome = match order_recorder::find_recent_by_key(
        &state.orm,
        &key,
        state.config.idempotency_window,
    )
    .await
    {
        Ok(Some(existing)) => {
            tracing::info!(order_id = existing.id, "idempotent replay of order");
            Ok(finish(state, existing, true).await)
        }
        Ok(None) => match order_recorder::record(&state.orm, new_order).await {
            Ok(order) => Ok(finish(state, order, false).await),
            Err(err) => Err(err),
        },
        Err(err) => Err(err),
    };
    drop(guard);
    state.idempotency_locks.forget(&key);

    outcome
}

async fn finish(state: &AppState, order: Order, duplicate: bool) -> OrderPlaced {
    let receipt = if duplicate && state.receipts.exists(order.id).await {
        Ok(state.receipts.url_for(order.id))
    } else {
        match state.receipts.generate_async(order.clone()).await {
            Ok(_) => Ok(state.receipts.url_for(order.id)),
            Err(err) => {
                tracing::error!(order_id = order.id, error = %err, "receipt generation failed");
                Err(err)
            }
        }
    };

    let receipt_url = receipt.as_ref().ok().map(String::as_str);
    let link_whats = whatsapp_link(
        &state.config.whatsapp_country_code,
        &order.cliente.contato,
        &order.cliente.nome,
        order.id,
        receipt_url,
    );

    let mensagem = match (&receipt, duplicate) {
        (_, true) => DUPLICATE,
        (Ok(_), false) => PLACED,
        (Err(_), false) => PLACED_WITHOUT_RECEIPT,
    };

    let (pdf, erro_cupom) = match receipt {
        Ok(url) => (Some(url), None),
        Err(err) => (None, Some(format!("Cupom indisponível: {err}"))),
    };

    OrderPlaced {
        sucesso: true,
        mensagem: mensagem.to_string(),
        pedido_id: order.id,
        total: order.total,
        cupom: pdf.clone(),
        pdf,
        link_whats,
        erro_cupom,
        duplicado: duplicate,
    }
}

pub async fn get_order(state: &AppState, id: i32) -> AppResult<Order> {
    let order = order_recorder::get_order(&state.orm, id).await?;
    Ok(with_receipt(state, order).await)
}

pub async fn list_orders(state: &AppState) -> AppResult<Vec<Order>> {
    let orders = order_recorder::list_orders(&state.orm).await?;
    let mut listed = Vec::with_capacity(orders.len());
    for order in orders {
        listed.push(with_receipt(state, order).await);
    }
    Ok(listed)
}

async fn with_receipt(state: &AppState, mut order: Order) -> Order {
    if state.receipts.exists(order.id).await {
        order.cupom = Some(state.receipts.url_for(order.id));
    }
    order
}
