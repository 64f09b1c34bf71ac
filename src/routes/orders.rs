use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::get,
};

use crate::{
    dto::orders::{CreateOrderRequest, OrderPlaced},
    error::AppResult,
    middleware::json::AppJson,
    models::Order,
    response::ErrorBody,
    services::order_service,
    state::AppState,
};

pub const IDEMPOTENCY_HEADER: &str = "idempotency-key";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route("/{id}", get(get_order))
}

#[utoipa::path(
    post,
    path = "/pedidos",
    request_body = CreateOrderRequest,
    params(
        ("Idempotency-Key" = Option<String>, Header, description = "Replays the original order when repeated"),
    ),
    responses(
        (status = 201, description = "Order recorded", body = OrderPlaced),
        (status = 200, description = "Order already recorded under this key", body = OrderPlaced),
        (status = 400, description = "Invalid order", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody),
    ),
    tag = "Pedidos"
)]
pub async fn create_order(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(payload): AppJson<CreateOrderRequest>,
) -> AppResult<(StatusCode, Json<OrderPlaced>)> {
    let idempotency_key = headers
        .get(IDEMPOTENCY_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let placed = order_service::place_order(&state, payload, idempotency_key).await?;
    let status = if placed.duplicado {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };
    Ok((status, Json(placed)))
}

#[utoipa::path(
    get,
    path = "/pedidos/{id}",
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order", body = Order),
        (status = 404, description = "Not found", body = ErrorBody),
    ),
    tag = "Pedidos"
)]
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Order>> {
    let order = order_service::get_order(&state, id).await?;
    Ok(Json(order))
}

#[utoipa::path(
    get,
    path = "/pedidos",
    responses(
        (status = 200, description = "Orders, newest first", body = Vec<Order>),
    ),
    tag = "Pedidos"
)]
pub async fn list_orders(State(state): State<AppState>) -> AppResult<Json<Vec<Order>>> {
    let orders = order_service::list_orders(&state).await?;
    Ok(Json(orders))
}
