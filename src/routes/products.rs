use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::products::ProductPayload,
    error::AppResult,
    middleware::json::AppJson,
    models::Product,
    response::{Deleted, ErrorBody},
    routes::params::ProductQuery,
    services::product_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
}

#[utoipa::path(
    get,
    path = "/produtos",
    params(
        ("q" = Option<String>, Query, description = "Search name and description"),
        ("categoria" = Option<String>, Query, description = "Exact category tag"),
        ("min_preco" = Option<f64>, Query, description = "Lowest price"),
        ("max_preco" = Option<f64>, Query, description = "Highest price"),
    ),
    responses(
        (status = 200, description = "Catalog, newest first", body = Vec<Product>),
        (status = 500, description = "Storage failure", body = ErrorBody),
    ),
    tag = "Produtos"
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> AppResult<Json<Vec<Product>>> {
    let products = product_service::list_products(&state, query).await?;
    Ok(Json(products))
}

#[utoipa::path(
    get,
    path = "/produtos/{id}",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product", body = Product),
        (status = 404, description = "Not found", body = ErrorBody),
    ),
    tag = "Produtos"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Product>> {
    let product = product_service::get_product(&state, id).await?;
    Ok(Json(product))
}

#[utoipa::path(
    post,
    path = "/produtos",
    request_body = ProductPayload,
    responses(
        (status = 201, description = "Created product", body = Product),
        (status = 400, description = "Invalid product", body = ErrorBody),
    ),
    tag = "Produtos"
)]
pub async fn create_product(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ProductPayload>,
) -> AppResult<(StatusCode, Json<Product>)> {
    let product = product_service::create_product(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

#[utoipa::path(
    put,
    path = "/produtos/{id}",
    params(("id" = i32, Path, description = "Product id")),
    request_body = ProductPayload,
    responses(
        (status = 200, description = "Updated product", body = Product),
        (status = 400, description = "Invalid product", body = ErrorBody),
        (status = 404, description = "Not found", body = ErrorBody),
    ),
    tag = "Produtos"
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<ProductPayload>,
) -> AppResult<Json<Product>> {
    let product = product_service::update_product(&state, id, payload).await?;
    Ok(Json(product))
}

#[utoipa::path(
    delete,
    path = "/produtos/{id}",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Deleted", body = Deleted),
        (status = 404, description = "Not found", body = ErrorBody),
    ),
    tag = "Produtos"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Deleted>> {
    product_service::delete_product(&state, id).await?;
    Ok(Json(Deleted::ok()))
}
