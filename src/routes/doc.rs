use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        orders::{CreateOrderRequest, CustomerInput, OrderItemInput, OrderPlaced},
        products::ProductPayload,
    },
    models::{Customer, Order, OrderItem, Product},
    response::{Deleted, ErrorBody},
    routes::{health, orders, params, products},
};

#[derive(OpenApi)]
#[openapi(
    info(title = "TecNorte Storefront API"),
    paths(
        health::health_check,
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
        orders::create_order,
        orders::get_order,
        orders::list_orders
    ),
    components(
        schemas(
            Product,
            Order,
            OrderItem,
            Customer,
            ProductPayload,
            CreateOrderRequest,
            CustomerInput,
            OrderItemInput,
            OrderPlaced,
            params::ProductQuery,
            health::HealthData,
            Deleted,
            ErrorBody
        )
    ),
    tags(
        (name = "Health", description = "Liveness and database probe"),
        (name = "Produtos", description = "Catalog management"),
        (name = "Pedidos", description = "Checkout and order history"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
