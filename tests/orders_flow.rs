mod common;

use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::json;
use tecnorte_storefront::{
    dto::{orders::CreateOrderRequest, products::ProductPayload},
    entity::Pedidos,
    error::AppError,
    receipt::ReceiptLayout,
    services::{order_service, product_service},
};

use common::{setup_state, setup_state_over, setup_state_with};

fn order_request(body: serde_json::Value) -> CreateOrderRequest {
    serde_json::from_value(body).expect("valid order body")
}

fn receipt_count(dir: &std::path::Path) -> usize {
    std::fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
}

#[tokio::test]
async fn empty_orders_write_nothing() -> anyhow::Result<()> {
    let (state, _dir) = setup_state().await?;

    let result = order_service::place_order(
        &state,
        order_request(json!({
            "items": [],
            "cliente": { "nome": "Ana", "telefone": "66999990000" }
        })),
        None,
    )
    .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert_eq!(Pedidos::find().count(&state.orm).await?, 0);
    assert_eq!(receipt_count(state.receipts.dir()), 0);
    Ok(())
}

#[tokio::test]
async fn total_is_recomputed_and_receipted() -> anyhow::Result<()> {
    let (state, _dir) = setup_state().await?;

    let placed = order_service::place_order(
        &state,
        order_request(json!({
            "items": [
                { "nome": "A", "preco": 10, "quantidade": 2 },
                { "nome": "B", "preco": 5, "quantidade": 3 }
            ],
            "total": 1,
            "cliente": { "nome": "Ana", "telefone": "(66) 99999-0000" },
            "pagamento": "pix"
        })),
        None,
    )
    .await?;

    assert!(placed.sucesso);
    assert_eq!(placed.total, 35.0);
    assert_eq!(placed.erro_cupom, None);
    assert_eq!(
        placed.pdf.as_deref(),
        Some(format!("http://localhost:3000/data/cupons/pedido_{}.pdf", placed.pedido_id).as_str())
    );
    assert_eq!(placed.cupom, placed.pdf);
    assert!(state.receipts.exists(placed.pedido_id).await);

    let stored = order_service::get_order(&state, placed.pedido_id).await?;
    assert_eq!(stored.total, 35.0);
    assert_eq!(stored.itens.len(), 2);
    assert_eq!(stored.cupom, placed.pdf);
    assert_eq!(
        ReceiptLayout::for_order(&stored).total_line(),
        Some("Total: R$ 35.00")
    );
    Ok(())
}

#[tokio::test]
async fn product_pricing_carries_into_the_order() -> anyhow::Result<()> {
    let (state, _dir) = setup_state().await?;
    let mouse = product_service::create_product(
        &state,
        serde_json::from_value::<ProductPayload>(json!({
            "nome": "Mouse",
            "custo": 80,
            "margem": 62.5
        }))?,
    )
    .await?;
    assert_eq!(mouse.preco, 130.0);

    let placed = order_service::place_order(
        &state,
        order_request(json!({
            "items": [{ "nome": mouse.nome, "preco": mouse.preco, "quantidade": 2 }],
            "cliente": { "nome": "Bruno", "telefone": "(66) 99999-0000" }
        })),
        None,
    )
    .await?;

    assert_eq!(placed.total, 260.0);
    let link = placed.link_whats.expect("messaging link");
    assert!(link.starts_with("https://wa.me/5566999990000?text="));
    assert!(link.contains("pedido_"));

    let stored = order_service::get_order(&state, placed.pedido_id).await?;
    assert_eq!(
        ReceiptLayout::for_order(&stored).total_line(),
        Some("Total: R$ 260.00")
    );
    Ok(())
}

#[tokio::test]
async fn receipt_failure_keeps_the_order() -> anyhow::Result<()> {
    let (state, _dir) = setup_state_with(|config| {
        let blocker = config.data_dir.join("blocker");
        std::fs::write(&blocker, b"not a directory").expect("write blocker file");
        config.receipts_dir = blocker.join("cupons");
    })
    .await?;

    let placed = order_service::place_order(
        &state,
        order_request(json!({
            "items": [{ "nome": "A", "preco": 10, "quantidade": 1 }],
            "cliente": { "nome": "Ana", "telefone": "66999990000" }
        })),
        None,
    )
    .await?;

    assert!(placed.sucesso);
    assert_eq!(placed.pdf, None);
    assert_eq!(placed.cupom, None);
    assert!(placed.erro_cupom.is_some());
    let link = placed.link_whats.expect("link without receipt");
    assert!(!link.contains("pedido_"));

    let stored = order_service::get_order(&state, placed.pedido_id).await?;
    assert_eq!(stored.total, 10.0);
    assert_eq!(stored.cupom, None);
    Ok(())
}

#[tokio::test]
async fn contact_without_digits_has_no_link() -> anyhow::Result<()> {
    let (state, _dir) = setup_state().await?;

    let placed = order_service::place_order(
        &state,
        order_request(json!({
            "itens": [{ "nome": "A", "preco": 1, "quantidade": 1 }],
            "cliente_nome": "Ana",
            "cliente_contato": "balcão"
        })),
        None,
    )
    .await?;

    assert_eq!(placed.link_whats, None);
    Ok(())
}

#[tokio::test]
async fn idempotency_key_replays_the_first_order() -> anyhow::Result<()> {
    let (state, _dir) = setup_state().await?;
    let body = json!({
        "items": [{ "nome": "A", "preco": 10, "quantidade": 1 }],
        "cliente": { "nome": "Ana", "telefone": "66999990000" }
    });

    let first = order_service::place_order(
        &state,
        order_request(body.clone()),
        Some("checkout-42".into()),
    )
    .await?;
    let second = order_service::place_order(
        &state,
        order_request(body.clone()),
        Some("checkout-42".into()),
    )
    .await?;
    let unkeyed = order_service::place_order(&state, order_request(body), None).await?;

    assert!(!first.duplicado);
    assert!(second.duplicado);
    assert_eq!(second.pedido_id, first.pedido_id);
    assert_eq!(second.pdf, first.pdf);
    assert_ne!(unkeyed.pedido_id, first.pedido_id);
    assert_eq!(Pedidos::find().count(&state.orm).await?, 2);
    assert!(state.idempotency_locks.is_empty());
    Ok(())
}

#[tokio::test]
async fn orders_are_listed_newest_first() -> anyhow::Result<()> {
    let (state, _dir) = setup_state().await?;
    let mut ids = Vec::new();
    for nome in ["Ana", "Bruno", "Carla"] {
        let placed = order_service::place_order(
            &state,
            order_request(json!({
                "items": [{ "nome": "A", "preco": 1, "quantidade": 1 }],
                "cliente": { "nome": nome, "telefone": "66999990000", "endereco": "Rua 1" }
            })),
            None,
        )
        .await?;
        ids.push(placed.pedido_id);
    }

    let orders = order_service::list_orders(&state).await?;
    let listed: Vec<_> = orders.iter().map(|o| o.id).collect();
    ids.reverse();
    assert_eq!(listed, ids);
    assert_eq!(orders[0].cliente.nome, "Carla");
    assert_eq!(orders[0].cliente.endereco.as_deref(), Some("Rua 1"));
    assert!(orders.iter().all(|o| o.cupom.is_some()));

    assert!(matches!(
        order_service::get_order(&state, 9999).await,
        Err(AppError::NotFound(_))
    ));
    Ok(())
}

#[tokio::test]
async fn orders_table_from_the_first_storefront_is_upgraded() -> anyhow::Result<()> {
    let (state, _dir) = setup_state_over(&[
        "CREATE TABLE pedidos (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            cliente_nome TEXT,
            cliente_contato TEXT,
            itens TEXT,
            pagamento TEXT,
            data TEXT
        )",
    ])
    .await?;

    let placed = order_service::place_order(
        &state,
        order_request(json!({
            "items": [{ "nome": "A", "preco": 10, "quantidade": 2 }],
            "cliente": { "nome": "Ana", "telefone": "66999990000", "endereco": "Rua 1" }
        })),
        None,
    )
    .await?;

    let stored = order_service::get_order(&state, placed.pedido_id).await?;
    assert_eq!(stored.total, 20.0);
    assert_eq!(stored.cliente.endereco.as_deref(), Some("Rua 1"));
    Ok(())
}

#[tokio::test]
async fn receipt_url_is_only_reported_while_the_file_exists() -> anyhow::Result<()> {
    let (state, _dir) = setup_state().await?;

    let placed = order_service::place_order(
        &state,
        order_request(json!({
            "items": [{ "nome": "A", "preco": 1, "quantidade": 1 }],
            "cliente": { "nome": "Ana", "telefone": "66999990000" }
        })),
        None,
    )
    .await?;
    std::fs::remove_file(state.receipts.path_for(placed.pedido_id))?;

    let stored = order_service::get_order(&state, placed.pedido_id).await?;
    let listed = order_service::list_orders(&state).await?;

    assert_eq!(stored.cupom, None);
    assert_eq!(listed[0].cupom, None);
    Ok(())
}
