mod common;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use tecnorte_storefront::routes::build_app;
use tower::ServiceExt;

use common::setup_state;

async fn send(app: &Router, request: Request<Body>) -> anyhow::Result<(StatusCode, Vec<u8>)> {
    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, bytes.to_vec()))
}

async fn send_json(
    app: &Router,
    request: Request<Body>,
) -> anyhow::Result<(StatusCode, Value)> {
    let (status, bytes) = send(app, request).await?;
    Ok((status, serde_json::from_slice(&bytes)?))
}

fn json_request(method: &str, uri: &str, body: Value) -> anyhow::Result<Request<Body>> {
    Ok(Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))?)
}

fn get(uri: &str) -> anyhow::Result<Request<Body>> {
    Ok(Request::builder().uri(uri).body(Body::empty())?)
}

#[tokio::test]
async fn product_crud_over_http() -> anyhow::Result<()> {
    let (state, _dir) = setup_state().await?;
    let app = build_app(state);

    let (status, created) = send_json(
        &app,
        json_request(
            "POST",
            "/produtos",
            json!({ "nome": "X", "custo": 100, "preco": 150, "categoria": "promocao" }),
        )?,
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["margem"], json!(50.0));
    assert_eq!(created["categoriaTitulo"], json!("Promoção do dia"));
    let id = created["id"].as_i64().expect("numeric id");

    let (status, updated) = send_json(
        &app,
        json_request("PUT", &format!("/admin/produtos/{id}"), json!({ "nome": "Y" }))?,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["nome"], json!("Y"));

    let (status, listed) = send_json(&app, get("/produtos?q=y")?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().map(Vec::len), Some(1));

    let (status, deleted) = send_json(
        &app,
        json_request("DELETE", &format!("/produtos/{id}"), json!({}))?,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, json!({ "sucesso": true }));

    let (status, missing) = send_json(&app, get(&format!("/produtos/{id}"))?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(missing["erro"], json!("Produto não encontrado"));
    Ok(())
}

#[tokio::test]
async fn invalid_product_body_is_a_bad_request() -> anyhow::Result<()> {
    let (state, _dir) = setup_state().await?;
    let app = build_app(state);

    let (status, body) = send_json(&app, json_request("POST", "/produtos", json!({ "preco": 1 }))?).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["erro"].is_string());
    Ok(())
}

#[tokio::test]
async fn checkout_serves_the_receipt() -> anyhow::Result<()> {
    let (state, _dir) = setup_state().await?;
    let app = build_app(state);

    let (status, placed) = send_json(
        &app,
        json_request(
            "POST",
            "/pedidos",
            json!({
                "items": [{ "nome": "A", "preco": 10, "quantidade": 2 }],
                "customer": { "name": "Ana", "phone": "66999990000" },
                "payment": "dinheiro"
            }),
        )?,
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(placed["sucesso"], json!(true));
    assert_eq!(placed["total"], json!(20.0));
    let pedido_id = placed["pedidoId"].as_i64().expect("numeric pedidoId");
    let pdf = placed["pdf"].as_str().expect("receipt url");
    assert!(placed["linkWhats"].as_str().is_some());
    assert!(placed.get("duplicado").is_none());

    let path = pdf.trim_start_matches("http://localhost:3000");
    assert_eq!(path, format!("/data/cupons/pedido_{pedido_id}.pdf"));
    let (status, bytes) = send(&app, get(path)?).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(bytes.starts_with(b"%PDF"));

    let (status, order) = send_json(&app, get(&format!("/admin/pedidos/{pedido_id}"))?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["pagamento"], json!("dinheiro"));
    assert_eq!(order["cliente"]["contato"], json!("66999990000"));
    Ok(())
}

#[tokio::test]
async fn empty_checkout_is_rejected() -> anyhow::Result<()> {
    let (state, _dir) = setup_state().await?;
    let app = build_app(state.clone());

    let (status, body) = send_json(
        &app,
        json_request(
            "POST",
            "/pedidos",
            json!({ "items": [], "cliente": { "nome": "Ana", "telefone": "1" } }),
        )?,
    )
    .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["erro"].is_string());
    let (_, orders) = send_json(&app, get("/pedidos")?).await?;
    assert_eq!(orders, json!([]));
    Ok(())
}

#[tokio::test]
async fn repeated_idempotency_key_returns_ok_with_the_same_order() -> anyhow::Result<()> {
    let (state, _dir) = setup_state().await?;
    let app = build_app(state);
    let body = json!({
        "items": [{ "nome": "A", "preco": 10, "quantidade": 1 }],
        "cliente": { "nome": "Ana", "telefone": "66999990000" }
    });
    let keyed = |body: Value| -> anyhow::Result<Request<Body>> {
        let mut request = json_request("POST", "/pedidos", body)?;
        request
            .headers_mut()
            .insert("idempotency-key", "abc-123".parse()?);
        Ok(request)
    };

    let (first_status, first) = send_json(&app, keyed(body.clone())?).await?;
    let (second_status, second) = send_json(&app, keyed(body)?).await?;

    assert_eq!(first_status, StatusCode::CREATED);
    assert_eq!(second_status, StatusCode::OK);
    assert_eq!(second["pedidoId"], first["pedidoId"]);
    assert_eq!(second["duplicado"], json!(true));
    Ok(())
}

#[tokio::test]
async fn unknown_routes_use_the_error_body() -> anyhow::Result<()> {
    let (state, _dir) = setup_state().await?;
    let app = build_app(state);

    let (status, body) = send_json(&app, get("/nada")?).await?;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["erro"].as_str().is_some_and(|msg| msg.contains("/nada")));
    Ok(())
}

#[tokio::test]
async fn responses_carry_a_request_id() -> anyhow::Result<()> {
    let (state, _dir) = setup_state().await?;
    let app = build_app(state);

    let response = app.oneshot(get("/health")?).await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    Ok(())
}

#[tokio::test]
async fn mistyped_bodies_are_bad_requests_with_the_error_body() -> anyhow::Result<()> {
    let (state, _dir) = setup_state().await?;
    let app = build_app(state);

    let (status, body) = send_json(
        &app,
        json_request(
            "POST",
            "/pedidos",
            json!({
                "items": [{ "nome": "A", "preco": 10, "quantidade": 1 }],
                "cliente": "Ana"
            }),
        )?,
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["erro"].is_string());

    let (status, body) = send_json(
        &app,
        json_request("POST", "/produtos", json!({ "nome": "X", "descricao": 5 }))?,
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["erro"].is_string());

    let (status, body) = send_json(
        &app,
        Request::builder()
            .method("PUT")
            .uri("/produtos/1")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{ not json"))?,
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["erro"].is_string());
    Ok(())
}

#[tokio::test]
async fn customer_with_telefone_and_contato_is_accepted() -> anyhow::Result<()> {
    let (state, _dir) = setup_state().await?;
    let app = build_app(state);

    let (status, placed) = send_json(
        &app,
        json_request(
            "POST",
            "/pedidos",
            json!({
                "items": [{ "nome": "A", "preco": 10, "quantidade": 1 }],
                "cliente": { "nome": "Ana", "telefone": "66999990000", "contato": "66988887777" }
            }),
        )?,
    )
    .await?;

    assert_eq!(status, StatusCode::CREATED);
    let pedido_id = placed["pedidoId"].as_i64().expect("numeric pedidoId");
    let (_, order) = send_json(&app, get(&format!("/pedidos/{pedido_id}"))?).await?;
    assert_eq!(order["cliente"]["contato"], json!("66999990000"));
    Ok(())
}
