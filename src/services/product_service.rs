use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use crate::{
    coerce::round2,
    dto::products::ProductPayload,
    entity::produtos::{ActiveModel, Column, Entity as Produtos, Model as ProductModel},
    error::{AppError, AppResult},
    images::{self, LegacyImageFields, StoredImages},
    models::{Product, category_title},
    routes::params::ProductQuery,
    state::AppState,
};

const NOT_FOUND: &str = "Produto não encontrado";

pub async fn list_products(state: &AppState, query: ProductQuery) -> AppResult<Vec<Product>> {
    let mut condition = Condition::all();

    if let Some(search) = query.q.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        condition = condition.add(
            Condition::any()
                .add(Column::Nome.contains(search))
                .add(Column::Descricao.contains(search)),
        );
    }

    if let Some(categoria) = query.categoria.as_deref().filter(|s| !s.is_empty()) {
        condition = condition.add(Column::Categoria.eq(categoria));
    }

    if let Some(min_preco) = query.min_preco {
        condition = condition.add(Column::Preco.gte(min_preco));
    }

    if let Some(max_preco) = query.max_preco {
        condition = condition.add(Column::Preco.lte(max_preco));
    }

    let items = Produtos::find()
        .filter(condition)
        .order_by_desc(Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(product_from_entity)
        .collect();

    Ok(items)
}

pub async fn get_product(state: &AppState, id: i32) -> AppResult<Product> {
    Produtos::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(product_from_entity)
        .ok_or_else(|| AppError::not_found(NOT_FOUND))
}

pub async fn create_product(state: &AppState, payload: ProductPayload) -> AppResult<Product> {
    let policy = state.numeric_policy();

    let nome = payload
        .nome
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::validation("Nome é obrigatório"))?
        .to_string();

    let custo = policy.decimal("custo", payload.custo.as_ref())?.unwrap_or(0.0);
    let preco = policy.decimal("preco", payload.preco.as_ref())?;
    let margem = policy.decimal("margem", payload.margem.as_ref())?;
    let estoque = policy.integer("estoque", payload.estoque.as_ref())?.unwrap_or(0);
    let pricing = Pricing::resolve(custo, preco, margem, None);

    let stored = StoredImages::from_canonical(&images::images_for_create(&payload.image_fields()));

    let active = ActiveModel {
        id: NotSet,
        nome: Set(nome),
        preco: Set(pricing.preco),
        descricao: Set(payload.descricao.filter(|d| !d.trim().is_empty())),
        categoria: Set(payload.categoria.filter(|c| !c.trim().is_empty())),
        custo: Set(Some(custo)),
        margem: Set(Some(pricing.margem)),
        estoque: Set(Some(estoque)),
        imagem: Set(stored.imagem),
        imagens: Set(Some(stored.imagens)),
        foto1: Set(stored.foto1),
        foto2: Set(stored.foto2),
        foto3: Set(stored.foto3),
    };
    let product = active.insert(&state.orm).await?;

    tracing::info!(product_id = product.id, "product created");
    Ok(product_from_entity(product))
}

pub async fn update_product(
    state: &AppState,
    id: i32,
    payload: ProductPayload,
) -> AppResult<Product> {
    let guard = state.product_locks.lock(id).await;
    let result = apply_update(state, id, payload).await;
    drop(guard);
    state.product_locks.forget(&id);

    let product = result?;
    tracing::info!(product_id = product.id, "product updated");
    Ok(product)
}

/// Read-modify-write of one product; the caller holds its lock.
async fn apply_update(state: &AppState, id: i32, payload: ProductPayload) -> AppResult<Product> {
    let policy = state.numeric_policy();
    let custo_in = policy.decimal("custo", payload.custo.as_ref())?;
    let preco_in = policy.decimal("preco", payload.preco.as_ref())?;
    let margem_in = policy.decimal("margem", payload.margem.as_ref())?;
    let estoque_in = policy.integer("estoque", payload.estoque.as_ref())?;

    let txn = state.orm.begin().await?;

    let existing = Produtos::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::not_found(NOT_FOUND))?;

    let previous_images = images::normalize(&image_fields_of(&existing));
    let stored = StoredImages::from_canonical(&images::images_for_update(
        &payload.image_fields(),
        &previous_images,
    ));

    let custo = custo_in.unwrap_or(existing.custo.unwrap_or(0.0));
    let pricing = Pricing::resolve(
        custo,
        preco_in,
        margem_in,
        Some(Previous {
            preco: existing.preco,
            margem: existing.margem.unwrap_or(0.0),
            custo_changed: custo_in.is_some(),
        }),
    );

    let nome = payload
        .nome
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| existing.nome.clone());
    let descricao = payload.descricao.or_else(|| existing.descricao.clone());
    let categoria = payload.categoria.or_else(|| existing.categoria.clone());
    let estoque = estoque_in.or(existing.estoque).unwrap_or(0);

    let mut active: ActiveModel = existing.into();
    active.nome = Set(nome);
    active.preco = Set(pricing.preco);
    active.descricao = Set(descricao);
    active.categoria = Set(categoria);
    active.custo = Set(Some(custo));
    active.margem = Set(Some(pricing.margem));
    active.estoque = Set(Some(estoque));
    active.imagem = Set(stored.imagem);
    active.imagens = Set(Some(stored.imagens));
    active.foto1 = Set(stored.foto1);
    active.foto2 = Set(stored.foto2);
    active.foto3 = Set(stored.foto3);

    let product = active.update(&txn).await?;
    txn.commit().await?;

    Ok(product_from_entity(product))
}

pub async fn delete_product(state: &AppState, id: i32) -> AppResult<()> {
    let guard = state.product_locks.lock(id).await;
    let result = Produtos::delete_by_id(id).exec(&state.orm).await;
    drop(guard);
    state.product_locks.forget(&id);

    if result?.rows_affected == 0 {
        return Err(AppError::not_found(NOT_FOUND));
    }

    tracing::info!(product_id = id, "product deleted");
    Ok(())
}

fn image_fields_of(model: &ProductModel) -> LegacyImageFields {
    LegacyImageFields::from_columns(
        model.foto1.as_deref(),
        model.foto2.as_deref(),
        model.foto3.as_deref(),
        model.imagens.as_deref(),
        model.imagem.as_deref(),
    )
}

fn product_from_entity(model: ProductModel) -> Product {
    let imagens = images::normalize(&image_fields_of(&model));
    Product {
        id: model.id,
        categoria_titulo: model
            .categoria
            .as_deref()
            .and_then(category_title)
            .map(str::to_string),
        nome: model.nome,
        preco: model.preco,
        descricao: model.descricao,
        categoria: model.categoria,
        custo: model.custo.unwrap_or(0.0),
        margem: model.margem.unwrap_or(0.0),
        estoque: model.estoque.unwrap_or(0),
        imagens,
    }
}

struct Previous {
    preco: f64,
    margem: f64,
    custo_changed: bool,
}

/// Price and margin after filling in whichever one the caller left out.
#[derive(Debug, PartialEq)]
struct Pricing {
    preco: f64,
    margem: f64,
}

impl Pricing {
    fn resolve(
        custo: f64,
        preco: Option<f64>,
        margem: Option<f64>,
        previous: Option<Previous>,
    ) -> Self {
        match (preco, margem) {
            (Some(preco), Some(margem)) => Self { preco, margem },
            (None, Some(margem)) => Self {
                preco: price_from_margin(custo, margem),
                margem,
            },
            (Some(preco), None) => Self {
                preco,
                margem: margin_from_price(custo, preco)
                    .or(previous.map(|p| p.margem))
                    .unwrap_or(0.0),
            },
            (None, None) => match previous {
                Some(prev) => Self {
                    preco: prev.preco,
                    margem: if prev.custo_changed {
                        margin_from_price(custo, prev.preco).unwrap_or(prev.margem)
                    } else {
                        prev.margem
                    },
                },
                None => {
                    let preco = price_from_margin(custo, 0.0);
                    Self {
                        preco,
                        margem: margin_from_price(custo, preco).unwrap_or(0.0),
                    }
                }
            },
        }
    }
}

fn price_from_margin(custo: f64, margem: f64) -> f64 {
    round2(custo * (1.0 + margem / 100.0))
}

/// Only defined when both cost and price are positive.
fn margin_from_price(custo: f64, preco: f64) -> Option<f64> {
    (custo > 0.0 && preco > 0.0).then(|| round2((preco - custo) / custo * 100.0))
}
