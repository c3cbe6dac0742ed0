use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use super::{JsonBody, QueryParams};
use crate::domain::aggregates::{NewProduct, Product};
use crate::error::Result;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams { pub name: Option<String> }

pub async fn add_product(State(s): State<AppState>, JsonBody(r): JsonBody<NewProduct>) -> Result<(StatusCode, Json<Product>)> {
    let product = s.catalog.add_product(r).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn list_products(State(s): State<AppState>) -> Result<Json<Vec<Product>>> {
    Ok(Json(s.catalog.list_products().await?))
}

pub async fn search(State(s): State<AppState>, QueryParams(p): QueryParams<SearchParams>) -> Result<Json<Vec<Product>>> {
    Ok(Json(s.catalog.search(p.name.as_deref().unwrap_or_default()).await?))
}
