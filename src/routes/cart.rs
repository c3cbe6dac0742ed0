use axum::{extract::State, Json};
use serde::Serialize;

use super::{IdParams, QueryParams};
use crate::domain::aggregates::Cart;
use crate::domain::value_objects::ObjectId;
use crate::error::Result;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct OrderPlaced { pub message: &'static str, pub order_id: ObjectId }

impl OrderPlaced {
    fn new(order_id: ObjectId) -> Self { Self { message: "successfully placed the order", order_id } }
}

pub async fn add_to_cart(State(s): State<AppState>, QueryParams(p): QueryParams<IdParams>) -> Result<Json<&'static str>> {
    let (product_id, user_id) = (p.id()?, p.user_id()?);
    s.cart.add_to_cart(product_id, user_id).await?;
    Ok(Json("successfully added to the cart"))
}

pub async fn remove_item(State(s): State<AppState>, QueryParams(p): QueryParams<IdParams>) -> Result<Json<&'static str>> {
    let (product_id, user_id) = (p.id()?, p.user_id()?);
    s.cart.remove_from_cart(product_id, user_id).await?;
    Ok(Json("successfully removed from the cart"))
}

/// `id` is the user here.
pub async fn get_cart(State(s): State<AppState>, QueryParams(p): QueryParams<IdParams>) -> Result<Json<Cart>> {
    Ok(Json(s.cart.get_cart(p.id()?).await?))
}

pub async fn checkout(State(s): State<AppState>, QueryParams(p): QueryParams<IdParams>) -> Result<Json<OrderPlaced>> {
    let order_id = s.cart.checkout(p.user_id()?).await?;
    Ok(Json(OrderPlaced::new(order_id)))
}

pub async fn instant_buy(State(s): State<AppState>, QueryParams(p): QueryParams<IdParams>) -> Result<Json<OrderPlaced>> {
    let (product_id, user_id) = (p.id()?, p.user_id()?);
    let order_id = s.cart.instant_buy(product_id, user_id).await?;
    Ok(Json(OrderPlaced::new(order_id)))
}
