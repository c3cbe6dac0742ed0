//! HTTP routes.
//!
//! Identifiers travel as query parameters: `id` is the product (or the user,
//! for the user-only endpoints) and `userID` the user.

use axum::{
    extract::{FromRequest, FromRequestParts},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;

use crate::domain::value_objects::ObjectId;
use crate::error::{Result, ShopError};
use crate::state::AppState;

mod accounts;
mod cart;
mod catalog;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { Json(serde_json::json!({"status": "healthy", "service": "shop-backend"})) }))
        .route("/addtocart", get(cart::add_to_cart))
        .route("/removeitem", get(cart::remove_item))
        .route("/cart", get(cart::get_cart))
        .route("/committedorder", post(cart::checkout))
        .route("/instantbuy", get(cart::instant_buy))
        .route("/users/signup", post(accounts::signup))
        .route("/users/productview", get(catalog::list_products))
        .route("/users/search", get(catalog::search))
        .route("/admin/addproduct", post(catalog::add_product))
        .route("/addaddress", post(accounts::add_address))
        .route("/edithomeaddress", put(accounts::edit_home_address))
        .route("/editworkaddress", put(accounts::edit_work_address))
        .route("/deleteaddresses", delete(accounts::delete_addresses))
        .with_state(state)
}

/// `axum::Json` whose rejection is a `ShopError`.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ShopError))]
pub struct JsonBody<T>(pub T);

/// `axum::extract::Query` whose rejection is a `ShopError`.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ShopError))]
pub struct QueryParams<T>(pub T);

#[derive(Debug, Default, Deserialize)]
pub struct IdParams {
    pub id: Option<String>,
    #[serde(rename = "userID")]
    pub user_id: Option<String>,
}

impl IdParams {
    fn id(&self) -> Result<ObjectId> { required_id(self.id.as_deref(), "id") }
    fn user_id(&self) -> Result<ObjectId> { required_id(self.user_id.as_deref(), "userID") }
}

fn required_id(raw: Option<&str>, param: &'static str) -> Result<ObjectId> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty()).ok_or(ShopError::MissingParameter(param))?;
    ObjectId::parse(raw).map_err(|source| ShopError::InvalidIdentifier { param, source })
}
