//! Document stores for products and users.
//!
//! Both stores are object safe so the services can hold them as
//! `Arc<dyn ProductStore>` / `Arc<dyn UserStore>` and the binary can pick the
//! backend at startup.
//!
//! Every `UserStore` mutation is a single atomic operation on one user
//! document. Callers never read a document, change it and write it back.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::aggregates::{Address, AddressInput, AddressSlot, Cart, LineItem, Order, PaymentMethod, Product, User};
use crate::domain::value_objects::ObjectId;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: ObjectId },

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("corrupt document: {0}")]
    Corrupt(String),

    #[error("store operation timed out after {0:?}")]
    Timeout(Duration),
}

impl StoreError {
    pub fn user_not_found(id: ObjectId) -> Self { Self::NotFound { kind: "user", id } }
}

#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn insert_product(&self, product: &Product) -> Result<(), StoreError>;

    async fn find_product(&self, id: ObjectId) -> Result<Option<Product>, StoreError>;

    /// All products in insertion order.
    async fn list_products(&self) -> Result<Vec<Product>, StoreError>;

    /// Case-insensitive substring match on the product name.
    async fn search_products(&self, name: &str) -> Result<Vec<Product>, StoreError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with `Conflict` when the email or phone is already registered.
    async fn insert_user(&self, user: &User) -> Result<(), StoreError>;

    async fn find_user(&self, id: ObjectId) -> Result<Option<User>, StoreError>;

    /// Appends to the cart. No dedup.
    async fn push_cart_item(&self, user_id: ObjectId, item: &LineItem) -> Result<(), StoreError>;

    /// Removes every line item for `product_id` and returns how many went.
    async fn pull_cart_items(&self, user_id: ObjectId, product_id: ObjectId) -> Result<usize, StoreError>;

    /// Cart line items with the total aggregated from their prices.
    async fn cart(&self, user_id: ObjectId) -> Result<Cart, StoreError>;

    /// Turns the whole cart into an order and clears the cart, in one step.
    /// `Ok(None)` means the cart was empty and nothing changed.
    async fn checkout_cart(&self, user_id: ObjectId, payment: PaymentMethod) -> Result<Option<Order>, StoreError>;

    async fn push_order(&self, user_id: ObjectId, order: &Order) -> Result<(), StoreError>;

    /// Appends unless the user already has `limit` addresses, in which case
    /// `Ok(false)` is returned.
    async fn push_address(&self, user_id: ObjectId, address: &Address, limit: usize) -> Result<bool, StoreError>;

    /// `Ok(false)` when there is no address in that slot.
    async fn update_address(&self, user_id: ObjectId, slot: AddressSlot, input: AddressInput) -> Result<bool, StoreError>;

    async fn clear_addresses(&self, user_id: ObjectId) -> Result<(), StoreError>;
}
