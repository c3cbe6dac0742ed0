//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use crate::services::{AccountService, CartService, CatalogService, EventPublisher};
use crate::store::{ProductStore, UserStore};

/// Cheaply cloneable handle to the services. Stores are built once at startup
/// and injected here.
#[derive(Clone)]
pub struct AppState {
    pub cart: Arc<CartService>,
    pub catalog: Arc<CatalogService>,
    pub accounts: Arc<AccountService>,
}

impl AppState {
    pub fn new(products: Arc<dyn ProductStore>, users: Arc<dyn UserStore>, events: EventPublisher, store_timeout: Duration) -> Self {
        Self {
            cart: Arc::new(CartService::new(products.clone(), users.clone(), events, store_timeout)),
            catalog: Arc::new(CatalogService::new(products, store_timeout)),
            accounts: Arc::new(AccountService::new(users, store_timeout)),
        }
    }
}
