//! Shop backend
//!
//! E-commerce HTTP service: product catalog, per-user cart, checkout into an
//! embedded order history, and home/work addresses.
//!
//! ## Layout
//! - `domain` - value objects, aggregates, events
//! - `store` - product and user document stores (in-memory, PostgreSQL)
//! - `services` - cart engine, catalog, accounts
//! - `routes` - axum router
//!
//! The stores are built once at startup and handed to [`AppState`]; nothing
//! is global.

pub mod config;
pub mod domain;
pub mod error;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;

pub use config::{Config, ConfigError};
pub use error::{Result, ShopError};
pub use routes::router;
pub use state::AppState;
