//! Application services. Each one owns handles to the stores it needs and
//! bounds every store call by the configured timeout.

use std::future::Future;
use std::time::Duration;

use crate::store::StoreError;

pub mod accounts;
pub mod cart;
pub mod catalog;
pub mod publisher;

pub use accounts::AccountService;
pub use cart::CartService;
pub use catalog::CatalogService;
pub use publisher::EventPublisher;

/// Abandons `op` once `limit` has elapsed. Nothing is rolled back.
pub(crate) async fn bounded<T>(limit: Duration, op: impl Future<Output = Result<T, StoreError>>) -> Result<T, StoreError> {
    tokio::time::timeout(limit, op).await.map_err(|_| StoreError::Timeout(limit))?
}
