//! Order Aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::domain::aggregates::cart::{total_of, LineItem};
use crate::domain::value_objects::{ObjectId, Price};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: ObjectId,
    pub ordered_at: DateTime<Utc>,
    pub total: Price,
    pub payment: PaymentMethod,
    pub items: Vec<LineItem>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod { pub digital: bool, pub cod: bool }

impl PaymentMethod {
    pub fn cash_on_delivery() -> Self { Self { digital: false, cod: true } }
}

impl Order {
    /// Builds an order from the purchased line items. There is no such thing
    /// as an empty order.
    pub fn place(items: Vec<LineItem>, payment: PaymentMethod) -> Result<Self, OrderError> {
        if items.is_empty() { return Err(OrderError::NoItems); }
        Ok(Self { order_id: ObjectId::new(), ordered_at: Utc::now(), total: total_of(&items), payment, items })
    }

    pub fn item_count(&self) -> usize { self.items.len() }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    #[error("order has no items")]
    NoItems,
}
