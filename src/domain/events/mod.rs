//! Domain events
use rust_decimal::Decimal;
use serde::Serialize;
use crate::domain::value_objects::ObjectId;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    CartItemAdded { user_id: ObjectId, product_id: ObjectId },
    CartItemsRemoved { user_id: ObjectId, product_id: ObjectId, removed: usize },
    OrderPlaced { user_id: ObjectId, order_id: ObjectId, total: Decimal, items: usize },
}

impl DomainEvent {
    pub fn subject(&self) -> &'static str {
        match self {
            Self::CartItemAdded { .. } => "shop.cart.item_added",
            Self::CartItemsRemoved { .. } => "shop.cart.items_removed",
            Self::OrderPlaced { .. } => "shop.orders.placed",
        }
    }
}
