//! Cart Aggregate
//!
//! A cart is not stored on its own: the user document carries its line items
//! and the total is always recomputed from them.

use serde::{Deserialize, Serialize};
use crate::domain::aggregates::Product;
use crate::domain::value_objects::{ObjectId, Price};

/// Denormalized copy of a product, taken when it was put in a cart or order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: ObjectId,
    pub name: String,
    pub price: Price,
    pub rating: Option<u8>,
    pub image: Option<String>,
}

impl From<&Product> for LineItem {
    fn from(p: &Product) -> Self {
        Self { product_id: p.id, name: p.name.clone(), price: p.price, rating: p.rating, image: p.image.clone() }
    }
}

/// Current cart contents with their aggregated total.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub line_items: Vec<LineItem>,
    pub total: Price,
}

impl Cart {
    pub fn new(line_items: Vec<LineItem>) -> Self {
        let total = total_of(&line_items);
        Self { line_items, total }
    }

    pub fn is_empty(&self) -> bool { self.line_items.is_empty() }
    pub fn item_count(&self) -> usize { self.line_items.len() }
}

pub fn total_of(items: &[LineItem]) -> Price { items.iter().map(|i| &i.price).sum() }

/// Pull-all removal. Returns how many line items were dropped.
pub fn remove_product(items: &mut Vec<LineItem>, product_id: ObjectId) -> usize {
    let before = items.len();
    items.retain(|i| i.product_id != product_id);
    before - items.len()
}
