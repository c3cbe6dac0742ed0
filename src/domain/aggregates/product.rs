//! Product Aggregate

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use crate::domain::value_objects::{ObjectId, Price};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ObjectId,
    pub name: String,
    pub price: Price,
    pub rating: Option<u8>,
    pub image: Option<String>,
}

/// Admin payload for adding a product to the catalog.
#[derive(Clone, Debug, Deserialize, Validate)]
pub struct NewProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(custom = "validate_price")]
    pub price: Price,
    pub rating: Option<u8>,
    #[validate(length(max = 2048))]
    pub image: Option<String>,
}

/// Prices are stored as `NUMERIC(14, 2)`.
pub const PRICE_SCALE: u32 = 2;

fn validate_price(price: &Price) -> Result<(), ValidationError> {
    if price.is_negative() { return Err(ValidationError::new("negative_price")); }
    if price.amount().normalize().scale() > PRICE_SCALE { return Err(ValidationError::new("price_precision")); }
    Ok(())
}

impl Product {
    pub fn create(new: NewProduct) -> Self {
        Self { id: ObjectId::new(), name: new.name.trim().to_string(), price: new.price, rating: new.rating, image: new.image }
    }

    pub fn name_contains(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(&needle.to_lowercase())
    }
}
