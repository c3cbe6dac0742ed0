//! User Aggregate
//!
//! The user document owns its cart, addresses and order history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::domain::aggregates::{LineItem, Order};
use crate::domain::value_objects::ObjectId;

/// Home and work.
pub const MAX_ADDRESSES: usize = 2;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: ObjectId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub cart: Vec<LineItem>,
    pub addresses: Vec<Address>,
    pub orders: Vec<Order>,
}

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct NewUser {
    #[validate(length(min = 2, max = 30))]
    pub first_name: String,
    #[validate(length(min = 2, max = 30))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 7, max = 15))]
    pub phone: String,
}

impl User {
    pub fn create(new: NewUser) -> Self {
        let now = Utc::now();
        Self {
            id: ObjectId::new(), first_name: new.first_name, last_name: new.last_name,
            email: new.email.trim().to_lowercase(), phone: new.phone.trim().to_string(),
            created_at: now, updated_at: now, cart: vec![], addresses: vec![], orders: vec![],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub address_id: ObjectId,
    #[serde(rename = "house_name")]
    pub house: String,
    #[serde(rename = "street_name")]
    pub street: String,
    #[serde(rename = "city_name")]
    pub city: String,
    #[serde(rename = "pin_code")]
    pub pincode: String,
}

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct AddressInput {
    #[serde(rename = "house_name")]
    #[validate(length(min = 1, max = 100))]
    pub house: String,
    #[serde(rename = "street_name")]
    #[validate(length(min = 1, max = 100))]
    pub street: String,
    #[serde(rename = "city_name")]
    #[validate(length(min = 1, max = 100))]
    pub city: String,
    #[serde(rename = "pin_code")]
    #[validate(length(min = 3, max = 12))]
    pub pincode: String,
}

impl Address {
    pub fn create(input: AddressInput) -> Self {
        Self { address_id: ObjectId::new(), house: input.house, street: input.street, city: input.city, pincode: input.pincode }
    }

    /// Overwrites the fields, keeping the address id.
    pub fn apply(&mut self, input: AddressInput) {
        self.house = input.house;
        self.street = input.street;
        self.city = input.city;
        self.pincode = input.pincode;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressSlot { Home, Work }

impl AddressSlot {
    pub fn index(self) -> usize { match self { Self::Home => 0, Self::Work => 1 } }
    pub fn label(self) -> &'static str { match self { Self::Home => "home", Self::Work => "work" } }
}
