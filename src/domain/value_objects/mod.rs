//! Value objects shared by the aggregates

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::str::FromStr;
use uuid::Uuid;

/// Store identifier for products, users, orders and addresses.
///
/// Generated server side as a v7 UUID; clients send it back in its
/// hyphenated text form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(Uuid);

impl ObjectId {
    pub fn new() -> Self { Self(Uuid::now_v7()) }

    pub fn parse(raw: &str) -> Result<Self, IdError> {
        let raw = raw.trim();
        if raw.is_empty() { return Err(IdError::Empty); }
        Uuid::parse_str(raw).map(Self).map_err(|_| IdError::Malformed(raw.to_string()))
    }

    pub fn as_uuid(&self) -> Uuid { self.0 }
}

impl Default for ObjectId { fn default() -> Self { Self::new() } }

impl From<Uuid> for ObjectId { fn from(id: Uuid) -> Self { Self(id) } }

impl FromStr for ObjectId {
    type Err = IdError;
    fn from_str(s: &str) -> Result<Self, Self::Err> { Self::parse(s) }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    #[error("identifier is empty")]
    Empty,
    #[error("malformed identifier: {0}")]
    Malformed(String),
}

/// Non-negative price. Serialized as a plain JSON number.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    pub const ZERO: Price = Price(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() { return Err(PriceError::Negative); }
        Ok(Self(amount))
    }

    pub fn amount(&self) -> Decimal { self.0 }
    pub fn is_negative(&self) -> bool { self.0.is_sign_negative() && !self.0.is_zero() }
}

impl std::ops::Add for Price {
    type Output = Price;
    fn add(self, rhs: Price) -> Price { Price(self.0 + rhs.0) }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Price { iter.fold(Price::ZERO, |acc, p| acc + p) }
}

impl<'a> Sum<&'a Price> for Price {
    fn sum<I: Iterator<Item = &'a Price>>(iter: I) -> Price { iter.copied().sum() }
}

impl From<Price> for Decimal { fn from(p: Price) -> Decimal { p.0 } }

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PriceError {
    #[error("price cannot be negative")]
    Negative,
}
