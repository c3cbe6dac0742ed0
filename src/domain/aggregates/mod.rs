//! Aggregates module
pub mod product;
pub mod cart;
pub mod order;
pub mod user;

pub use product::{NewProduct, Product};
pub use cart::{Cart, LineItem};
pub use order::{Order, OrderError, PaymentMethod};
pub use user::{Address, AddressInput, AddressSlot, NewUser, User, MAX_ADDRESSES};
