//! In-process store. Used when no database is configured, and by tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{ProductStore, StoreError, UserStore};
use crate::domain::aggregates::{cart, Address, AddressInput, AddressSlot, Cart, LineItem, Order, PaymentMethod, Product, User};
use crate::domain::value_objects::ObjectId;

/// Products and users behind their own locks. Each user mutation holds the
/// users write lock for its whole read-modify-write.
#[derive(Debug, Default)]
pub struct MemoryStore {
    products: RwLock<Vec<Product>>,
    users: RwLock<HashMap<ObjectId, User>>,
}

impl MemoryStore {
    pub fn new() -> Self { Self::default() }

    /// `f` returns its result and whether it changed the user. `updated_at` is
    /// only stamped on change.
    async fn with_user<T>(&self, id: ObjectId, f: impl FnOnce(&mut User) -> (T, bool)) -> Result<T, StoreError> {
        let mut users = self.users.write().await;
        let user = users.get_mut(&id).ok_or_else(|| StoreError::user_not_found(id))?;
        let (out, changed) = f(user);
        if changed {
            user.updated_at = chrono::Utc::now();
        }
        Ok(out)
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn insert_product(&self, product: &Product) -> Result<(), StoreError> {
        self.products.write().await.push(product.clone());
        Ok(())
    }

    async fn find_product(&self, id: ObjectId) -> Result<Option<Product>, StoreError> {
        Ok(self.products.read().await.iter().find(|p| p.id == id).cloned())
    }

    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        Ok(self.products.read().await.clone())
    }

    async fn search_products(&self, name: &str) -> Result<Vec<Product>, StoreError> {
        Ok(self.products.read().await.iter().filter(|p| p.name_contains(name)).cloned().collect())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, user: &User) -> Result<(), StoreError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict("email already registered".into()));
        }
        if users.values().any(|u| u.phone == user.phone) {
            return Err(StoreError::Conflict("phone already registered".into()));
        }
        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_user(&self, id: ObjectId) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn push_cart_item(&self, user_id: ObjectId, item: &LineItem) -> Result<(), StoreError> {
        self.with_user(user_id, |u| (u.cart.push(item.clone()), true)).await
    }

    async fn pull_cart_items(&self, user_id: ObjectId, product_id: ObjectId) -> Result<usize, StoreError> {
        self.with_user(user_id, |u| {
            let removed = cart::remove_product(&mut u.cart, product_id);
            (removed, removed > 0)
        })
        .await
    }

    async fn cart(&self, user_id: ObjectId) -> Result<Cart, StoreError> {
        let users = self.users.read().await;
        let user = users.get(&user_id).ok_or_else(|| StoreError::user_not_found(user_id))?;
        Ok(Cart::new(user.cart.clone()))
    }

    async fn checkout_cart(&self, user_id: ObjectId, payment: PaymentMethod) -> Result<Option<Order>, StoreError> {
        self.with_user(user_id, |u| {
            if u.cart.is_empty() { return (None, false); }
            let Ok(order) = Order::place(std::mem::take(&mut u.cart), payment) else { return (None, false) };
            u.orders.push(order.clone());
            (Some(order), true)
        })
        .await
    }

    async fn push_order(&self, user_id: ObjectId, order: &Order) -> Result<(), StoreError> {
        self.with_user(user_id, |u| (u.orders.push(order.clone()), true)).await
    }

    async fn push_address(&self, user_id: ObjectId, address: &Address, limit: usize) -> Result<bool, StoreError> {
        self.with_user(user_id, |u| {
            if u.addresses.len() >= limit { return (false, false); }
            u.addresses.push(address.clone());
            (true, true)
        })
        .await
    }

    async fn update_address(&self, user_id: ObjectId, slot: AddressSlot, input: AddressInput) -> Result<bool, StoreError> {
        self.with_user(user_id, |u| match u.addresses.get_mut(slot.index()) {
            Some(a) => { a.apply(input); (true, true) }
            None => (false, false),
        })
        .await
    }

    async fn clear_addresses(&self, user_id: ObjectId) -> Result<(), StoreError> {
        self.with_user(user_id, |u| {
            let had = !u.addresses.is_empty();
            u.addresses.clear();
            ((), had)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::NewUser;
    use crate::domain::value_objects::Price;
    use rust_decimal::Decimal;

    fn user(email: &str, phone: &str) -> User {
        User::create(NewUser { first_name: "Ada".into(), last_name: "Lovelace".into(), email: email.into(), phone: phone.into() })
    }

    fn item(price: i64) -> LineItem {
        LineItem { product_id: ObjectId::new(), name: "Widget".into(), price: Price::new(Decimal::new(price, 0)).unwrap(), rating: None, image: None }
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let store = MemoryStore::new();
        store.insert_user(&user("a@example.com", "5550001")).await.unwrap();
        let err = store.insert_user(&user("a@example.com", "5550002")).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
        let err = store.insert_user(&user("b@example.com", "5550001")).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_checkout_moves_cart_into_order() {
        let store = MemoryStore::new();
        let u = user("a@example.com", "5550001");
        store.insert_user(&u).await.unwrap();
        store.push_cart_item(u.id, &item(3)).await.unwrap();
        store.push_cart_item(u.id, &item(4)).await.unwrap();

        let order = store.checkout_cart(u.id, PaymentMethod::cash_on_delivery()).await.unwrap().unwrap();
        assert_eq!(order.total.amount(), Decimal::new(7, 0));

        let stored = store.find_user(u.id).await.unwrap().unwrap();
        assert!(stored.cart.is_empty());
        assert_eq!(stored.orders, vec![order]);
        assert!(store.checkout_cart(u.id, PaymentMethod::cash_on_delivery()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_noop_mutations_keep_updated_at() {
        let store = MemoryStore::new();
        let u = user("a@example.com", "5550001");
        store.insert_user(&u).await.unwrap();

        assert_eq!(store.pull_cart_items(u.id, ObjectId::new()).await.unwrap(), 0);
        assert!(store.checkout_cart(u.id, PaymentMethod::cash_on_delivery()).await.unwrap().is_none());
        let input = || AddressInput { house: "1".into(), street: "Main".into(), city: "Almaty".into(), pincode: "050000".into() };
        assert!(!store.update_address(u.id, AddressSlot::Home, input()).await.unwrap());
        assert!(!store.push_address(u.id, &Address::create(input()), 0).await.unwrap());
        store.clear_addresses(u.id).await.unwrap();

        let stored = store.find_user(u.id).await.unwrap().unwrap();
        assert_eq!(stored.updated_at, u.updated_at);
        assert!(stored.addresses.is_empty());
    }

    #[tokio::test]
    async fn test_missing_user() {
        let store = MemoryStore::new();
        let err = store.push_cart_item(ObjectId::new(), &item(1)).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { kind: "user", .. }));
    }
}
