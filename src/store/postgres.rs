//! PostgreSQL store.
//!
//! A user row is the user document: `cart`, `addresses` and `orders` are JSONB
//! arrays updated in place. Products are plain rows.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::types::Json;
use uuid::Uuid;

use super::{ProductStore, StoreError, UserStore};
use crate::domain::aggregates::{cart, Address, AddressInput, AddressSlot, Cart, LineItem, Order, OrderError, PaymentMethod, Product, User};
use crate::domain::value_objects::{ObjectId, Price};

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self { Self { pool } }

    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(10))
            .connect(url)
            .await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool { &self.pool }
}

#[derive(sqlx::FromRow)]
struct ProductRow { id: Uuid, name: String, price: Decimal, rating: Option<i16>, image: Option<String> }

impl TryFrom<ProductRow> for Product {
    type Error = StoreError;
    fn try_from(r: ProductRow) -> Result<Self, StoreError> {
        let price = Price::new(r.price).map_err(|e| StoreError::Corrupt(format!("product {}: {e}", r.id)))?;
        let rating = r.rating.map(u8::try_from).transpose().map_err(|_| StoreError::Corrupt(format!("product {}: rating out of range", r.id)))?;
        Ok(Product { id: r.id.into(), name: r.name, price, rating, image: r.image })
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid, first_name: String, last_name: String, email: String, phone: String,
    created_at: DateTime<Utc>, updated_at: DateTime<Utc>,
    cart: Json<Vec<LineItem>>, addresses: Json<Vec<Address>>, orders: Json<Vec<Order>>,
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        Self {
            id: r.id.into(), first_name: r.first_name, last_name: r.last_name, email: r.email, phone: r.phone,
            created_at: r.created_at, updated_at: r.updated_at, cart: r.cart.0, addresses: r.addresses.0, orders: r.orders.0,
        }
    }
}

#[async_trait]
impl ProductStore for PgStore {
    async fn insert_product(&self, p: &Product) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO products (id, name, price, rating, image, created_at) VALUES ($1, $2, $3, $4, $5, NOW())")
            .bind(p.id.as_uuid()).bind(&p.name).bind(p.price.amount()).bind(p.rating.map(i16::from)).bind(&p.image)
            .execute(&self.pool).await?;
        Ok(())
    }

    async fn find_product(&self, id: ObjectId) -> Result<Option<Product>, StoreError> {
        sqlx::query_as::<_, ProductRow>("SELECT id, name, price, rating, image FROM products WHERE id = $1")
            .bind(id.as_uuid()).fetch_optional(&self.pool).await?
            .map(Product::try_from).transpose()
    }

    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        sqlx::query_as::<_, ProductRow>("SELECT id, name, price, rating, image FROM products ORDER BY created_at, id")
            .fetch_all(&self.pool).await?
            .into_iter().map(Product::try_from).collect()
    }

    async fn search_products(&self, name: &str) -> Result<Vec<Product>, StoreError> {
        sqlx::query_as::<_, ProductRow>("SELECT id, name, price, rating, image FROM products WHERE strpos(lower(name), lower($1)) > 0 ORDER BY created_at, id")
            .bind(name).fetch_all(&self.pool).await?
            .into_iter().map(Product::try_from).collect()
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn insert_user(&self, u: &User) -> Result<(), StoreError> {
        let result = sqlx::query("INSERT INTO users (id, first_name, last_name, email, phone, created_at, updated_at, cart, addresses, orders) VALUES ($1, $2, $3, $4, $5, $6, $7, '[]', '[]', '[]')")
            .bind(u.id.as_uuid()).bind(&u.first_name).bind(&u.last_name).bind(&u.email).bind(&u.phone).bind(u.created_at).bind(u.updated_at)
            .execute(&self.pool).await;
        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                let what = match db.constraint() { Some("users_phone_key") => "phone", _ => "email" };
                Err(StoreError::Conflict(format!("{what} already registered")))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_user(&self, id: ObjectId) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>("SELECT id, first_name, last_name, email, phone, created_at, updated_at, cart, addresses, orders FROM users WHERE id = $1")
            .bind(id.as_uuid()).fetch_optional(&self.pool).await?;
        Ok(row.map(User::from))
    }

    async fn push_cart_item(&self, user_id: ObjectId, item: &LineItem) -> Result<(), StoreError> {
        let done = sqlx::query("UPDATE users SET cart = cart || jsonb_build_array($2::jsonb), updated_at = NOW() WHERE id = $1")
            .bind(user_id.as_uuid()).bind(Json(item)).execute(&self.pool).await?;
        if done.rows_affected() == 0 { return Err(StoreError::user_not_found(user_id)); }
        Ok(())
    }

    async fn pull_cart_items(&self, user_id: ObjectId, product_id: ObjectId) -> Result<usize, StoreError> {
        let mut tx = self.pool.begin().await?;
        let row: Option<(Json<Vec<LineItem>>,)> = sqlx::query_as("SELECT cart FROM users WHERE id = $1 FOR UPDATE")
            .bind(user_id.as_uuid()).fetch_optional(&mut *tx).await?;
        let (Json(mut items),) = row.ok_or_else(|| StoreError::user_not_found(user_id))?;
        let removed = cart::remove_product(&mut items, product_id);
        if removed == 0 { return Ok(0); }
        sqlx::query("UPDATE users SET cart = $2, updated_at = NOW() WHERE id = $1")
            .bind(user_id.as_uuid()).bind(Json(&items)).execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(removed)
    }

    async fn cart(&self, user_id: ObjectId) -> Result<Cart, StoreError> {
        let row: Option<(Json<Vec<LineItem>>, Decimal)> = sqlx::query_as(
            "SELECT cart, COALESCE((SELECT SUM((e->>'price')::numeric) FROM jsonb_array_elements(cart) AS e), 0) FROM users WHERE id = $1",
        )
        .bind(user_id.as_uuid()).fetch_optional(&self.pool).await?;
        let (Json(line_items), total) = row.ok_or_else(|| StoreError::user_not_found(user_id))?;
        let total = Price::new(total).map_err(|e| StoreError::Corrupt(format!("user {user_id}: {e}")))?;
        Ok(Cart { line_items, total })
    }

    async fn checkout_cart(&self, user_id: ObjectId, payment: PaymentMethod) -> Result<Option<Order>, StoreError> {
        let mut tx = self.pool.begin().await?;
        let row: Option<(Json<Vec<LineItem>>,)> = sqlx::query_as("SELECT cart FROM users WHERE id = $1 FOR UPDATE")
            .bind(user_id.as_uuid()).fetch_optional(&mut *tx).await?;
        let (Json(items),) = row.ok_or_else(|| StoreError::user_not_found(user_id))?;
        let order = match Order::place(items, payment) {
            Ok(order) => order,
            Err(OrderError::NoItems) => return Ok(None),
        };
        sqlx::query("UPDATE users SET orders = orders || jsonb_build_array($2::jsonb), cart = '[]'::jsonb, updated_at = NOW() WHERE id = $1")
            .bind(user_id.as_uuid()).bind(Json(&order)).execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(Some(order))
    }

    async fn push_order(&self, user_id: ObjectId, order: &Order) -> Result<(), StoreError> {
        let done = sqlx::query("UPDATE users SET orders = orders || jsonb_build_array($2::jsonb), updated_at = NOW() WHERE id = $1")
            .bind(user_id.as_uuid()).bind(Json(order)).execute(&self.pool).await?;
        if done.rows_affected() == 0 { return Err(StoreError::user_not_found(user_id)); }
        Ok(())
    }

    async fn push_address(&self, user_id: ObjectId, address: &Address, limit: usize) -> Result<bool, StoreError> {
        let mut tx = self.pool.begin().await?;
        let count: Option<i32> = sqlx::query_scalar("SELECT jsonb_array_length(addresses) FROM users WHERE id = $1 FOR UPDATE")
            .bind(user_id.as_uuid()).fetch_optional(&mut *tx).await?;
        let count = count.ok_or_else(|| StoreError::user_not_found(user_id))?;
        if usize::try_from(count).unwrap_or(0) >= limit { return Ok(false); }
        sqlx::query("UPDATE users SET addresses = addresses || jsonb_build_array($2::jsonb), updated_at = NOW() WHERE id = $1")
            .bind(user_id.as_uuid()).bind(Json(address)).execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(true)
    }

    async fn update_address(&self, user_id: ObjectId, slot: AddressSlot, input: AddressInput) -> Result<bool, StoreError> {
        let mut tx = self.pool.begin().await?;
        let row: Option<(Json<Vec<Address>>,)> = sqlx::query_as("SELECT addresses FROM users WHERE id = $1 FOR UPDATE")
            .bind(user_id.as_uuid()).fetch_optional(&mut *tx).await?;
        let (Json(mut addresses),) = row.ok_or_else(|| StoreError::user_not_found(user_id))?;
        let Some(address) = addresses.get_mut(slot.index()) else { return Ok(false) };
        address.apply(input);
        sqlx::query("UPDATE users SET addresses = $2, updated_at = NOW() WHERE id = $1")
            .bind(user_id.as_uuid()).bind(Json(&addresses)).execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(true)
    }

    async fn clear_addresses(&self, user_id: ObjectId) -> Result<(), StoreError> {
        let done = sqlx::query("UPDATE users SET addresses = '[]'::jsonb, updated_at = CASE WHEN addresses = '[]'::jsonb THEN updated_at ELSE NOW() END WHERE id = $1")
            .bind(user_id.as_uuid()).execute(&self.pool).await?;
        if done.rows_affected() == 0 { return Err(StoreError::user_not_found(user_id)); }
        Ok(())
    }
}
