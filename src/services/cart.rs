//! Cart engine: add, remove, list, checkout and instant buy.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::aggregates::{Cart, LineItem, Order, PaymentMethod, Product};
use crate::domain::events::DomainEvent;
use crate::domain::value_objects::ObjectId;
use crate::error::{Result, ShopError};
use crate::services::{bounded, EventPublisher};
use crate::store::{ProductStore, UserStore};

pub struct CartService {
    products: Arc<dyn ProductStore>,
    users: Arc<dyn UserStore>,
    events: EventPublisher,
    timeout: Duration,
}

impl CartService {
    pub fn new(products: Arc<dyn ProductStore>, users: Arc<dyn UserStore>, events: EventPublisher, timeout: Duration) -> Self {
        Self { products, users, events, timeout }
    }

    async fn product(&self, id: ObjectId) -> Result<Product> {
        bounded(self.timeout, self.products.find_product(id))
            .await?
            .ok_or_else(|| ShopError::NotFound(format!("product {id}")))
    }

    /// Appends a snapshot of the product to the cart. Adding the same product
    /// twice gives two line items.
    pub async fn add_to_cart(&self, product_id: ObjectId, user_id: ObjectId) -> Result<()> {
        let product = self.product(product_id).await?;
        bounded(self.timeout, self.users.push_cart_item(user_id, &LineItem::from(&product))).await?;
        tracing::info!(%user_id, %product_id, price = %product.price, "added product to cart");
        self.events.publish(DomainEvent::CartItemAdded { user_id, product_id }).await;
        Ok(())
    }

    /// Removes every line item for the product. Succeeds when there is none.
    pub async fn remove_from_cart(&self, product_id: ObjectId, user_id: ObjectId) -> Result<()> {
        let removed = bounded(self.timeout, self.users.pull_cart_items(user_id, product_id)).await?;
        tracing::info!(%user_id, %product_id, removed, "removed product from cart");
        if removed > 0 {
            self.events.publish(DomainEvent::CartItemsRemoved { user_id, product_id, removed }).await;
        }
        Ok(())
    }

    pub async fn get_cart(&self, user_id: ObjectId) -> Result<Cart> {
        Ok(bounded(self.timeout, self.users.cart(user_id)).await?)
    }

    /// Places an order for the whole cart and empties it.
    pub async fn checkout(&self, user_id: ObjectId) -> Result<ObjectId> {
        let order = bounded(self.timeout, self.users.checkout_cart(user_id, PaymentMethod::cash_on_delivery()))
            .await?
            .ok_or(ShopError::EmptyCart)?;
        self.placed(user_id, &order).await;
        Ok(order.order_id)
    }

    /// Places an order for a single product. The cart is left alone.
    pub async fn instant_buy(&self, product_id: ObjectId, user_id: ObjectId) -> Result<ObjectId> {
        let product = self.product(product_id).await?;
        let order = Order::place(vec![LineItem::from(&product)], PaymentMethod::cash_on_delivery())?;
        bounded(self.timeout, self.users.push_order(user_id, &order)).await?;
        self.placed(user_id, &order).await;
        Ok(order.order_id)
    }

    async fn placed(&self, user_id: ObjectId, order: &Order) {
        tracing::info!(%user_id, order_id = %order.order_id, total = %order.total, items = order.item_count(), "order placed");
        self.events
            .publish(DomainEvent::OrderPlaced { user_id, order_id: order.order_id, total: order.total.amount(), items: order.item_count() })
            .await;
    }
}
