//! Product catalog: admin add, listing and name search.

use std::sync::Arc;
use std::time::Duration;

use validator::Validate;

use crate::domain::aggregates::{NewProduct, Product};
use crate::error::{Result, ShopError};
use crate::services::bounded;
use crate::store::ProductStore;

pub struct CatalogService {
    products: Arc<dyn ProductStore>,
    timeout: Duration,
}

impl CatalogService {
    pub fn new(products: Arc<dyn ProductStore>, timeout: Duration) -> Self { Self { products, timeout } }

    pub async fn add_product(&self, new: NewProduct) -> Result<Product> {
        new.validate()?;
        let product = Product::create(new);
        bounded(self.timeout, self.products.insert_product(&product)).await?;
        tracing::info!(product_id = %product.id, name = %product.name, "product added");
        Ok(product)
    }

    pub async fn list_products(&self) -> Result<Vec<Product>> {
        Ok(bounded(self.timeout, self.products.list_products()).await?)
    }

    pub async fn search(&self, name: &str) -> Result<Vec<Product>> {
        let name = name.trim();
        if name.is_empty() { return Err(ShopError::MissingParameter("name")); }
        Ok(bounded(self.timeout, self.products.search_products(name)).await?)
    }
}
