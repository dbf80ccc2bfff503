//! # Product Repository
//!
//! Listing storage.
//!
//! ## Key Operations
//! - Lookup by id, seller or arbitrary predicate
//! - Insert (status starts ACTIVE) and in-place update
//! - Removal that cascades to the product's reviews
//!
//! ## Cascading Delete
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  remove_product("sofa")                                                 │
//! │       │                                                                 │
//! │       ├──► products.retain(id != "sofa")                               │
//! │       └──► reviews.retain(product_id != "sofa")                        │
//! │                                                                         │
//! │  Orders are NOT touched: their items keep the frozen subtotal and a    │
//! │  dangling product id.                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::debug;

use bazaar_core::{Product, ProductInput, ProductStatus};

use crate::error::{StoreError, StoreResult};
use crate::store::{generate_id, now, MarketStore};

impl MarketStore {
    /// Gets a product by id.
    pub fn find_product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub(crate) fn find_product_mut(&mut self, id: &str) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id == id)
    }

    /// All products in insertion order, regardless of status.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Products matching `predicate`, in insertion order.
    pub fn products_where<F>(&self, predicate: F) -> Vec<&Product>
    where
        F: Fn(&Product) -> bool,
    {
        self.products.iter().filter(|p| predicate(p)).collect()
    }

    /// Listings owned by `seller_id`, any status.
    pub fn products_by_seller(&self, seller_id: &str) -> Vec<&Product> {
        self.products_where(|p| p.is_sold_by(seller_id))
    }

    /// Appends a new ACTIVE listing owned by `seller_id`.
    pub fn insert_product(&mut self, seller_id: &str, input: ProductInput) -> Product {
        let product = Product {
            id: generate_id(),
            title: input.title,
            description: input.description,
            price_cents: input.price_cents,
            category: input.category,
            condition: input.condition,
            status: ProductStatus::Active,
            images: input.images,
            stock: input.stock,
            seller_id: seller_id.to_string(),
            created_at: now(),
        };

        debug!(id = %product.id, seller_id = %seller_id, "Inserting product");

        self.products.push(product.clone());
        product
    }

    /// Overwrites a listing's editable fields, optionally changing status.
    ///
    /// ## Returns
    /// * `Ok(Product)` - The updated product
    /// * `Err(StoreError::NotFound)` - Product doesn't exist
    pub fn update_product(
        &mut self,
        id: &str,
        input: &ProductInput,
        status: Option<ProductStatus>,
    ) -> StoreResult<Product> {
        let product = self
            .find_product_mut(id)
            .ok_or_else(|| StoreError::not_found("Product", id))?;

        product.apply_input(input);
        if let Some(status) = status {
            product.status = status;
        }

        debug!(id = %id, status = ?product.status, "Updated product");
        Ok(product.clone())
    }

    /// Removes a product and every review that references it.
    ///
    /// Returns `false` if no product had this id.
    pub fn remove_product(&mut self, id: &str) -> bool {
        let Some(index) = self.products.iter().position(|p| p.id == id) else {
            return false;
        };

        self.products.remove(index);

        let before = self.reviews.len();
        self.reviews.retain(|r| r.product_id != id);

        debug!(
            id = %id,
            cascaded_reviews = before - self.reviews.len(),
            "Removed product"
        );
        true
    }
}
