//! # Product Repository
//!
//! Every operation is one pass of load → compute → (save) → return against
//! the injected [`StorageBackend`]. Nothing is cached between calls, so each
//! call sees whatever is on storage at that moment.
//!
//! | Operation | Reads | Writes | Fails with |
//! |-----------|-------|--------|------------|
//! | `list`    | yes   | no     | `StorageRead` |
//! | `get`     | yes   | no     | `StorageRead`, `NotFound` |
//! | `create`  | yes   | yes    | `StorageRead`, `StorageWrite` |
//! | `update`  | yes   | yes    | `StorageRead`, `NotFound`, `StorageWrite` |
//! | `delete`  | yes   | yes    | `StorageRead`, `NotFound`, `StorageWrite` |
//!
//! Mutations are full read-modify-write cycles with no lock held in between.
//! Concurrent writers can lose each other's changes; see [`crate::store`].

use crate::error::{ProductsError, Result};
use crate::id::{IdGenerator, TimeRandomIds};
use crate::model::{self, Fields, Product};
use crate::query::ProductQuery;
use crate::store::StorageBackend;
use tracing::debug;

pub struct ProductRepository<B: StorageBackend, G: IdGenerator = TimeRandomIds> {
    store: B,
    ids: G,
}

impl<B: StorageBackend> ProductRepository<B> {
    pub fn new(store: B) -> Self {
        Self::with_id_generator(store, TimeRandomIds)
    }
}

impl<B: StorageBackend, G: IdGenerator> ProductRepository<B, G> {
    pub fn with_id_generator(store: B, ids: G) -> Self {
        Self { store, ids }
    }

    pub fn store(&self) -> &B {
        &self.store
    }

    pub fn list(&self, query: &ProductQuery) -> Result<Vec<Product>> {
        let products = self.store.load()?;
        let page = query.apply(&products);
        debug!(
            total = products.len(),
            returned = page.len(),
            tag = query.tag.as_deref().unwrap_or(""),
            offset = query.offset,
            limit = query.limit,
            "listed products"
        );
        Ok(page)
    }

    pub fn get(&self, id: &str) -> Result<Product> {
        let products = self.store.load()?;
        products
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| ProductsError::NotFound(id.to_string()))
    }

    pub fn create(&self, fields: Fields) -> Result<Product> {
        let mut products = self.store.load()?;
        let product = Product::new(self.ids.generate(), fields, model::now());
        products.push(product.clone());
        self.store.save(&products)?;
        debug!(id = %product.id, "created product");
        Ok(product)
    }

    pub fn update(&self, id: &str, fields: Fields) -> Result<Product> {
        let mut products = self.store.load()?;
        let index = position(&products, id)?;

        let product = &mut products[index];
        product.apply_update(fields, model::now());
        let updated = product.clone();

        self.store.save(&products)?;
        debug!(id = %updated.id, "updated product");
        Ok(updated)
    }

    pub fn delete(&self, id: &str) -> Result<Product> {
        let mut products = self.store.load()?;
        let index = position(&products, id)?;
        let removed = products.remove(index);
        self.store.save(&products)?;
        debug!(id = %removed.id, remaining = products.len(), "deleted product");
        Ok(removed)
    }
}

fn position(products: &[Product], id: &str) -> Result<usize> {
    products
        .iter()
        .position(|p| p.id == id)
        .ok_or_else(|| ProductsError::NotFound(id.to_string()))
}
