use super::StorageBackend;
use crate::error::{ProductsError, Result};
use crate::model::{Collection, Product};
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

const MEMORY_LOCATION: &str = "memory://products.json";

/// In-memory storage backend for testing.
///
/// `None` stands for "no document", so loads fail the same way a missing file
/// does with `FsBackend`.
pub struct MemBackend {
    products: Mutex<Option<Collection>>,
    simulate_read_error: AtomicBool,
    simulate_write_error: AtomicBool,
}

impl Default for MemBackend {
    fn default() -> Self {
        Self::with_products(Vec::new())
    }
}

impl MemBackend {
    /// A backend holding an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend with no document at all.
    pub fn missing() -> Self {
        Self {
            products: Mutex::new(None),
            simulate_read_error: AtomicBool::new(false),
            simulate_write_error: AtomicBool::new(false),
        }
    }

    pub fn with_products(products: Collection) -> Self {
        Self {
            products: Mutex::new(Some(products)),
            ..Self::missing()
        }
    }

    /// What a fresh `load` would see, bypassing simulated errors.
    pub fn snapshot(&self) -> Option<Collection> {
        self.products.lock().clone()
    }

    /// Enable read error simulation for testing error handling.
    pub fn set_simulate_read_error(&self, simulate: bool) {
        self.simulate_read_error.store(simulate, Ordering::SeqCst);
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.store(simulate, Ordering::SeqCst);
    }
}

impl StorageBackend for MemBackend {
    fn load(&self) -> Result<Collection> {
        if self.simulate_read_error.load(Ordering::SeqCst) {
            return Err(ProductsError::read(MEMORY_LOCATION, "Simulated read error"));
        }
        self.products
            .lock()
            .clone()
            .ok_or_else(|| ProductsError::read(MEMORY_LOCATION, "No such document"))
    }

    fn save(&self, products: &[Product]) -> Result<()> {
        if self.simulate_write_error.load(Ordering::SeqCst) {
            return Err(ProductsError::write(MEMORY_LOCATION, "Simulated write error"));
        }
        *self.products.lock() = Some(products.to_vec());
        Ok(())
    }

    fn location(&self) -> PathBuf {
        PathBuf::from(MEMORY_LOCATION)
    }
}
