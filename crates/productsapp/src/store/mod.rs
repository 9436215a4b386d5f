//! # Storage Layer
//!
//! The whole product collection lives in one JSON document. [`StorageBackend`]
//! is the only way the rest of the crate touches it, and it deals in whole
//! collections: there is no partial read, no append, no per-record write.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: production storage
//!   - One pretty-printed JSON array at a configured path
//!   - Writes go to a sibling temp file which is then renamed over the target,
//!     so a reader sees either the old document or the new one; a failed
//!     write leaves no temp file behind
//!
//! - [`mem_backend::MemBackend`]: in-memory storage for testing
//!   - Can start empty or "missing"
//!   - Can simulate read and write failures
//!
//! ## Document Shape
//!
//! Every record must carry `id`, `created_at`, and `updated_at` (RFC 3339).
//! A single record missing one of them makes the whole document unreadable:
//! `load` fails with `StorageRead`, so every operation, reads included,
//! fails until the document is fixed. A hand-seeded `products.json` needs the
//! timestamps too.
//!
//! ## Concurrency
//!
//! Backends take `&self` and hold no lock across a load/save pair. Two
//! concurrent writers each load, mutate, and save; the later save wins and
//! the earlier change is lost. Callers that need stronger guarantees must
//! serialize writers themselves.

use crate::error::Result;
use crate::model::{Collection, Product};
use std::path::PathBuf;

pub mod fs_backend;
pub mod mem_backend;

/// Abstract interface for reading and writing the product document.
pub trait StorageBackend: Send + Sync {
    /// Read and parse the full collection.
    ///
    /// Missing, unreadable, or malformed documents are `StorageRead` errors.
    fn load(&self) -> Result<Collection>;

    /// Replace the full collection on storage.
    fn save(&self, products: &[Product]) -> Result<()>;

    /// Where the document lives. For `MemBackend` this is a virtual path.
    fn location(&self) -> PathBuf;
}

impl<B: StorageBackend + ?Sized> StorageBackend for std::sync::Arc<B> {
    fn load(&self) -> Result<Collection> {
        (**self).load()
    }

    fn save(&self, products: &[Product]) -> Result<()> {
        (**self).save(products)
    }

    fn location(&self) -> PathBuf {
        (**self).location()
    }
}
