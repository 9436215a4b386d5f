//! # Productsapp Architecture
//!
//! Productsapp is a **transport-agnostic product catalog library** with an HTTP
//! adapter on top. The catalog is one JSON array on disk; every operation reads
//! it whole and, when mutating, writes it back whole.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  HTTP Layer (http/)                                         │
//! │  - axum routes, status codes, JSON error bodies             │
//! │  - request logging, static file fallback                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Repository (repository.rs)                                 │
//! │  - list / get / create / update / delete                    │
//! │  - owns the load → modify → save cycle                      │
//! └─────────────────────────────────────────────────────────────┘
//!                  │                         │
//!                  ▼                         ▼
//! ┌───────────────────────────────┐ ┌───────────────────────────┐
//! │  Query Engine (query.rs)      │ │  Ids (id.rs)              │
//! │  - tag filter, offset/limit   │ │  - time + random, base-36 │
//! └───────────────────────────────┘ └───────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - StorageBackend trait                                     │
//! │  - FsBackend (production), MemBackend (testing)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: Storage Is Injected
//!
//! [`ProductRepository`] is generic over [`StorageBackend`]. Nothing below the
//! HTTP layer knows about paths, sockets, or tokio; the same repository runs
//! over a temp directory in tests or an in-memory backend in unit tests.
//!
//! ## Known Weaknesses
//!
//! These are accepted behaviors, not bugs:
//! - **Lost updates**: no lock spans a load/save pair, so concurrent writers
//!   can overwrite each other.
//! - **Unchecked ids**: generated ids are not compared against the collection.
//! - **Open records**: callers can put any extra fields on a product.
//!
//! ## Module Overview
//!
//! - [`repository`]: the CRUD operations
//! - [`query`]: filtering and pagination
//! - [`id`]: identifier generation
//! - [`store`]: storage abstraction and implementations
//! - [`model`]: `Product`, `Tag`, timestamps
//! - [`http`]: axum router and server
//! - [`config`]: layered configuration
//! - [`error`]: error types

pub mod config;
pub mod error;
pub mod http;
pub mod id;
pub mod model;
pub mod query;
pub mod repository;
pub mod store;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;

pub use config::ProductsConfig;
pub use error::{ProductsError, Result};
pub use model::{Fields, Product, Tag};
pub use query::ProductQuery;
pub use repository::ProductRepository;
pub use store::fs_backend::FsBackend;
pub use store::mem_backend::MemBackend;
pub use store::StorageBackend;
