//! HTTP transport: maps requests onto [`ProductRepository`] calls.
//!
//! ## Routes
//!
//! | Verb | Path | Call | Success |
//! |------|------|------|---------|
//! | GET | `/products?tag=&offset=&limit=` | `list` | 200, JSON array |
//! | GET | `/products/:id` | `get` | 200, product |
//! | POST | `/products` | `create` | 201, new product |
//! | PUT | `/products/:id` | `update` | 200, updated product |
//! | DELETE | `/products/:id` | `delete` | 200, `{ "message", "product" }` |
//! | GET | `/health` | none | 200, `{ "ok": true }` |
//!
//! Any other GET falls through to the static directory when one is configured.
//! Errors are `{ "error": "<message>" }` with the status from
//! [`ProductsError::status_code`].
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use productsapp::{http, FsBackend, ProductRepository};
//!
//! let repo = Arc::new(ProductRepository::new(FsBackend::new("products.json")));
//! let app = http::router(repo, None);
//! http::serve(app, "127.0.0.1:3000", async { let _ = tokio::signal::ctrl_c().await; }).await?;
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tokio::net::TcpListener;

use crate::error::ProductsError;
use crate::id::IdGenerator;
use crate::repository::ProductRepository;
use crate::store::StorageBackend;

mod handlers;
mod request_log;
mod static_files;

pub use static_files::resolve_static_path;

/// Shared state handed to every handler.
pub struct AppState<B: StorageBackend, G: IdGenerator> {
    pub repo: Arc<ProductRepository<B, G>>,
    pub static_dir: Option<Arc<PathBuf>>,
}

impl<B: StorageBackend, G: IdGenerator> Clone for AppState<B, G> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            static_dir: self.static_dir.clone(),
        }
    }
}

/// Build the axum `Router` for the product API.
pub fn router<B, G>(repo: Arc<ProductRepository<B, G>>, static_dir: Option<PathBuf>) -> Router
where
    B: StorageBackend + 'static,
    G: IdGenerator + 'static,
{
    let state = AppState {
        repo,
        static_dir: static_dir.map(Arc::new),
    };

    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/products",
            get(handlers::list_products::<B, G>).post(handlers::create_product::<B, G>),
        )
        .route(
            "/products/:id",
            get(handlers::get_product::<B, G>)
                .put(handlers::update_product::<B, G>)
                .delete(handlers::delete_product::<B, G>),
        )
        .fallback(static_files::serve_static::<B, G>)
        .layer(axum::middleware::from_fn(request_log::log_requests))
        .with_state(state)
}

/// Bind `addr` and serve `app` until the future is dropped or `shutdown` resolves.
pub async fn serve<F>(app: Router, addr: &str, shutdown: F) -> std::io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

impl IntoResponse for ProductsError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub(crate) fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" }))).into_response()
}
