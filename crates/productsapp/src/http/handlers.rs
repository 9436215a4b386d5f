use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use super::AppState;
use crate::error::{ProductsError, Result};
use crate::id::IdGenerator;
use crate::model::Fields;
use crate::query::ProductQuery;
use crate::repository::ProductRepository;
use crate::store::StorageBackend;

const DELETED_MESSAGE: &str = "Product deleted successfully";

/// Raw query-string values. Coercion happens in [`ProductQuery::from_params`].
///
/// A repeated key keeps its first value; unknown keys are ignored.
#[derive(Debug, Default, PartialEq, Eq)]
struct ListParams {
    tag: Option<String>,
    offset: Option<String>,
    limit: Option<String>,
}

impl ListParams {
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "tag" => &mut params.tag,
                "offset" => &mut params.offset,
                "limit" => &mut params.limit,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }

    fn into_query(self) -> ProductQuery {
        ProductQuery::from_params(
            self.tag.as_deref(),
            self.offset.as_deref(),
            self.limit.as_deref(),
        )
    }
}

/// Run a repository call on the blocking pool; file I/O is synchronous.
async fn blocking<B, G, T, F>(repo: Arc<ProductRepository<B, G>>, op: F) -> Result<T>
where
    B: StorageBackend + 'static,
    G: IdGenerator + 'static,
    T: Send + 'static,
    F: FnOnce(&ProductRepository<B, G>) -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(move || op(&repo))
        .await
        .map_err(|e| ProductsError::Internal(e.to_string()))?
}

fn body_fields(body: std::result::Result<Json<Fields>, JsonRejection>) -> Result<Fields> {
    body.map(|Json(fields)| fields)
        .map_err(|rejection| ProductsError::InvalidBody(rejection.body_text()))
}

pub(super) async fn health() -> impl IntoResponse {
    Json(json!({ "ok": true }))
}

/// `GET /products`
pub(super) async fn list_products<B, G>(
    State(state): State<AppState<B, G>>,
    pairs: std::result::Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<impl IntoResponse>
where
    B: StorageBackend + 'static,
    G: IdGenerator + 'static,
{
    // Listing never fails on its parameters; an unparsable query string
    // behaves like an empty one.
    let pairs = pairs.map(|Query(pairs)| pairs).unwrap_or_default();
    let query = ListParams::from_pairs(pairs).into_query();
    let products = blocking(state.repo, move |repo| repo.list(&query)).await?;
    Ok(Json(products))
}

/// `GET /products/:id`
pub(super) async fn get_product<B, G>(
    State(state): State<AppState<B, G>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse>
where
    B: StorageBackend + 'static,
    G: IdGenerator + 'static,
{
    let product = blocking(state.repo, move |repo| repo.get(&id)).await?;
    Ok(Json(product))
}

/// `POST /products`
pub(super) async fn create_product<B, G>(
    State(state): State<AppState<B, G>>,
    body: std::result::Result<Json<Fields>, JsonRejection>,
) -> Result<impl IntoResponse>
where
    B: StorageBackend + 'static,
    G: IdGenerator + 'static,
{
    let fields = body_fields(body)?;
    let product = blocking(state.repo, move |repo| repo.create(fields)).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// `PUT /products/:id`
pub(super) async fn update_product<B, G>(
    State(state): State<AppState<B, G>>,
    Path(id): Path<String>,
    body: std::result::Result<Json<Fields>, JsonRejection>,
) -> Result<impl IntoResponse>
where
    B: StorageBackend + 'static,
    G: IdGenerator + 'static,
{
    let fields = body_fields(body)?;
    let product = blocking(state.repo, move |repo| repo.update(&id, fields)).await?;
    Ok(Json(product))
}

/// `DELETE /products/:id`
pub(super) async fn delete_product<B, G>(
    State(state): State<AppState<B, G>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse>
where
    B: StorageBackend + 'static,
    G: IdGenerator + 'static,
{
    let product = blocking(state.repo, move |repo| repo.delete(&id)).await?;
    Ok(Json(json!({ "message": DELETED_MESSAGE, "product": product })))
}
