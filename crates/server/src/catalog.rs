//! Catalog API routes.
//!
//! - `GET    /products`: every record, store order
//! - `GET    /products/{id}`: one record or 404 `{message}`
//! - `POST   /products`: insert, read back, 201
//! - `PUT    /products/{id}`: existence check, full overwrite, read back
//! - `DELETE /products/{id}`: existence check, delete, `{ok: true}`
//!
//! Store failures answer 500 `{error}` with the underlying message. Nothing
//! here retries.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use gamedeck_core::{
    ApplicationError, DeleteAck, InvalidProductId, Product, ProductDraft, ProductId,
};
use gamedeck_db::repositories::{ProductRepository, RepositoryError};
use tracing::{error, info};
use uuid::Uuid;

#[derive(Clone)]
pub struct CatalogState {
    products: Arc<dyn ProductRepository>,
}

/// Failure leaving a handler, rendered as `{message}` or `{error}`.
#[derive(Debug)]
pub struct CatalogError(pub ApplicationError);

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.0.payload())).into_response()
    }
}

impl From<ApplicationError> for CatalogError {
    fn from(value: ApplicationError) -> Self {
        Self(value)
    }
}

impl From<InvalidProductId> for CatalogError {
    fn from(value: InvalidProductId) -> Self {
        Self(value.into())
    }
}

impl From<JsonRejection> for CatalogError {
    fn from(value: JsonRejection) -> Self {
        Self(ApplicationError::BadRequest(value.body_text()))
    }
}

pub fn router(products: Arc<dyn ProductRepository>) -> Router {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route("/products/{id}", get(get_product).put(update_product).delete(delete_product))
        .with_state(CatalogState { products })
}

fn correlation_id() -> String {
    Uuid::new_v4().simple().to_string()
}

fn store_failure(
    operation: &'static str,
    correlation_id: &str,
    error: RepositoryError,
) -> CatalogError {
    error!(
        event_name = "catalog.api.store_failure",
        correlation_id = %correlation_id,
        operation = operation,
        error = %error,
        "catalog store call failed"
    );
    CatalogError(error.into())
}

async fn list_products(
    State(state): State<CatalogState>,
) -> Result<Json<Vec<Product>>, CatalogError> {
    let correlation_id = correlation_id();
    let products =
        state.products.list().await.map_err(|e| store_failure("list", &correlation_id, e))?;

    info!(
        event_name = "catalog.api.listed",
        correlation_id = %correlation_id,
        count = products.len(),
        "listed games"
    );
    Ok(Json(products))
}

async fn get_product(
    Path(raw_id): Path<String>,
    State(state): State<CatalogState>,
) -> Result<Json<Product>, CatalogError> {
    let id: ProductId = raw_id.parse()?;
    let correlation_id = correlation_id();

    match state.products.find_by_id(id).await {
        Ok(Some(product)) => Ok(Json(product)),
        Ok(None) => Err(ApplicationError::product_not_found(id).into()),
        Err(error) => Err(store_failure("get", &correlation_id, error)),
    }
}

async fn create_product(
    State(state): State<CatalogState>,
    body: Result<Json<ProductDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), CatalogError> {
    let Json(draft) = body?;
    let correlation_id = correlation_id();

    let product = state
        .products
        .create(draft)
        .await
        .map_err(|e| store_failure("create", &correlation_id, e))?;

    info!(
        event_name = "catalog.api.created",
        correlation_id = %correlation_id,
        product_id = %product.id,
        "game created"
    );
    Ok((StatusCode::CREATED, Json(product)))
}

async fn update_product(
    Path(raw_id): Path<String>,
    State(state): State<CatalogState>,
    body: Result<Json<ProductDraft>, JsonRejection>,
) -> Result<Json<Product>, CatalogError> {
    let id: ProductId = raw_id.parse()?;
    let Json(draft) = body?;
    let correlation_id = correlation_id();

    let updated = state
        .products
        .update(id, draft)
        .await
        .map_err(|e| store_failure("update", &correlation_id, e))?;

    match updated {
        Some(product) => {
            info!(
                event_name = "catalog.api.updated",
                correlation_id = %correlation_id,
                product_id = %id,
                "game updated"
            );
            Ok(Json(product))
        }
        None => Err(ApplicationError::missing_target().into()),
    }
}

async fn delete_product(
    Path(raw_id): Path<String>,
    State(state): State<CatalogState>,
) -> Result<Json<DeleteAck>, CatalogError> {
    let id: ProductId = raw_id.parse()?;
    let correlation_id = correlation_id();

    let deleted =
        state.products.delete(id).await.map_err(|e| store_failure("delete", &correlation_id, e))?;
    if !deleted {
        return Err(ApplicationError::missing_target().into());
    }

    info!(
        event_name = "catalog.api.deleted",
        correlation_id = %correlation_id,
        product_id = %id,
        "game deleted"
    );
    Ok(Json(DeleteAck { ok: true }))
}
