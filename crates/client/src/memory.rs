use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use gamedeck_core::{Product, ProductDraft, ProductId};

use crate::api::{ApiError, CatalogApi};

#[derive(Debug, Default)]
struct Catalog {
    last_id: i64,
    rows: Vec<Product>,
    fail_with: Option<ApiError>,
    delete_calls: Vec<ProductId>,
}

/// Catalog API held in memory, with the same not-found answers the server gives.
#[derive(Debug, Default)]
pub struct InMemoryCatalogApi {
    inner: Mutex<Catalog>,
}

impl InMemoryCatalogApi {
    pub fn with_products(rows: Vec<Product>) -> Self {
        let last_id = rows.iter().map(|product| product.id.0).max().unwrap_or(0);
        Self { inner: Mutex::new(Catalog { last_id, rows, ..Catalog::default() }) }
    }

    /// Every subsequent call fails with `error` until cleared.
    pub fn fail_with(&self, error: Option<ApiError>) {
        self.lock().fail_with = error;
    }

    pub fn delete_calls(&self) -> Vec<ProductId> {
        self.lock().delete_calls.clone()
    }

    pub fn rows(&self) -> Vec<Product> {
        self.lock().rows.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Catalog> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn guard(&self) -> Result<MutexGuard<'_, Catalog>, ApiError> {
        let catalog = self.lock();
        match &catalog.fail_with {
            Some(error) => Err(error.clone()),
            None => Ok(catalog),
        }
    }
}

fn not_found() -> ApiError {
    ApiError::NotFound("Not found".to_string())
}

#[async_trait]
impl CatalogApi for InMemoryCatalogApi {
    async fn list(&self) -> Result<Vec<Product>, ApiError> {
        Ok(self.guard()?.rows.clone())
    }

    async fn get(&self, id: ProductId) -> Result<Product, ApiError> {
        self.guard()?
            .rows
            .iter()
            .find(|product| product.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("Games with id {id} not found")))
    }

    async fn create(&self, draft: &ProductDraft) -> Result<Product, ApiError> {
        let mut catalog = self.guard()?;
        catalog.last_id += 1;
        let product = Product {
            id: ProductId(catalog.last_id),
            name: draft.name.clone(),
            detail: draft.detail.clone(),
            coverimage: draft.coverimage.clone(),
        };
        catalog.rows.push(product.clone());
        Ok(product)
    }

    async fn update(&self, id: ProductId, draft: &ProductDraft) -> Result<Product, ApiError> {
        let mut catalog = self.guard()?;
        let product =
            catalog.rows.iter_mut().find(|product| product.id == id).ok_or_else(not_found)?;
        product.name = draft.name.clone();
        product.detail = draft.detail.clone();
        product.coverimage = draft.coverimage.clone();
        Ok(product.clone())
    }

    async fn delete(&self, id: ProductId) -> Result<(), ApiError> {
        let mut catalog = self.lock();
        catalog.delete_calls.push(id);
        if let Some(error) = &catalog.fail_with {
            return Err(error.clone());
        }
        let before = catalog.rows.len();
        catalog.rows.retain(|product| product.id != id);
        if catalog.rows.len() == before {
            return Err(not_found());
        }
        Ok(())
    }
}
