use async_trait::async_trait;
use thiserror::Error;

use gamedeck_core::domain::product::{Product, ProductDraft, ProductId};
use gamedeck_core::errors::ApplicationError;

pub mod memory;
pub mod product;

pub use memory::InMemoryProductRepository;
pub use product::SqlProductRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
}

impl From<RepositoryError> for ApplicationError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::Database(error) => Self::Persistence(error.to_string()),
            RepositoryError::Decode(message) => Self::Persistence(message),
        }
    }
}

/// Catalog store contract.
///
/// `update` and `delete` check existence before writing and report a missing
/// target as `None`/`false`, including when the row disappears between the
/// check and the write. No operation retries.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Product>, RepositoryError>;

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError>;

    /// Inserts the draft and reads the stored row back.
    async fn create(&self, draft: ProductDraft) -> Result<Product, RepositoryError>;

    /// Overwrites all three attributes; absent draft fields become NULL.
    async fn update(
        &self,
        id: ProductId,
        draft: ProductDraft,
    ) -> Result<Option<Product>, RepositoryError>;

    async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError>;
}
