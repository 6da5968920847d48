use gamedeck_core::{Product, ProductId};

use crate::api::{ApiError, CatalogApi};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProductDetails {
    Loaded(Product),
    NotFound,
    Failed(String),
}

impl ProductDetails {
    pub async fn load<A: CatalogApi + ?Sized>(api: &A, id: ProductId) -> Self {
        match api.get(id).await {
            Ok(product) => Self::Loaded(product),
            Err(ApiError::NotFound(_)) => Self::NotFound,
            Err(error) => Self::Failed(error.to_string()),
        }
    }

    pub fn product(&self) -> Option<&Product> {
        match self {
            Self::Loaded(product) => Some(product),
            _ => None,
        }
    }
}
