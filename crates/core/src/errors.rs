use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::product::{InvalidProductId, ProductId};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error("{0}")]
    NotFound(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("persistence failure: {0}")]
    Persistence(String),
}

/// Error bodies on the wire: `{message}` for not-found, `{error}` otherwise.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorPayload {
    NotFound { message: String },
    Failure { error: String },
}

impl ErrorPayload {
    pub fn text(&self) -> &str {
        match self {
            Self::NotFound { message } => message,
            Self::Failure { error } => error,
        }
    }
}

impl ApplicationError {
    pub fn product_not_found(id: ProductId) -> Self {
        Self::NotFound(format!("Games with id {id} not found"))
    }

    pub fn missing_target() -> Self {
        Self::NotFound("Not found".to_owned())
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::BadRequest(_) => 400,
            Self::Unauthorized(_) => 401,
            Self::Persistence(_) => 500,
        }
    }

    pub fn payload(&self) -> ErrorPayload {
        match self {
            Self::NotFound(message) => ErrorPayload::NotFound { message: message.clone() },
            Self::BadRequest(error) | Self::Unauthorized(error) | Self::Persistence(error) => {
                ErrorPayload::Failure { error: error.clone() }
            }
        }
    }
}

impl From<InvalidProductId> for ApplicationError {
    fn from(value: InvalidProductId) -> Self {
        Self::BadRequest(value.to_string())
    }
}
