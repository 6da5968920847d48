pub mod config;
pub mod domain;
pub mod errors;

pub use domain::product::{
    DeleteAck, InvalidProductId, Product, ProductDraft, ProductId, PLACEHOLDER_COVER,
};
pub use errors::{ApplicationError, ErrorPayload};
