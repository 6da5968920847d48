use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Cover shown for records whose `coverimage` is missing or blank.
pub const PLACEHOLDER_COVER: &str = "https://placehold.co/600x400?text=No+Cover";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub i64);

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("invalid product id `{0}`")]
pub struct InvalidProductId(pub String);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProductId {
    type Err = InvalidProductId;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value.trim().parse::<i64>().map(Self).map_err(|_| InvalidProductId(value.to_string()))
    }
}

/// A catalog record as stored in the `games` table.
///
/// The three attributes are nullable in storage and always present (possibly
/// `null`) on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: Option<String>,
    pub detail: Option<String>,
    pub coverimage: Option<String>,
}

impl Product {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn cover_image(&self) -> &str {
        match self.coverimage.as_deref() {
            Some(uri) if !uri.trim().is_empty() => uri,
            _ => PLACEHOLDER_COVER,
        }
    }
}

/// Request body for create and update.
///
/// Every field is optional; an absent field is written as NULL. Update uses
/// the draft as a full replacement, never as a sparse patch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductDraft {
    pub name: Option<String>,
    pub detail: Option<String>,
    pub coverimage: Option<String>,
}

impl ProductDraft {
    pub fn new(
        name: impl Into<String>,
        detail: impl Into<String>,
        coverimage: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            detail: Some(detail.into()),
            coverimage: Some(coverimage.into()),
        }
    }

    /// Column/value pairs in the shape the store writes them.
    pub fn columns(&self) -> [(&'static str, Option<&str>); 3] {
        [
            ("name", self.name.as_deref()),
            ("detail", self.detail.as_deref()),
            ("coverimage", self.coverimage.as_deref()),
        ]
    }
}

impl From<&Product> for ProductDraft {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            detail: product.detail.clone(),
            coverimage: product.coverimage.clone(),
        }
    }
}

/// Body returned by a successful delete.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteAck {
    pub ok: bool,
}
