pub mod auth;
pub mod bootstrap;
pub mod catalog;
pub mod health;

use std::sync::Arc;

use axum::{middleware, Router};
use gamedeck_core::config::AuthConfig;
use gamedeck_db::{repositories::SqlProductRepository, DbPool};

use crate::auth::{require_bearer, AuthGate};

/// Catalog routes behind the bearer gate, plus the ungated health check.
pub fn app(db_pool: DbPool, auth: AuthConfig) -> Router {
    let products = Arc::new(SqlProductRepository::new(db_pool.clone()));

    catalog::router(products)
        .layer(middleware::from_fn_with_state(AuthGate::new(auth), require_bearer))
        .merge(health::router(db_pool))
}
