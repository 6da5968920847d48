//! Bearer-token gate in front of the catalog routes.
//!
//! Session issuance belongs to the identity provider; this layer only checks
//! that a request carries one of the configured tokens. With no tokens
//! configured every request passes.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};
use gamedeck_core::{config::AuthConfig, ApplicationError};
use tracing::warn;

use crate::catalog::CatalogError;

#[derive(Clone)]
pub struct AuthGate {
    config: Arc<AuthConfig>,
}

impl AuthGate {
    pub fn new(config: AuthConfig) -> Self {
        Self { config: Arc::new(config) }
    }

    fn check(&self, authorization: Option<&str>) -> Result<(), ApplicationError> {
        if !self.config.is_enabled() {
            return Ok(());
        }

        let Some(header) = authorization else {
            return Err(ApplicationError::Unauthorized("bearer token required".to_string()));
        };
        let token = header.strip_prefix("Bearer ").map(str::trim).unwrap_or_default();
        if token.is_empty() || !self.config.accepts(token) {
            return Err(ApplicationError::Unauthorized("invalid bearer token".to_string()));
        }

        Ok(())
    }
}

pub async fn require_bearer(
    State(gate): State<AuthGate>,
    request: Request,
    next: Next,
) -> Response {
    let authorization = request.headers().get(AUTHORIZATION).and_then(|value| value.to_str().ok());

    match gate.check(authorization) {
        Ok(()) => next.run(request).await,
        Err(error) => {
            warn!(
                event_name = "catalog.auth.rejected",
                path = %request.uri().path(),
                reason = %error,
                "request rejected by bearer gate"
            );
            CatalogError(error).into_response()
        }
    }
}
