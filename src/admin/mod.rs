//! Administrative API.
//!
//! An embeddable router for operational dashboards and health checks:
//! read-only breaker state queries plus manual reset. The host
//! application mounts it on whatever listener it already serves.

pub mod auth;
pub mod handlers;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::registry::BreakerRegistry;
use self::auth::admin_auth_middleware;
use self::handlers::*;

/// Shared state for admin handlers.
#[derive(Clone)]
pub struct AdminState {
    pub registry: Arc<BreakerRegistry>,
    pub api_key: String,
}

/// Build the admin router over a registry, protected by a Bearer key.
pub fn router(registry: Arc<BreakerRegistry>, api_key: impl Into<String>) -> Router {
    let state = AdminState {
        registry,
        api_key: api_key.into(),
    };

    Router::new()
        .route("/status", get(get_status))
        .route("/breakers", get(list_breakers))
        .route("/breakers/{name}", get(get_breaker))
        .route("/breakers/{name}/reset", post(reset_breaker))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            admin_auth_middleware,
        ))
        .with_state(state)
}
