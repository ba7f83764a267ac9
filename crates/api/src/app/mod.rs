//! HTTP application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store + renderer wiring
//! - `routes/`: HTTP routes + handlers (one file per page)
//! - `filters.rs`: query parameters -> product query
//! - `selector.rs`: full page vs. fragment
//! - `render.rs`: HTML / JSON renderers
//! - `dto.rs`: request parameters and page contexts
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use crate::config::StorefrontConfig;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod filters;
pub mod render;
pub mod routes;
pub mod selector;
pub mod services;

pub use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub async fn build_app(config: &StorefrontConfig) -> anyhow::Result<Router> {
    let services = services::build_services(config).await?;
    Ok(router(services))
}

/// Router over already-built services.
pub fn router(services: AppServices) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::request_origin))
                .layer(Extension(Arc::new(services))),
        )
}
