//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: dataset, role catalog and query dispatcher shared by handlers
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request bodies and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

pub use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests).
pub fn build_app(services: AppServices) -> Router {
    let services = Arc::new(services);

    // Data routes: require a role.
    let protected = routes::router()
        .route_layer(axum::middleware::from_fn(middleware::role_middleware));

    Router::new()
        .route("/health", get(routes::system::health))
        .route("/roles", get(routes::roles::list_roles))
        .route("/examples", get(routes::system::examples))
        .merge(protected)
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::request_id_middleware))
                .layer(Extension(services)),
        )
}
