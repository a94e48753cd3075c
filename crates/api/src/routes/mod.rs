//! API routes

pub mod health;
pub mod pages;

use axum::{middleware, routing::get, Router};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::routing::routing_middleware;
use crate::state::AppState;

/// Create all routes with the routing layer wrapped around them.
///
/// The routing middleware runs before route matching, so subdomain requests
/// land on the `/:username` and `/subdomain/...` routes below after their
/// URIs have been rewritten.
pub fn create_router(state: AppState) -> Router {
    let router_state = state.router_state();

    // Health check routes (at root level for infrastructure monitoring)
    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness));

    Router::new()
        .merge(health_routes)
        .route("/", get(pages::landing))
        .route("/404", get(pages::not_found))
        .route("/dashboard", get(pages::dashboard))
        .route("/:username", get(pages::tenant_profile))
        .route("/subdomain/:username/*resource", get(pages::tenant_resource))
        .layer(middleware::from_fn_with_state(
            router_state,
            routing_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .with_state(state)
}
