//! HTTP API server with observability for the cart service.
//!
//! Provides REST endpoints for cart management under `/api/v1`, liveness
//! and readiness probes, and Prometheus metrics, with structured logging
//! (tracing) and per-request IDs. The cart state is generic over
//! `CartStore`, so the full router can be exercised against the in-memory
//! store in tests.

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, patch, post};
use cart_store::CartStore;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use routes::cart::AppState;
pub use routes::health::Readiness;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: CartStore + 'static>(
    state: Arc<AppState<S>>,
    readiness: Readiness,
    metrics_handle: PrometheusHandle,
) -> Router {
    let cart_router = Router::new()
        .route("/cart", get(routes::cart::get_cart::<S>))
        .route("/cart", post(routes::cart::add_item::<S>))
        .route("/cart", delete(routes::cart::clear_cart::<S>))
        .route("/cart/count", get(routes::cart::cart_count::<S>))
        .route("/cart/items/{id}", patch(routes::cart::update_item::<S>))
        .route("/cart/items/{id}", delete(routes::cart::remove_item::<S>))
        .with_state(state);

    let probe_router = Router::new()
        .route("/health", get(routes::health::check))
        .route("/ready", get(routes::health::ready))
        .with_state(readiness);

    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    // Layer order: request IDs are set before TraceLayer records the
    // request, and propagated onto the response on the way out.
    Router::new()
        .nest("/api/v1", cart_router)
        .merge(probe_router)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
