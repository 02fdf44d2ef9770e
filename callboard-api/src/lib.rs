//! Callboard server library
//!
//! Wires the order service into an axum application serving the HTTP
//! control surface and the WebSocket push channel on one port.

pub mod routes;

use std::sync::Arc;

use axum::{middleware, Router};
use callboard_services::OrderService;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<OrderService>,
}

/// Build the full application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(routes::api_routes())
        .merge(routes::ws_routes())
        .fallback(routes::not_found)
        .method_not_allowed_fallback(routes::not_found)
        .layer(middleware::from_fn(routes::cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
