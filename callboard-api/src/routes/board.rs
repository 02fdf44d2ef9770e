//! Order control endpoints
//!
//! The request/response counterpart of the push channel. Every mutation
//! applied here runs through the same service as the WebSocket frames,
//! so each success is also broadcast to all connected subscribers.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use callboard_core::Order;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::AppState;

/// Body of a toggle request
#[derive(Debug, Deserialize)]
struct ToggleRequest {
    id: u64,
}

/// Response carrying the full board state
#[derive(Debug, Serialize)]
pub struct StateResponse {
    pub orders: Vec<Order>,
}

/// Generic success acknowledgement
#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Create order control routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/state", get(get_state))
        .route("/add", post(add_order))
        .route("/toggle", post(toggle_order))
        .route("/reset", post(reset_board))
}

/// Current snapshot of the board
async fn get_state(State(state): State<AppState>) -> Json<StateResponse> {
    Json(StateResponse {
        orders: state.service.snapshot(),
    })
}

/// Create a new order and return it.
///
/// The request body, if any, is read in full and ignored.
async fn add_order(State(state): State<AppState>, _body: Bytes) -> Json<Order> {
    Json(state.service.create())
}

/// Advance the order named in the body
async fn toggle_order(State(state): State<AppState>, body: Bytes) -> Response {
    let request: ToggleRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            debug!("rejecting toggle body: {}", e);
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "invalid body".to_string(),
                }),
            )
                .into_response();
        }
    };

    match state.service.toggle(request.id) {
        Ok(_) => (StatusCode::OK, Json(OkResponse { ok: true })).into_response(),
        Err(e) => {
            debug!("toggle rejected: {}", e);
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "not found".to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// Clear the board and broadcast the empty state
async fn reset_board(State(state): State<AppState>) -> Json<OkResponse> {
    state.service.reset();
    Json(OkResponse { ok: true })
}
