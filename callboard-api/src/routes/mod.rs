//! API route definitions

mod board;
mod health;
pub mod ws;

use axum::{
    extract::Request,
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
    Router,
};

use crate::AppState;
pub use board::ErrorResponse;

/// Create the control-surface routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(board::routes())
        .merge(health::routes())
}

/// Create WebSocket routes (separate from the control surface)
pub fn ws_routes() -> Router<AppState> {
    ws::routes()
}

/// Generic not-found payload for unrecognized method/path combinations
pub async fn not_found() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "not found".to_string(),
        }),
    )
}

/// Attach permissive cross-origin headers to every response and answer
/// preflight requests directly with an empty 204.
///
/// `tower_http`'s CorsLayer pins preflight responses to 200, so the
/// handful of headers is set here instead.
pub async fn cors(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        let mut response = StatusCode::NO_CONTENT.into_response();
        cors_headers(response.headers_mut());
        return response;
    }

    let mut response = next.run(request).await;
    cors_headers(response.headers_mut());
    response
}

fn cors_headers(headers: &mut HeaderMap) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("content-type"),
    );
}
