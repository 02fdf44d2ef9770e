//! WebSocket route handler
//!
//! Handles the WebSocket upgrade and drives one subscriber's frame loop.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
    routing::get,
    Router,
};
use callboard_core::ClientFrame;
use callboard_services::{ClientId, OrderService};
use futures_util::{SinkExt, StreamExt};
use tracing::{debug, info};

use crate::AppState;

/// Create WebSocket routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/ws", get(ws_handler))
}

/// WebSocket upgrade handler
async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle an established WebSocket connection
async fn handle_socket(socket: WebSocket, state: AppState) {
    let service = state.service;
    let (mut sender, mut receiver) = socket.split();

    let (client_id, mut outgoing_rx) = service.hub().register();
    info!("subscriber {} connected", client_id);

    // Synchronize the new subscriber before any later broadcast reaches it
    service.hub().send_state_to(client_id, service.snapshot());

    // Task: drain the hub sink into the socket
    let send_task = tokio::spawn(async move {
        while let Some(frame) = outgoing_rx.recv().await {
            if sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    });

    while let Some(result) = receiver.next().await {
        match result {
            Ok(Message::Text(text)) => handle_frame(&service, client_id, &text),
            Ok(Message::Binary(_)) => {
                // binary is not part of the protocol; same fate as any
                // other malformed frame
                debug!("subscriber {} sent a binary frame, dropping", client_id);
            }
            Ok(Message::Close(_)) => break,
            // ping/pong are answered by the protocol layer
            Ok(_) => {}
            Err(e) => {
                debug!("subscriber {} socket error: {}", client_id, e);
                break;
            }
        }
    }

    service.hub().unregister(client_id);
    send_task.abort();
    info!("subscriber {} disconnected", client_id);
}

/// Apply one inbound frame.
///
/// Malformed frames are dropped here on purpose: logged, never answered,
/// never broadcast, and the connection stays open.
fn handle_frame(service: &OrderService, client_id: ClientId, text: &str) {
    let frame: ClientFrame = match serde_json::from_str(text) {
        Ok(frame) => frame,
        Err(e) => {
            debug!("subscriber {} sent a malformed frame, dropping: {}", client_id, e);
            return;
        }
    };

    match frame {
        ClientFrame::Subscribe => {
            service.hub().send_state_to(client_id, service.snapshot());
        }
        ClientFrame::Add => {
            service.create();
        }
        ClientFrame::Toggle { id } => {
            if let Err(e) = service.toggle(id) {
                debug!("subscriber {} toggle ignored: {}", client_id, e);
            }
        }
    }
}
