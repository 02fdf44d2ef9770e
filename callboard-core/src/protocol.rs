//! Wire protocol for the push channel
//!
//! These types define the JSON frames exchanged over the persistent
//! WebSocket connection between the board server and its viewer/admin
//! clients.

use serde::{Deserialize, Serialize};

use crate::Order;

// ============================================================================
// Client -> Server Frames
// ============================================================================

/// Frames sent from client to server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientFrame {
    /// Ask for the current state to be resent to this connection only
    Subscribe,
    /// Create a new order; the resulting state is broadcast to everyone
    Add,
    /// Advance the order with the given id
    ///
    /// A waiting order moves to calling; a calling order is removed. An
    /// unknown id is a no-op.
    Toggle { id: u64 },
}

// ============================================================================
// Server -> Client Frames
// ============================================================================

/// Frames sent from server to client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerFrame {
    /// Full snapshot of the currently live orders, sent on connect, on
    /// `subscribe`, and after every successful mutation
    State { orders: Vec<Order> },
}
