//! Order data structures for the callboard

use serde::{Deserialize, Serialize};

/// Live status of a queued order
///
/// There is no completed state on the wire; a completed order is simply
/// removed from the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order is queued and being prepared
    Waiting,
    /// Order is ready and its number is being called
    Calling,
}

/// A single queued ticket on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Ticket number, unique for the life of the process and assigned in
    /// strictly increasing creation order starting at 1
    pub id: u64,
    /// Current live status
    pub status: OrderStatus,
}

impl Order {
    /// A freshly queued order under the given ticket number
    pub fn waiting(id: u64) -> Self {
        Self {
            id,
            status: OrderStatus::Waiting,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_lowercase() {
        let order = Order::waiting(3);
        let json = serde_json::to_string(&order).unwrap();
        assert_eq!(json, r#"{"id":3,"status":"waiting"}"#);

        let called = Order {
            id: 3,
            status: OrderStatus::Calling,
        };
        let json = serde_json::to_string(&called).unwrap();
        assert_eq!(json, r#"{"id":3,"status":"calling"}"#);
    }
}
