//! Error types for the callboard

use thiserror::Error;

/// Board-wide error type
///
/// Transport failure is deliberately absent: a subscriber whose channel
/// has gone away is skipped by the broadcast hub, never surfaced as an
/// error value.
#[derive(Error, Debug)]
pub enum BoardError {
    /// A mutation referenced an order id that is not in the collection
    #[error("order {id} not found")]
    NotFound { id: u64 },

    /// An inbound frame or request body could not be understood
    #[error("malformed input: {0}")]
    MalformedInput(String),
}

impl BoardError {
    pub fn not_found(id: u64) -> Self {
        BoardError::NotFound { id }
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        BoardError::MalformedInput(msg.into())
    }
}

/// Result type alias for board operations
pub type BoardResult<T> = Result<T, BoardError>;
