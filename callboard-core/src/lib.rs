//! Core types for the Callboard queue broadcaster
//!
//! This crate defines the shared data structures used across the board:
//! live orders, the push-channel wire protocol, and the error taxonomy.

pub mod error;
pub mod order;
pub mod protocol;

pub use error::{BoardError, BoardResult};
pub use order::{Order, OrderStatus};
pub use protocol::{ClientFrame, ServerFrame};
