//! Business logic for the Callboard queue broadcaster
//!
//! This crate provides the authoritative order store, the mutation
//! service shared by both transport surfaces, and the broadcast hub that
//! fans state snapshots out to connected subscribers.

pub mod hub;
pub mod service;
pub mod store;

pub use hub::{BroadcastHub, ClientId};
pub use service::OrderService;
pub use store::{Advance, OrderStore};
