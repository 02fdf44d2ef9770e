//! Mutation service shared by both transport surfaces

use std::sync::Arc;

use callboard_core::{BoardResult, Order};
use tracing::debug;

use crate::{Advance, BroadcastHub, OrderStore};

/// Applies mutations to the order store and hands every resulting
/// snapshot to the broadcast hub.
///
/// The WebSocket channel and the HTTP control surface both drive this
/// one service, so a toggle follows the same state machine no matter
/// which surface it arrived on.
pub struct OrderService {
    store: OrderStore,
    hub: Arc<BroadcastHub>,
}

impl OrderService {
    pub fn new(store: OrderStore, hub: Arc<BroadcastHub>) -> Self {
        Self { store, hub }
    }

    pub fn hub(&self) -> &Arc<BroadcastHub> {
        &self.hub
    }

    /// The current collection, with no side effects
    pub fn snapshot(&self) -> Vec<Order> {
        self.store.snapshot()
    }

    /// Create a new waiting order and broadcast the resulting snapshot
    pub fn create(&self) -> Order {
        let order = self.store.create();
        debug!("order {} created", order.id);
        self.hub.publish(self.store.snapshot());
        order
    }

    /// Advance an order and broadcast on success.
    ///
    /// An unknown id leaves the board untouched and nothing is
    /// published; the caller decides how to surface the error.
    pub fn toggle(&self, id: u64) -> BoardResult<Advance> {
        let advance = self.store.advance(id)?;
        match advance {
            Advance::Called(order) => debug!("order {} now calling", order.id),
            Advance::Completed(id) => debug!("order {} completed and removed", id),
        }
        self.hub.publish(self.store.snapshot());
        Ok(advance)
    }

    /// Clear the board and broadcast the empty snapshot
    pub fn reset(&self) {
        self.store.reset();
        debug!("board reset");
        self.hub.publish(self.store.snapshot());
    }
}

impl std::fmt::Debug for OrderService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderService")
            .field("orders", &self.store.snapshot().len())
            .field("hub", &self.hub)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use callboard_core::{BoardError, OrderStatus};

    fn service_with_hub() -> OrderService {
        OrderService::new(OrderStore::new(), Arc::new(BroadcastHub::new()))
    }

    #[tokio::test]
    async fn every_successful_mutation_is_broadcast() {
        let service = service_with_hub();
        let (_id, mut rx) = service.hub().register();

        let order = service.create();
        assert_eq!(order.id, 1);
        assert_eq!(
            rx.recv().await.unwrap(),
            r#"{"type":"state","orders":[{"id":1,"status":"waiting"}]}"#
        );

        assert!(matches!(service.toggle(1), Ok(Advance::Called(_))));
        assert_eq!(
            rx.recv().await.unwrap(),
            r#"{"type":"state","orders":[{"id":1,"status":"calling"}]}"#
        );

        assert!(matches!(service.toggle(1), Ok(Advance::Completed(1))));
        assert_eq!(rx.recv().await.unwrap(), r#"{"type":"state","orders":[]}"#);
    }

    #[tokio::test]
    async fn failed_toggle_publishes_nothing() {
        let service = service_with_hub();
        let (_id, mut rx) = service.hub().register();

        assert!(matches!(
            service.toggle(42),
            Err(BoardError::NotFound { id: 42 })
        ));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn reset_broadcasts_empty_state_to_all() {
        let service = service_with_hub();
        service.create();
        service.create();

        let (_a, mut rx_a) = service.hub().register();
        let (_b, mut rx_b) = service.hub().register();

        service.reset();

        let expected = r#"{"type":"state","orders":[]}"#;
        assert_eq!(rx_a.recv().await.unwrap(), expected);
        assert_eq!(rx_b.recv().await.unwrap(), expected);

        // numbering restarts after a reset
        assert_eq!(service.create().id, 1);
    }

    #[tokio::test]
    async fn broadcast_matches_snapshot_after_mutation() {
        let service = service_with_hub();
        let (_id, mut rx) = service.hub().register();

        service.create();
        service.create();
        service.toggle(1).unwrap();

        // drain to the latest frame and compare against the live snapshot
        let mut last = None;
        while let Ok(frame) = rx.try_recv() {
            last = Some(frame);
        }
        let snapshot = service.snapshot();
        assert_eq!(snapshot[0].status, OrderStatus::Calling);
        assert_eq!(
            last.unwrap(),
            r#"{"type":"state","orders":[{"id":1,"status":"calling"},{"id":2,"status":"waiting"}]}"#
        );
    }
}
