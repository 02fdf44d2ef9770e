//! Broadcast hub for push-channel subscribers
//!
//! Tracks the live set of connected subscribers and fans serialized
//! state frames out to each of them.

use std::sync::atomic::{AtomicU64, Ordering};

use callboard_core::{Order, ServerFrame};
use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

/// Unique handle for a connected subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientId(pub u64);

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "client-{}", self.0)
    }
}

/// Frames one subscriber can have queued before deliveries to it start
/// being dropped. A dropped subscriber resyncs on its next `subscribe`.
const SUBSCRIBER_BUFFER: usize = 64;

/// Live subscriber registry with fan-out delivery.
///
/// Each subscriber owns the receiving half of a bounded channel; the hub
/// keeps the sending half. Delivery is `try_send`, so one stalled socket
/// can never hold up a publish to the others, and frames pushed through
/// one channel arrive in publish order.
pub struct BroadcastHub {
    /// Next subscriber handle to hand out
    next_client_id: AtomicU64,
    /// Map of subscriber handle -> sink into that subscriber's writer task
    sinks: DashMap<ClientId, mpsc::Sender<String>>,
}

impl BroadcastHub {
    pub fn new() -> Self {
        Self {
            next_client_id: AtomicU64::new(1),
            sinks: DashMap::new(),
        }
    }

    /// Add a subscriber to the live set.
    ///
    /// Does not push anything; the transport sends the initial snapshot
    /// itself as part of connection setup.
    pub fn register(&self) -> (ClientId, mpsc::Receiver<String>) {
        let id = ClientId(self.next_client_id.fetch_add(1, Ordering::SeqCst));
        let (tx, rx) = mpsc::channel(SUBSCRIBER_BUFFER);
        self.sinks.insert(id, tx);
        debug!("subscriber {} registered", id);
        (id, rx)
    }

    /// Drop a subscriber from the live set. Safe to call for a handle
    /// that was already removed.
    pub fn unregister(&self, id: ClientId) {
        if self.sinks.remove(&id).is_some() {
            debug!("subscriber {} unregistered", id);
        }
    }

    /// Send the given snapshot to a single subscriber only.
    ///
    /// Used for connect-time synchronization and `subscribe` replies; it
    /// shares the subscriber's ordered channel with `publish`, so a
    /// targeted state frame can never overtake a broadcast one.
    pub fn send_state_to(&self, id: ClientId, orders: Vec<Order>) {
        let Some(frame) = encode_state(orders) else {
            return;
        };
        if let Some(tx) = self.sinks.get(&id) {
            if tx.try_send(frame).is_err() {
                warn!("subscriber {} not accepting frames, state reply dropped", id);
            }
        }
    }

    /// Serialize the snapshot once and attempt delivery to every
    /// registered subscriber.
    ///
    /// A subscriber with a full or closed sink is skipped, not failed:
    /// its connection task owns unregistering it on close.
    pub fn publish(&self, orders: Vec<Order>) {
        let Some(frame) = encode_state(orders) else {
            return;
        };
        for entry in self.sinks.iter() {
            match entry.value().try_send(frame.clone()) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    warn!("subscriber {} lagging, dropped a state frame", entry.key());
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    debug!("subscriber {} sink closed, awaiting unregister", entry.key());
                }
            }
        }
    }

    /// Number of currently registered subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sinks.len()
    }
}

impl Default for BroadcastHub {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BroadcastHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BroadcastHub")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

fn encode_state(orders: Vec<Order>) -> Option<String> {
    match serde_json::to_string(&ServerFrame::State { orders }) {
        Ok(frame) => Some(frame),
        Err(e) => {
            error!("failed to serialize state frame: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_reaches_every_registered_subscriber() {
        let hub = BroadcastHub::new();
        let (_a, mut rx_a) = hub.register();
        let (_b, mut rx_b) = hub.register();

        hub.publish(vec![Order::waiting(1)]);

        let expected = r#"{"type":"state","orders":[{"id":1,"status":"waiting"}]}"#;
        assert_eq!(rx_a.recv().await.unwrap(), expected);
        assert_eq!(rx_b.recv().await.unwrap(), expected);
    }

    #[tokio::test]
    async fn send_state_to_targets_one_subscriber() {
        let hub = BroadcastHub::new();
        let (id_a, mut rx_a) = hub.register();
        let (_b, mut rx_b) = hub.register();

        hub.send_state_to(id_a, vec![]);

        assert_eq!(
            rx_a.recv().await.unwrap(),
            r#"{"type":"state","orders":[]}"#
        );
        assert!(rx_b.try_recv().is_err());
    }

    #[tokio::test]
    async fn unregister_is_idempotent_and_stops_delivery() {
        let hub = BroadcastHub::new();
        let (id, mut rx) = hub.register();

        hub.unregister(id);
        hub.unregister(id);
        assert_eq!(hub.subscriber_count(), 0);

        hub.publish(vec![]);
        // channel is closed once the sender is dropped from the registry
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn full_sink_is_skipped_without_blocking_others() {
        let hub = BroadcastHub::new();
        let (_slow, mut slow_rx) = hub.register();
        let (_live, mut live_rx) = hub.register();

        // fill both buffers, then drain only the live subscriber
        for _ in 0..SUBSCRIBER_BUFFER {
            hub.publish(vec![]);
        }
        let mut drained = 0;
        while live_rx.try_recv().is_ok() {
            drained += 1;
        }
        assert_eq!(drained, SUBSCRIBER_BUFFER);

        // further publishes drop for the stalled subscriber but still
        // reach the live one
        for _ in 0..5 {
            hub.publish(vec![Order::waiting(1)]);
        }
        let mut live_count = 0;
        while live_rx.try_recv().is_ok() {
            live_count += 1;
        }
        assert_eq!(live_count, 5);

        let mut slow_count = 0;
        while slow_rx.try_recv().is_ok() {
            slow_count += 1;
        }
        assert_eq!(slow_count, SUBSCRIBER_BUFFER);
    }
}
