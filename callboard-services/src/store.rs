//! Authoritative in-memory order store
//!
//! Holds the canonical order collection and the ticket-number generator.

use callboard_core::{BoardError, BoardResult, Order, OrderStatus};
use parking_lot::Mutex;

/// Outcome of advancing an order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The order moved from waiting to calling and is still on the board
    Called(Order),
    /// The order was already calling and has been removed
    Completed(u64),
}

#[derive(Debug)]
struct StoreInner {
    orders: Vec<Order>,
    next_id: u64,
}

/// Canonical collection of live orders plus the id generator.
///
/// Every operation takes the one lock, so a snapshot can never observe a
/// half-applied mutation and two concurrent `create` calls can never be
/// handed the same ticket number. Nothing awaits while the lock is held.
#[derive(Debug)]
pub struct OrderStore {
    inner: Mutex<StoreInner>,
}

impl OrderStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(StoreInner {
                orders: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// The current collection, in insertion order
    pub fn snapshot(&self) -> Vec<Order> {
        self.inner.lock().orders.clone()
    }

    /// Append a new waiting order under the next ticket number
    pub fn create(&self) -> Order {
        let mut inner = self.inner.lock();
        let order = Order::waiting(inner.next_id);
        inner.next_id += 1;
        inner.orders.push(order);
        order
    }

    /// Advance the order with the given id.
    ///
    /// A waiting order moves to calling and stays on the board; a calling
    /// order is removed from the collection entirely.
    pub fn advance(&self, id: u64) -> BoardResult<Advance> {
        let mut inner = self.inner.lock();
        let idx = inner
            .orders
            .iter()
            .position(|o| o.id == id)
            .ok_or(BoardError::NotFound { id })?;

        match inner.orders[idx].status {
            OrderStatus::Waiting => {
                inner.orders[idx].status = OrderStatus::Calling;
                Ok(Advance::Called(inner.orders[idx]))
            }
            OrderStatus::Calling => {
                inner.orders.remove(idx);
                Ok(Advance::Completed(id))
            }
        }
    }

    /// Clear the collection and return the ticket counter to 1.
    ///
    /// Counter policy: a reset board starts numbering from 1 again. The
    /// counter never changes otherwise.
    pub fn reset(&self) {
        let mut inner = self.inner.lock();
        inner.orders.clear();
        inner.next_id = 1;
    }
}

impl Default for OrderStore {
    fn default() -> Self {
        Self::new()
    }
}
