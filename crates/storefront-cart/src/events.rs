//! Cart change notifications.
//!
//! [`CartStore`](crate::CartStore) is the only publisher. Any number of
//! components subscribe without holding a reference to one another; the
//! header badge is the canonical subscriber.

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};

use crate::store::CartStore;

/// Snapshot published after every persisted cart mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartEvent {
    /// Sum of quantities across all lines.
    pub count: u64,
    /// Sum of `price * quantity` across all lines.
    pub total: i64,
}

/// Badge counter that follows the cart from outside the component that
/// mutates it.
#[derive(Debug)]
pub struct CartBadge {
    count: u64,
    rx: broadcast::Receiver<CartEvent>,
}

impl CartBadge {
    /// Subscribes first and reads the current count second, so no mutation
    /// can slip between the two.
    #[must_use]
    pub fn attach(cart: &CartStore) -> Self {
        let rx = cart.subscribe();
        Self {
            count: cart.count(),
            rx,
        }
    }

    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Applies every pending notification without waiting and returns how
    /// many were seen. A lagged receiver skips ahead; only the latest
    /// snapshot matters for a counter.
    pub fn sync(&mut self) -> usize {
        let mut seen = 0;
        loop {
            match self.rx.try_recv() {
                Ok(event) => {
                    self.count = event.count;
                    seen += 1;
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "cart badge lagged behind; catching up");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => return seen,
            }
        }
    }

    /// Waits for the next notification and returns the new count, or `None`
    /// once the cart store is gone.
    pub async fn changed(&mut self) -> Option<u64> {
        loop {
            match self.rx.recv().await {
                Ok(event) => {
                    self.count = event.count;
                    return Some(self.count);
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "cart badge lagged behind; catching up");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}
