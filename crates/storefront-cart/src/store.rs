//! The persisted shopping cart.
//!
//! Every mutation follows the same sequence while holding the cart lock:
//! build the next list, write the whole list to storage, swap it into memory,
//! then publish a [`CartEvent`]. Holding the lock across the write keeps
//! storage writes in call order, and publishing last means a subscriber that
//! reacts to the event always observes the new persisted value.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::broadcast;

use storefront_core::CartItem;

use crate::error::CartError;
use crate::events::CartEvent;
use crate::storage::KvStore;

/// Storage key holding the serialized cart list.
pub const CART_KEY: &str = "cart";

const EVENT_CAPACITY: usize = 64;

pub struct CartStore {
    storage: Arc<dyn KvStore>,
    items: Mutex<Vec<CartItem>>,
    events: broadcast::Sender<CartEvent>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("items", &self.lock().len())
            .field("subscribers", &self.events.receiver_count())
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Reads the persisted cart.
    ///
    /// Missing, unreadable, or malformed data yields an empty cart; the
    /// failure is logged and never returned. Duplicate variant lines left by
    /// an older writer are merged and zero-quantity lines dropped.
    pub fn load(storage: Arc<dyn KvStore>) -> Self {
        let items = match storage.get(CART_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<CartItem>>(&raw) {
                Ok(items) => normalize(items),
                Err(e) => {
                    tracing::warn!(error = %e, "persisted cart is malformed; starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "could not read persisted cart; starting empty");
                Vec::new()
            }
        };
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            storage,
            items: Mutex::new(items),
            events,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<CartItem>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers a new listener for cart changes.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.events.subscribe()
    }

    /// Snapshot of the current lines in insertion order.
    #[must_use]
    pub fn items(&self) -> Vec<CartItem> {
        self.lock().clone()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Sum of `price * quantity` over all lines.
    #[must_use]
    pub fn total(&self) -> i64 {
        total_of(&self.lock())
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn count(&self) -> u64 {
        count_of(&self.lock())
    }

    /// Adds `item`, or increases the quantity of the line with the same
    /// variant.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidQuantity`]: `item.quantity` is zero.
    /// - [`CartError::Storage`] / [`CartError::Serialize`]: the write failed;
    ///   the in-memory cart is left unchanged.
    pub fn add(&self, item: CartItem) -> Result<(), CartError> {
        if item.quantity == 0 {
            return Err(CartError::InvalidQuantity {
                variant_id: item.variant_id,
            });
        }
        let variant_id = item.variant_id;
        let added = item.quantity;
        self.mutate(|items| {
            match items.iter_mut().find(|line| line.variant_id == item.variant_id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(item.quantity);
                }
                None => items.push(item),
            }
        })?;
        tracing::debug!(variant_id, added, "cart line added");
        Ok(())
    }

    /// Sets the quantity of the line for `variant_id`.
    ///
    /// Quantities below 1 are ignored: nothing is written or published and
    /// `Ok(false)` is returned.
    ///
    /// # Errors
    ///
    /// Returns [`CartError`] if the write fails.
    pub fn update_quantity(&self, variant_id: i64, new_quantity: i64) -> Result<bool, CartError> {
        if new_quantity < 1 {
            return Ok(false);
        }
        let quantity = u32::try_from(new_quantity).unwrap_or(u32::MAX);
        self.mutate(|items| {
            for line in items.iter_mut().filter(|line| line.variant_id == variant_id) {
                line.quantity = quantity;
            }
        })?;
        Ok(true)
    }

    /// Drops the line for `variant_id`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError`] if the write fails.
    pub fn remove(&self, variant_id: i64) -> Result<(), CartError> {
        self.mutate(|items| items.retain(|line| line.variant_id != variant_id))
    }

    /// Empties the cart and deletes its persisted entry.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Storage`] if the entry cannot be removed.
    pub fn clear(&self) -> Result<(), CartError> {
        let mut items = self.lock();
        self.storage.remove(CART_KEY)?;
        items.clear();
        self.publish(&items);
        tracing::debug!("cart cleared");
        Ok(())
    }

    fn mutate<F>(&self, change: F) -> Result<(), CartError>
    where
        F: FnOnce(&mut Vec<CartItem>),
    {
        let mut items = self.lock();
        let mut next = items.clone();
        change(&mut next);
        let raw = serde_json::to_string(&next)?;
        self.storage.set(CART_KEY, &raw)?;
        *items = next;
        self.publish(&items);
        Ok(())
    }

    fn publish(&self, items: &[CartItem]) {
        let event = CartEvent {
            count: count_of(items),
            total: total_of(items),
        };
        // No subscribers is fine; the badge may not be mounted.
        self.events.send(event).ok();
    }
}

fn total_of(items: &[CartItem]) -> i64 {
    items
        .iter()
        .map(CartItem::line_total)
        .fold(0i64, i64::saturating_add)
}

fn count_of(items: &[CartItem]) -> u64 {
    items.iter().map(|line| u64::from(line.quantity)).sum()
}

fn normalize(raw: Vec<CartItem>) -> Vec<CartItem> {
    let mut items: Vec<CartItem> = Vec::with_capacity(raw.len());
    for line in raw.into_iter().filter(|line| line.quantity > 0) {
        match items.iter_mut().find(|l| l.variant_id == line.variant_id) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(line.quantity),
            None => items.push(line),
        }
    }
    items
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
