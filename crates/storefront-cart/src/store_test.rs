use std::sync::{Arc, Mutex};

use tokio::sync::broadcast::error::TryRecvError;

use super::*;
use crate::error::StorageError;
use crate::events::CartBadge;
use crate::storage::MemoryStore;

fn item(variant_id: i64, price: i64, quantity: u32) -> CartItem {
    CartItem {
        product_id: variant_id / 10,
        product_name: format!("Sản phẩm {variant_id}"),
        slug: format!("san-pham-{variant_id}"),
        image: storefront_core::cart::PLACEHOLDER_IMAGE.to_string(),
        variant_id,
        price,
        quantity,
        unit: storefront_core::cart::DEFAULT_UNIT.to_string(),
    }
}

fn fresh() -> (Arc<MemoryStore>, CartStore) {
    let storage = Arc::new(MemoryStore::new());
    let cart = CartStore::load(storage.clone());
    (storage, cart)
}

fn persisted(storage: &MemoryStore) -> Option<Vec<CartItem>> {
    storage
        .get(CART_KEY)
        .unwrap()
        .map(|raw| serde_json::from_str(&raw).unwrap())
}

/// Storage whose writes fail on demand.
#[derive(Default)]
struct FlakyStore {
    inner: MemoryStore,
    fail_writes: Mutex<bool>,
}

impl KvStore for FlakyStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if *self.fail_writes.lock().unwrap() {
            return Err(StorageError::Io {
                path: key.into(),
                source: std::io::Error::other("disk full"),
            });
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key)
    }
}

/// Storage that records, at each write, whether a change event had already
/// been delivered to the watching receiver.
struct WatchingStore {
    inner: MemoryStore,
    rx: Mutex<Option<tokio::sync::broadcast::Receiver<CartEvent>>>,
    early_events: Mutex<usize>,
}

impl KvStore for WatchingStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(rx) = self.rx.lock().unwrap().as_mut() {
            while rx.try_recv().is_ok() {
                *self.early_events.lock().unwrap() += 1;
            }
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key)
    }
}

#[test]
fn load_of_missing_or_malformed_cart_is_empty() {
    let (_, cart) = fresh();
    assert!(cart.items().is_empty());

    let storage = Arc::new(MemoryStore::new());
    storage.set(CART_KEY, "{not json").unwrap();
    let cart = CartStore::load(storage);
    assert!(cart.items().is_empty());
    assert_eq!(cart.total(), 0);
}

#[test]
fn load_merges_duplicate_variants() {
    let storage = Arc::new(MemoryStore::new());
    let raw = serde_json::to_string(&vec![item(11, 100, 1), item(12, 50, 0), item(11, 100, 2)])
        .unwrap();
    storage.set(CART_KEY, &raw).unwrap();

    let cart = CartStore::load(storage);
    let items = cart.items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].quantity, 3);
}

#[test]
fn add_merges_by_variant_and_persists() {
    let (storage, cart) = fresh();
    cart.add(item(11, 120_000, 1)).unwrap();
    cart.add(item(21, 35_000, 2)).unwrap();
    cart.add(item(11, 120_000, 2)).unwrap();

    let items = cart.items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].variant_id, 11);
    assert_eq!(items[0].quantity, 3);
    assert_eq!(cart.count(), 5);
    assert_eq!(cart.total(), 430_000);
    assert_eq!(persisted(&storage).unwrap(), items);
}

#[test]
fn add_rejects_zero_quantity() {
    let (storage, cart) = fresh();
    let err = cart.add(item(11, 100, 0)).unwrap_err();
    assert!(matches!(err, CartError::InvalidQuantity { variant_id: 11 }));
    assert!(persisted(&storage).is_none());
}

#[test]
fn update_quantity_below_one_is_ignored() {
    let (storage, cart) = fresh();
    cart.add(item(11, 100, 2)).unwrap();
    let mut rx = cart.subscribe();

    assert!(!cart.update_quantity(11, 0).unwrap());
    assert!(!cart.update_quantity(11, -3).unwrap());
    assert_eq!(cart.items()[0].quantity, 2);
    assert_eq!(persisted(&storage).unwrap()[0].quantity, 2);
    assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));

    assert!(cart.update_quantity(11, 5).unwrap());
    assert_eq!(cart.items()[0].quantity, 5);
    assert_eq!(rx.try_recv().unwrap(), CartEvent { count: 5, total: 500 });
}

#[test]
fn remove_of_unknown_variant_still_persists_and_notifies() {
    let (storage, cart) = fresh();
    cart.add(item(11, 100, 1)).unwrap();
    let mut rx = cart.subscribe();

    cart.remove(99).unwrap();
    assert_eq!(cart.items().len(), 1);
    assert_eq!(rx.try_recv().unwrap(), CartEvent { count: 1, total: 100 });

    cart.remove(11).unwrap();
    assert!(cart.items().is_empty());
    assert_eq!(persisted(&storage).unwrap(), Vec::<CartItem>::new());
}

#[test]
fn clear_deletes_persisted_entry_and_notifies() {
    let (storage, cart) = fresh();
    cart.add(item(11, 100, 4)).unwrap();
    let mut rx = cart.subscribe();

    cart.clear().unwrap();
    assert!(cart.is_empty());
    assert!(persisted(&storage).is_none());
    assert_eq!(rx.try_recv().unwrap(), CartEvent { count: 0, total: 0 });
}

#[test]
fn each_mutation_broadcasts_exactly_once() {
    let (_, cart) = fresh();
    let mut rx = cart.subscribe();

    cart.add(item(11, 100, 1)).unwrap();
    cart.add(item(11, 100, 1)).unwrap();
    cart.update_quantity(11, 7).unwrap();
    cart.remove(11).unwrap();

    let mut counts = Vec::new();
    while let Ok(event) = rx.try_recv() {
        counts.push(event.count);
    }
    assert_eq!(counts, vec![1, 2, 7, 0]);
}

#[test]
fn broadcast_follows_the_write() {
    let storage = Arc::new(WatchingStore {
        inner: MemoryStore::new(),
        rx: Mutex::new(None),
        early_events: Mutex::new(0),
    });
    let cart = CartStore::load(storage.clone());
    *storage.rx.lock().unwrap() = Some(cart.subscribe());

    cart.add(item(11, 100, 1)).unwrap();
    cart.add(item(12, 100, 1)).unwrap();
    cart.update_quantity(12, 3).unwrap();

    // Each write only ever sees events from earlier mutations.
    assert_eq!(*storage.early_events.lock().unwrap(), 2);
}

#[test]
fn failed_write_leaves_cart_untouched_and_silent() {
    let storage = Arc::new(FlakyStore::default());
    let cart = CartStore::load(storage.clone());
    cart.add(item(11, 100, 1)).unwrap();
    let mut rx = cart.subscribe();

    *storage.fail_writes.lock().unwrap() = true;
    let err = cart.add(item(11, 100, 5)).unwrap_err();
    assert!(matches!(err, CartError::Storage(_)));
    assert_eq!(cart.items()[0].quantity, 1);
    assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
}

#[test]
fn reload_sees_previous_writes() {
    let storage = Arc::new(MemoryStore::new());
    {
        let cart = CartStore::load(storage.clone());
        cart.add(item(11, 100, 2)).unwrap();
    }
    let cart = CartStore::load(storage);
    assert_eq!(cart.count(), 2);
}

#[test]
fn badge_follows_mutations_from_elsewhere() {
    let (_, cart) = fresh();
    cart.add(item(11, 100, 2)).unwrap();

    let mut badge = CartBadge::attach(&cart);
    assert_eq!(badge.count(), 2);

    cart.add(item(12, 100, 1)).unwrap();
    cart.update_quantity(11, 4).unwrap();
    assert_eq!(badge.sync(), 2);
    assert_eq!(badge.count(), 5);

    cart.clear().unwrap();
    badge.sync();
    assert_eq!(badge.count(), 0);
}

#[tokio::test]
async fn badge_wakes_on_change() {
    let storage = Arc::new(MemoryStore::new());
    let cart = Arc::new(CartStore::load(storage));
    let mut badge = CartBadge::attach(&cart);

    let writer = Arc::clone(&cart);
    let handle = tokio::spawn(async move {
        writer.add(item(11, 100, 3)).unwrap();
    });

    assert_eq!(badge.changed().await, Some(3));
    handle.await.unwrap();
}
