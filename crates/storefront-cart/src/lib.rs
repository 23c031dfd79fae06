//! Browser-local state of the storefront: the persisted cart, its change
//! broadcast, and read-only session data, all over a [`KvStore`].

pub mod error;
pub mod events;
pub mod session;
pub mod storage;
pub mod store;

pub use error::{CartError, StorageError};
pub use events::{CartBadge, CartEvent};
pub use session::{Session, TOKEN_KEY, USER_KEY};
pub use storage::{FileStore, KvStore, MemoryStore};
pub use store::{CartStore, CART_KEY};
pub use storefront_core::CartItem;
