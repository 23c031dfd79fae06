//! Read-only view of what the login flow leaves in storage.

use std::sync::Arc;

use storefront_core::CurrentUser;

use crate::error::StorageError;
use crate::storage::KvStore;

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

#[derive(Clone)]
pub struct Session {
    storage: Arc<dyn KvStore>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

impl Session {
    pub fn new(storage: Arc<dyn KvStore>) -> Self {
        Self { storage }
    }

    /// The bearer token for authenticated requests, if one is stored.
    ///
    /// The token may be stored raw or as a JSON string; blank values count
    /// as signed out.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the storage medium cannot be read.
    pub fn bearer_token(&self) -> Result<Option<String>, StorageError> {
        let Some(raw) = self.storage.get(TOKEN_KEY)? else {
            return Ok(None);
        };
        let token = serde_json::from_str::<String>(&raw).unwrap_or(raw);
        let token = token.trim();
        Ok((!token.is_empty()).then(|| token.to_owned()))
    }

    /// The signed-in user. Malformed data is logged and treated as signed out.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the storage medium cannot be read.
    pub fn current_user(&self) -> Result<Option<CurrentUser>, StorageError> {
        let Some(raw) = self.storage.get(USER_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str::<CurrentUser>(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                tracing::warn!(error = %e, "stored user is malformed; ignoring");
                Ok(None)
            }
        }
    }
}
