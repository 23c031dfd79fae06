use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid storage key \"{0}\": only ASCII letters, digits, '-' and '_' are allowed")]
    InvalidKey(String),
}

#[derive(Debug, Error)]
pub enum CartError {
    #[error("cart storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("failed to serialize cart: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("quantity for variant {variant_id} must be at least 1")]
    InvalidQuantity { variant_id: i64 },
}
