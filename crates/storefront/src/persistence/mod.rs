//! Durable storage for the cart.
//!
//! Storage is split in two layers:
//!
//! - [`KeyValueStore`] - a raw string key-value backend ([`MemoryStore`],
//!   [`FileStore`]). Backends know nothing about carts or JSON.
//! - [`CartPersistence`] - reads and writes the cart under one well-known key,
//!   owns the serialized layout, and orders concurrent saves.

pub mod file;
pub mod memory;
pub mod slot;

use std::future::Future;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use slot::{CartPersistence, DEFAULT_CART_KEY, SCHEMA_VERSION};

/// Errors raised by storage backends.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// Asynchronous string key-value storage.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if nothing is stored.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Delete `key`. Deleting a missing key is not an error.
    fn remove(&self, key: &str) -> impl Future<Output = Result<(), StorageError>> + Send;
}

/// Check that a key is safe to use as a file name on every platform.
///
/// Keys must be non-empty and contain only ASCII letters, digits, `_` and `-`.
///
/// # Errors
///
/// Returns [`StorageError::InvalidKey`] if the key contains anything else.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_owned()))
    }
}
