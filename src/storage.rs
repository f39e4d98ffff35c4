//! Storage
//!
//! A small key-value layer standing in for browser local storage. Stores
//! mirror their state into it as JSON documents, so a context rebuilt
//! over the same storage picks up the previous session.

use std::cell::RefCell;
use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

/// Well-known storage keys.
pub mod keys {
    /// Mock session user record.
    pub const USER: &str = "user";

    /// Liked-product id list.
    pub const LIKED_PRODUCTS: &str = "liked_products";

    /// Order history, newest first.
    pub const ORDERS: &str = "orders";

    /// Notification list.
    pub const NOTIFICATIONS: &str = "notifications";
}

/// Errors from the persisted key-value layer.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A stored document could not be encoded or decoded.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// String key-value store with the browser local-storage contract:
/// shared handles, interior mutability, string values.
pub trait Storage: fmt::Debug {
    /// Read the value stored under a key.
    fn get(&self, key: &str) -> Option<String>;

    /// Store a value under a key, replacing any previous value.
    fn set(&self, key: &str, value: String);

    /// Remove a key and its value.
    fn remove(&self, key: &str);
}

/// In-memory storage backend.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: RefCell<FxHashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        MemoryStorage::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        self.values.borrow_mut().insert(key.to_owned(), value);
    }

    fn remove(&self, key: &str) {
        self.values.borrow_mut().remove(key);
    }
}

/// Decode the JSON document stored under a key, if any.
///
/// # Errors
///
/// Returns a [`StorageError`] if a stored document exists but cannot be
/// decoded into `T`.
pub fn read_json<T: DeserializeOwned>(
    storage: &dyn Storage,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match storage.get(key) {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Encode a value as JSON and store it under a key.
///
/// # Errors
///
/// Returns a [`StorageError`] if the value cannot be encoded.
pub fn write_json<T: Serialize>(
    storage: &dyn Storage,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    storage.set(key, serde_json::to_string(value)?);

    Ok(())
}
