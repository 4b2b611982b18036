//! Persistence bridge: load and save the shape list through a string key-value store.
//!
//! The engine only needs `load` at start-up and `save` after every append.
//! The browser backs the store with `localStorage`; tests and headless hosts
//! use [`MemoryStore`].

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::cell::RefCell;
use std::collections::HashMap;

use thiserror::Error;
use web_sys::{Storage, Window};

use crate::doc::ShapeList;

/// Errors raised by the persistence bridge.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not be reached or refused the operation.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    /// The stored value is not a JSON array of shapes.
    #[error("malformed shape data: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A synchronous string key-value store.
pub trait KeyValueStore {
    /// Read the value for `key`; `Ok(None)` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the backend rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Load the shape list stored under `key`. An absent key yields an empty list.
///
/// # Errors
///
/// Returns [`StoreError::Malformed`] when the stored value does not parse as a
/// shape array, or [`StoreError::Unavailable`] when the store cannot be read.
pub fn load_shapes(store: &dyn KeyValueStore, key: &str) -> Result<ShapeList, StoreError> {
    match store.get(key)? {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => Ok(ShapeList::new()),
    }
}

/// Serialize `shapes` and write them under `key`.
///
/// # Errors
///
/// Returns [`StoreError::Unavailable`] when the store rejects the write.
pub fn save_shapes(store: &dyn KeyValueStore, key: &str, shapes: &ShapeList) -> Result<(), StoreError> {
    let raw = serde_json::to_string(shapes)?;
    store.set(key, &raw)
}

// =============================================================
// Backends
// =============================================================

/// In-memory store, used by tests and when `localStorage` is unavailable.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with one raw value.
    #[must_use]
    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.values.borrow_mut().insert(key.to_owned(), value.to_owned());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// The browser's `window.localStorage`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    /// Open `localStorage` for `window`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] when storage is disabled or blocked.
    pub fn from_window(window: &Window) -> Result<Self, StoreError> {
        match window.local_storage() {
            Ok(Some(storage)) => Ok(Self { storage }),
            Ok(None) => Err(StoreError::Unavailable("localStorage is not available".to_owned())),
            Err(err) => Err(StoreError::Unavailable(format!("{err:?}"))),
        }
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage
            .get_item(key)
            .map_err(|err| StoreError::Unavailable(format!("{err:?}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage
            .set_item(key, value)
            .map_err(|err| StoreError::Unavailable(format!("{err:?}")))
    }
}
