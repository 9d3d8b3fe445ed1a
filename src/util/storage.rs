//! Durable key-value storage for the browser session.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session container writes the serialized user here and the HTTP client
//! reads the bearer token from here on every request. Both go through the
//! [`KeyValueStore`] trait so native tests can substitute [`MemoryStore`].
//!
//! TRADE-OFFS
//! ==========
//! Writes are best-effort, matching `localStorage` semantics: a failed write
//! (quota, private mode) is logged and otherwise ignored, so callers treat
//! storage as infallible.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Storage key holding the JSON-serialized user record.
pub const USER_KEY: &str = "user";
/// Storage key holding the raw bearer token.
pub const TOKEN_KEY: &str = "token";

/// Minimal string key-value store with `localStorage` semantics.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Shared handle passed to the session container and the HTTP client.
pub type SharedStore = Arc<dyn KeyValueStore>;

/// Process-local store used by native tests and non-browser builds.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `entries`.
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Self { entries: Mutex::new(map) }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

/// `window.localStorage`, looked up on every call so the handle stays `Send`.
#[cfg(feature = "csr")]
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

#[cfg(feature = "csr")]
impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
}

#[cfg(feature = "csr")]
impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        let Some(storage) = Self::storage() else {
            log::warn!("localStorage unavailable; dropping write to {key}");
            return;
        };
        if let Err(err) = storage.set_item(key, value) {
            log::warn!("localStorage write to {key} failed: {err:?}");
        }
    }

    fn remove(&self, key: &str) {
        let Some(storage) = Self::storage() else {
            return;
        };
        if let Err(err) = storage.remove_item(key) {
            log::warn!("localStorage remove of {key} failed: {err:?}");
        }
    }
}

/// The store the application runs against: `localStorage` in the browser,
/// an in-memory map elsewhere.
pub fn default_store() -> SharedStore {
    #[cfg(feature = "csr")]
    {
        Arc::new(LocalStorage)
    }
    #[cfg(not(feature = "csr"))]
    {
        Arc::new(MemoryStore::new())
    }
}
