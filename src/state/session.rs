//! Session state container: who is logged in for the lifetime of the page.
//!
//! SYSTEM CONTEXT
//! ==============
//! `SessionContext` is created once at startup, provided through Leptos
//! context, and read by pages and guards. It mirrors the `"user"` entry of
//! durable storage in memory and owns every write to the `"user"` and
//! `"token"` keys.
//!
//! INVARIANTS
//! ==========
//! Durable storage and the in-memory value change together under one lock;
//! observers run after the lock is released, so they always see the new state.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::util::observers::{Observers, SubscriptionId};
use crate::util::storage::{SharedStore, TOKEN_KEY, USER_KEY};

/// Bound for user records the session can persist.
pub trait SessionUser: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {}

impl<T> SessionUser for T where T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("user record could not be encoded: {0}")]
    Encode(String),
}

struct SessionInner<U> {
    store: SharedStore,
    user: RwLock<Option<U>>,
    observers: Observers<Option<U>>,
}

/// Observable, injectable session handle. Clones share state.
pub struct SessionContext<U> {
    inner: Arc<SessionInner<U>>,
}

impl<U> Clone for SessionContext<U> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<U: SessionUser> SessionContext<U> {
    /// Seed the session from durable storage. Missing or malformed data yields
    /// an anonymous session.
    pub fn init(store: SharedStore) -> Self {
        let user = read_stored_user(&store);
        Self {
            inner: Arc::new(SessionInner {
                store,
                user: RwLock::new(user),
                observers: Observers::default(),
            }),
        }
    }

    pub fn user(&self) -> Option<U> {
        self.inner.user.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.user.read().unwrap_or_else(PoisonError::into_inner).is_some()
    }

    /// Current bearer token from durable storage.
    pub fn token(&self) -> Option<String> {
        self.inner.store.get(TOKEN_KEY)
    }

    /// Persist `user` and make it the current session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Encode`] if `user` cannot be serialized; nothing
    /// is written in that case.
    pub fn login(&self, user: U) -> Result<(), SessionError> {
        self.apply_login(user, None)
    }

    /// Persist a freshly issued `token` together with its `user`.
    ///
    /// # Errors
    ///
    /// Same as [`SessionContext::login`]; the token is not stored on failure.
    pub fn sign_in(&self, user: U, token: &str) -> Result<(), SessionError> {
        self.apply_login(user, Some(token))
    }

    /// Clear the user and the token, in storage and in memory.
    pub fn logout(&self) {
        {
            let mut current = self.inner.user.write().unwrap_or_else(PoisonError::into_inner);
            self.inner.store.remove(USER_KEY);
            self.inner.store.remove(TOKEN_KEY);
            *current = None;
        }
        log::info!("session cleared");
        self.inner.observers.notify(&None);
    }

    /// Register `callback` to receive the user after every login/logout.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Option<U>) + Send + Sync + 'static,
    {
        self.inner.observers.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.observers.unsubscribe(id)
    }

    fn apply_login(&self, user: U, token: Option<&str>) -> Result<(), SessionError> {
        let encoded = serde_json::to_string(&user).map_err(|e| SessionError::Encode(e.to_string()))?;
        {
            let mut current = self.inner.user.write().unwrap_or_else(PoisonError::into_inner);
            if let Some(token) = token {
                self.inner.store.set(TOKEN_KEY, token);
            }
            self.inner.store.set(USER_KEY, &encoded);
            *current = Some(user.clone());
        }
        log::info!("session established");
        self.inner.observers.notify(&Some(user));
        Ok(())
    }
}

fn read_stored_user<U: DeserializeOwned>(store: &SharedStore) -> Option<U> {
    let raw = store.get(USER_KEY)?;
    match serde_json::from_str(&raw) {
        Ok(user) => Some(user),
        Err(err) => {
            log::warn!("ignoring malformed stored user: {err}");
            None
        }
    }
}
