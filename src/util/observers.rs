//! Explicit subscribe/notify list for shared client state.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session container and the verification query are plain Rust objects
//! injected through Leptos context. Components bridge them into signals by
//! subscribing here instead of reading ambient globals.
//!
//! DESIGN
//! ======
//! Callbacks are cloned out of the lock before they run, so a callback may
//! subscribe, unsubscribe, or read the owning state without deadlocking.

#[cfg(test)]
#[path = "observers_test.rs"]
mod observers_test;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Handle returned by [`Observers::subscribe`], used to unsubscribe later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Ordered list of change callbacks for values of type `T`.
pub struct Observers<T> {
    next_id: AtomicU64,
    callbacks: Mutex<Vec<(SubscriptionId, Callback<T>)>>,
}

impl<T> Default for Observers<T> {
    fn default() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            callbacks: Mutex::new(Vec::new()),
        }
    }
}

impl<T> Observers<T> {
    /// Register `callback`; it runs on every subsequent [`Observers::notify`].
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.callbacks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(callback)));
        id
    }

    /// Remove a callback. Returns `false` if `id` was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut callbacks = self.callbacks.lock().unwrap_or_else(PoisonError::into_inner);
        let before = callbacks.len();
        callbacks.retain(|(existing, _)| *existing != id);
        callbacks.len() != before
    }

    /// Invoke every registered callback in subscription order.
    pub fn notify(&self, value: &T) {
        let snapshot: Vec<Callback<T>> = self
            .callbacks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();
        for callback in snapshot {
            callback(value);
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
