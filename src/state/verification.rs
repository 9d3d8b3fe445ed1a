//! Token verification query with request caching and stale-response guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route guards ask this query whether the stored token is still accepted by
//! the backend. The query issues at most one request per token per
//! generation; later callers for the same token share the cached status.
//!
//! DESIGN
//! ======
//! Each in-flight request captures the generation and token it was issued
//! for. `invalidate` (wired to session login/logout) bumps the generation, so
//! a response that arrives after the session changed is dropped instead of
//! flipping a guard decision.

#[cfg(test)]
#[path = "verification_test.rs"]
mod verification_test;

use std::sync::{Arc, Mutex, PoisonError};

use crate::net::error::ApiError;
use crate::net::types::VerificationResult;
use crate::util::observers::{Observers, SubscriptionId};

/// Backend seam the query verifies tokens through.
pub trait TokenVerifier {
    fn verify(&self, token: &str) -> impl Future<Output = Result<VerificationResult, ApiError>>;
}

/// Query state for one token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VerificationStatus {
    /// No token: nothing to verify, nothing issued.
    Disabled,
    /// Token present, no result yet.
    Pending,
    Resolved(VerificationResult),
    Failed(ApiError),
}

impl VerificationStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn data(&self) -> Option<&VerificationResult> {
        match self {
            Self::Resolved(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }

    fn from_outcome(outcome: Result<VerificationResult, ApiError>) -> Self {
        match outcome {
            Ok(result) => Self::Resolved(result),
            Err(err) => Self::Failed(err),
        }
    }
}

#[derive(Debug)]
struct QueryEntry {
    token: String,
    status: VerificationStatus,
}

#[derive(Debug, Default)]
struct QueryState {
    generation: u64,
    entry: Option<QueryEntry>,
}

#[derive(Default)]
struct QueryInner {
    state: Mutex<QueryState>,
    observers: Observers<VerificationStatus>,
}

/// Shared verification query. Clones share cache and generation.
#[derive(Clone, Default)]
pub struct VerificationQuery {
    inner: Arc<QueryInner>,
}

impl VerificationQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.lock().generation
    }

    /// Status the query currently reports for `token`.
    pub fn status_for(&self, token: Option<&str>) -> VerificationStatus {
        let Some(token) = token else {
            return VerificationStatus::Disabled;
        };
        match &self.lock().entry {
            Some(entry) if entry.token == token => entry.status.clone(),
            _ => VerificationStatus::Pending,
        }
    }

    /// Verify `token` through `verifier`, unless a result or request for it
    /// already exists in this generation.
    pub async fn fetch<V: TokenVerifier>(&self, verifier: &V, token: Option<&str>) -> VerificationStatus {
        let Some(token) = token else {
            return VerificationStatus::Disabled;
        };

        let issued_generation = {
            let mut state = self.lock();
            if let Some(entry) = &state.entry {
                if entry.token == token {
                    return entry.status.clone();
                }
            }
            state.entry = Some(QueryEntry {
                token: token.to_owned(),
                status: VerificationStatus::Pending,
            });
            state.generation
        };
        self.inner.observers.notify(&VerificationStatus::Pending);

        let outcome = verifier.verify(token).await;

        let status = VerificationStatus::from_outcome(outcome);
        {
            let mut state = self.lock();
            let current = state.generation == issued_generation
                && state.entry.as_ref().is_some_and(|entry| entry.token == token);
            if !current {
                log::debug!("discarding stale verification result from generation {issued_generation}");
                return match &state.entry {
                    Some(entry) if entry.token == token => entry.status.clone(),
                    _ => VerificationStatus::Pending,
                };
            }
            if let Some(entry) = state.entry.as_mut() {
                entry.status = status.clone();
            }
        }
        log::debug!("token verification settled: {status:?}");
        self.inner.observers.notify(&status);
        status
    }

    /// Drop the cached result and orphan any in-flight request. Observers
    /// receive the status now reported for `token`.
    pub fn invalidate(&self, token: Option<&str>) {
        {
            let mut state = self.lock();
            state.generation += 1;
            state.entry = None;
        }
        self.inner.observers.notify(&self.status_for(token));
    }

    /// Register `callback` to run whenever the query's status changes.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&VerificationStatus) + Send + Sync + 'static,
    {
        self.inner.observers.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.observers.unsubscribe(id)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, QueryState> {
        self.inner.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
