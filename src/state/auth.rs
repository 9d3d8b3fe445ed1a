//! Auth runtime: the injected bundle guards and pages read session state from.
//!
//! SYSTEM CONTEXT
//! ==============
//! Built once in `App` and provided through Leptos context. It owns the one
//! `ApiClient`, the one `SessionContext`, and the one `VerificationQuery`,
//! and ties them together: every login/logout invalidates verification so an
//! answer for the previous token can never decide a route.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::config::AppConfig;
use crate::net::api::ApiClient;
use crate::net::types::AdminUser;
use crate::state::route_guard::{GuardDecision, RouteKind, RouteState, decide};
use crate::state::session::SessionContext;
use crate::state::verification::{TokenVerifier, VerificationQuery, VerificationStatus};
use crate::util::storage::{SharedStore, TOKEN_KEY};

#[derive(Clone)]
pub struct AuthRuntime {
    pub config: AppConfig,
    pub api: ApiClient,
    pub session: SessionContext<AdminUser>,
    pub query: VerificationQuery,
}

impl AuthRuntime {
    pub fn new(config: AppConfig, store: SharedStore) -> Self {
        let api = ApiClient::new(config.api_base_url.clone(), store.clone());
        let session = SessionContext::init(store.clone());
        let query = VerificationQuery::new();

        let on_change = query.clone();
        session.subscribe(move |_| on_change.invalidate(store.get(TOKEN_KEY).as_deref()));

        Self {
            config,
            api,
            session,
            query,
        }
    }

    /// Verification status for the token currently in storage.
    pub fn status(&self) -> VerificationStatus {
        self.query.status_for(self.session.token().as_deref())
    }

    /// A token the backend accepts still counts as invalid when no stored
    /// user decodes alongside it.
    pub fn route_state(&self) -> RouteState {
        match RouteState::from_status(&self.status()) {
            RouteState::VerifiedValid if self.session.user().is_none() => RouteState::VerifiedInvalidOrError,
            state => state,
        }
    }

    pub fn decide(&self, kind: RouteKind) -> GuardDecision {
        decide(kind, self.route_state(), &self.config.routes)
    }

    /// Verify the stored token against the backend.
    pub async fn verify(&self) -> VerificationStatus {
        self.verify_with(&self.api).await
    }

    /// Verify the stored token through `verifier`.
    pub async fn verify_with<V: TokenVerifier>(&self, verifier: &V) -> VerificationStatus {
        let token = self.session.token();
        self.query.fetch(verifier, token.as_deref()).await
    }
}
