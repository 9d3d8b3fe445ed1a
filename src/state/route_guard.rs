//! Route guard state machine and render decision.
//!
//! SYSTEM CONTEXT
//! ==============
//! `PublicRoute` and `PrivateRoute` share one state machine over token
//! presence and verification status. The decision is a pure function so it
//! can be tested without a renderer; the components only carry it out.
//!
//! TRADE-OFFS
//! ==========
//! Verification errors are treated like an invalid token (fail closed). A
//! private route does not distinguish "never had a token" from "token became
//! invalid": both go to the login page.

#[cfg(test)]
#[path = "route_guard_test.rs"]
mod route_guard_test;

use crate::config::RoutePaths;
use crate::state::verification::VerificationStatus;

/// Where a guard stands for the current navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteState {
    NoToken,
    Verifying,
    VerifiedValid,
    VerifiedInvalidOrError,
}

impl RouteState {
    pub fn from_status(status: &VerificationStatus) -> Self {
        match status {
            VerificationStatus::Disabled => Self::NoToken,
            VerificationStatus::Pending => Self::Verifying,
            VerificationStatus::Resolved(result) if result.is_valid => Self::VerifiedValid,
            VerificationStatus::Resolved(_) | VerificationStatus::Failed(_) => Self::VerifiedInvalidOrError,
        }
    }
}

/// Which audience a guarded route is for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteKind {
    /// Only anonymous users (login, signup).
    Public,
    /// Only authenticated users.
    Private,
}

/// A navigation the guard wants performed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Redirect {
    pub to: String,
    /// Replace the current history entry instead of pushing a new one.
    pub replace: bool,
}

impl Redirect {
    fn replacing(to: &str) -> Self {
        Self {
            to: to.to_owned(),
            replace: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    RenderChildren,
    RenderLoading,
    Redirect(Redirect),
}

/// Decide what a guard of `kind` does in `state`.
pub fn decide(kind: RouteKind, state: RouteState, paths: &RoutePaths) -> GuardDecision {
    match (kind, state) {
        (_, RouteState::Verifying) => GuardDecision::RenderLoading,
        (RouteKind::Public, RouteState::VerifiedValid) => GuardDecision::Redirect(Redirect::replacing(&paths.dashboard)),
        (RouteKind::Public, RouteState::NoToken | RouteState::VerifiedInvalidOrError)
        | (RouteKind::Private, RouteState::VerifiedValid) => GuardDecision::RenderChildren,
        (RouteKind::Private, RouteState::NoToken | RouteState::VerifiedInvalidOrError) => {
            GuardDecision::Redirect(Redirect::replacing(&paths.login))
        }
    }
}
