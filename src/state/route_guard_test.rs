use super::*;
use crate::net::error::ApiError;
use crate::net::types::VerificationResult;

fn paths() -> RoutePaths {
    RoutePaths::default()
}

fn to(path: &str) -> GuardDecision {
    GuardDecision::Redirect(Redirect {
        to: path.to_owned(),
        replace: true,
    })
}

// =============================================================
// RouteState::from_status
// =============================================================

#[test]
fn disabled_maps_to_no_token() {
    assert_eq!(RouteState::from_status(&VerificationStatus::Disabled), RouteState::NoToken);
}

#[test]
fn pending_maps_to_verifying() {
    assert_eq!(RouteState::from_status(&VerificationStatus::Pending), RouteState::Verifying);
}

#[test]
fn resolved_valid_maps_to_verified_valid() {
    let status = VerificationStatus::Resolved(VerificationResult { is_valid: true });
    assert_eq!(RouteState::from_status(&status), RouteState::VerifiedValid);
}

#[test]
fn resolved_invalid_and_failed_map_to_invalid_or_error() {
    let invalid = VerificationStatus::Resolved(VerificationResult { is_valid: false });
    let failed = VerificationStatus::Failed(ApiError::Network("offline".to_owned()));
    assert_eq!(RouteState::from_status(&invalid), RouteState::VerifiedInvalidOrError);
    assert_eq!(RouteState::from_status(&failed), RouteState::VerifiedInvalidOrError);
}

// =============================================================
// PublicRoute
// =============================================================

#[test]
fn public_route_shows_loading_while_verifying() {
    assert_eq!(decide(RouteKind::Public, RouteState::Verifying, &paths()), GuardDecision::RenderLoading);
}

#[test]
fn public_route_redirects_valid_session_to_dashboard() {
    assert_eq!(decide(RouteKind::Public, RouteState::VerifiedValid, &paths()), to("/admin/dashboard"));
}

#[test]
fn public_route_renders_for_anonymous_and_invalid() {
    assert_eq!(decide(RouteKind::Public, RouteState::NoToken, &paths()), GuardDecision::RenderChildren);
    assert_eq!(
        decide(RouteKind::Public, RouteState::VerifiedInvalidOrError, &paths()),
        GuardDecision::RenderChildren
    );
}

// =============================================================
// PrivateRoute
// =============================================================

#[test]
fn private_route_shows_loading_while_verifying() {
    assert_eq!(decide(RouteKind::Private, RouteState::Verifying, &paths()), GuardDecision::RenderLoading);
}

#[test]
fn private_route_renders_valid_session() {
    assert_eq!(decide(RouteKind::Private, RouteState::VerifiedValid, &paths()), GuardDecision::RenderChildren);
}

#[test]
fn private_route_redirects_anonymous_and_invalid_to_login() {
    assert_eq!(decide(RouteKind::Private, RouteState::NoToken, &paths()), to("/login"));
    assert_eq!(decide(RouteKind::Private, RouteState::VerifiedInvalidOrError, &paths()), to("/login"));
}

// =============================================================
// Cross-cutting
// =============================================================

#[test]
fn no_token_never_blocks_on_loading() {
    for kind in [RouteKind::Public, RouteKind::Private] {
        assert_ne!(decide(kind, RouteState::NoToken, &paths()), GuardDecision::RenderLoading);
    }
}

#[test]
fn redirects_always_replace_history() {
    for kind in [RouteKind::Public, RouteKind::Private] {
        for state in [
            RouteState::NoToken,
            RouteState::Verifying,
            RouteState::VerifiedValid,
            RouteState::VerifiedInvalidOrError,
        ] {
            if let GuardDecision::Redirect(redirect) = decide(kind, state, &paths()) {
                assert!(redirect.replace, "{kind:?} in {state:?} pushed history");
            }
        }
    }
}

#[test]
fn custom_paths_are_honored() {
    let custom = RoutePaths {
        login: "/signin".to_owned(),
        dashboard: "/home".to_owned(),
    };
    assert_eq!(decide(RouteKind::Private, RouteState::NoToken, &custom), to("/signin"));
    assert_eq!(decide(RouteKind::Public, RouteState::VerifiedValid, &custom), to("/home"));
}
