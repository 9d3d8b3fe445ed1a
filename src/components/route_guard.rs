//! `PublicRoute` / `PrivateRoute` guard components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Both guards render from the pure decision in `state::route_guard` and
//! keep it current by subscribing to session and verification changes. The
//! navigation side effect runs in an effect, never during render.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::session_loading::SessionLoading;
use crate::state::auth::AuthRuntime;
use crate::state::route_guard::{GuardDecision, RouteKind};

/// Content for anonymous visitors only; a verified session is sent to the dashboard.
#[component]
pub fn PublicRoute(children: ChildrenFn) -> impl IntoView {
    guarded(RouteKind::Public, children)
}

/// Content for verified sessions only; everyone else is sent to the login page.
#[component]
pub fn PrivateRoute(children: ChildrenFn) -> impl IntoView {
    guarded(RouteKind::Private, children)
}

fn guarded(kind: RouteKind, children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<AuthRuntime>();
    let navigate = use_navigate();
    let decision = RwSignal::new(auth.decide(kind));

    let refresh = {
        let auth = auth.clone();
        move || decision.set(auth.decide(kind))
    };
    let session_sub = {
        let refresh = refresh.clone();
        auth.session.subscribe(move |_| refresh())
    };
    let query_sub = auth.query.subscribe(move |_| refresh());

    let cleanup_auth = auth.clone();
    on_cleanup(move || {
        cleanup_auth.session.unsubscribe(session_sub);
        cleanup_auth.query.unsubscribe(query_sub);
    });

    Effect::new(move || match decision.get() {
        GuardDecision::Redirect(redirect) => {
            log::debug!("{kind:?} route redirecting to {}", redirect.to);
            navigate(
                &redirect.to,
                NavigateOptions {
                    replace: redirect.replace,
                    ..NavigateOptions::default()
                },
            );
        }
        GuardDecision::RenderLoading => start_verification(&auth),
        GuardDecision::RenderChildren => {}
    });

    move || match decision.get() {
        GuardDecision::RenderChildren => children().into_any(),
        GuardDecision::RenderLoading => view! { <SessionLoading/> }.into_any(),
        GuardDecision::Redirect(_) => ().into_any(),
    }
}

fn start_verification(auth: &AuthRuntime) {
    #[cfg(feature = "csr")]
    {
        let auth = auth.clone();
        leptos::task::spawn_local(async move {
            auth.verify().await;
        });
    }
    #[cfg(not(feature = "csr"))]
    {
        log::debug!("verification deferred outside the browser: {:?}", auth.route_state());
    }
}
