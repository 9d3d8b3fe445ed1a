//! Dashboard page: the authenticated landing route.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted behind `PrivateRoute`. Shows who is signed in and offers logout;
//! logging out clears the session, which makes the guard send the user back
//! to the login page.

use leptos::prelude::*;

use crate::net::types::AdminUser;
use crate::state::auth::AuthRuntime;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<AuthRuntime>();
    let user = RwSignal::new(auth.session.user());

    let sub = auth.session.subscribe(move |next: &Option<AdminUser>| user.set(next.clone()));
    let cleanup_auth = auth.clone();
    on_cleanup(move || {
        cleanup_auth.session.unsubscribe(sub);
    });

    let on_logout = move |_| auth.session.logout();

    view! {
        <div class="dashboard-page">
            <header class="dashboard-header">
                <h1>"Dashboard"</h1>
                <span class="dashboard-user">
                    {move || user.get().map(|u| u.name).unwrap_or_default()}
                </span>
                <button class="dashboard-logout" on:click=on_logout>
                    "Log out"
                </button>
            </header>
        </div>
    }
}
