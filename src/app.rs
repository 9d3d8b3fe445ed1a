//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::components::route_guard::{PrivateRoute, PublicRoute};
use crate::config::AppConfig;
use crate::pages::{dashboard::DashboardPage, login::LoginPage};
use crate::state::auth::AuthRuntime;
use crate::util::storage::default_store;

/// Root application component.
///
/// Builds the auth runtime once, provides it to every route, and mounts the
/// public and private route trees.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = AuthRuntime::new(AppConfig::load(), default_store());
    let dashboard_path = auth.config.routes.dashboard.clone();
    provide_context(auth);

    view! {
        <Title text="Admin"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route
                    path=StaticSegment("login")
                    view=|| view! { <PublicRoute><LoginPage/></PublicRoute> }
                />
                <Route
                    path=(StaticSegment("admin"), StaticSegment("dashboard"))
                    view=|| view! { <PrivateRoute><DashboardPage/></PrivateRoute> }
                />
                <Route
                    path=StaticSegment("")
                    view=move || view! { <Redirect path=dashboard_path.clone()/> }
                />
            </Routes>
        </Router>
    }
}
