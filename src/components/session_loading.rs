//! Placeholder shown while a stored token is being verified.

use leptos::prelude::*;

pub const SESSION_LOADING_TEXT: &str = "Verificando sesión...";

#[component]
pub fn SessionLoading() -> impl IntoView {
    view! {
        <div class="session-loading" role="status" aria-live="polite">
            <p>{SESSION_LOADING_TEXT}</p>
        </div>
    }
}
