//! Login page: exchanges credentials for a session and bearer token.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted behind `PublicRoute`. On success it stores user and token through
//! `SessionContext::sign_in`; the guard then sees a verifiable token and moves
//! the user to the dashboard.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;

use crate::state::auth::AuthRuntime;

const MISSING_FIELDS: &str = "Enter both email and password.";

/// Trim and require both credentials.
fn validate_credentials(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(MISSING_FIELDS);
    }
    Ok((email.to_owned(), password.to_owned()))
}

fn login_failed_message(err: &crate::net::error::ApiError) -> String {
    match err.status() {
        Some(401 | 403) => "Invalid email or password.".to_owned(),
        _ => format!("Login failed: {err}"),
    }
}

#[component]
#[cfg_attr(not(feature = "csr"), allow(unused_variables))]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<AuthRuntime>();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (email_value, password_value) = match validate_credentials(&email.get(), &password.get()) {
            Ok(values) => values,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Signing in...".to_owned());

        #[cfg(feature = "csr")]
        {
            let auth = auth.clone();
            leptos::task::spawn_local(async move {
                match auth.api.login::<crate::net::types::AdminUser>(&email_value, &password_value).await {
                    Ok(response) => match auth.session.sign_in(response.user, &response.token) {
                        Ok(()) => info.set(String::new()),
                        Err(err) => info.set(format!("Login failed: {err}")),
                    },
                    Err(err) => info.set(login_failed_message(&err)),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            info.set(login_failed_message(&crate::net::error::ApiError::Unavailable));
            busy.set(false);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Admin"</h1>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Sign In"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
}
