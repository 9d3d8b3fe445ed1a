//! # admin-console
//!
//! Leptos + WASM frontend for the product/provider/user administration
//! backend.
//!
//! This crate holds the session subsystem (durable session storage, the
//! bearer-authenticated HTTP client, the observable session container, token
//! verification) and the `PublicRoute`/`PrivateRoute` guards built on it,
//! plus the login and dashboard pages that drive the flow.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: install logging and panic reporting, then mount `App`.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        log::warn!("console logger was already installed");
    }
    leptos::mount::mount_to_body(app::App);
}
