//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern so each piece is testable without a renderer:
//! `session` (who is logged in), `verification` (is the token still good),
//! `route_guard` (what a guarded route does about it), and `auth` (the
//! injected bundle wiring the three together).

pub mod auth;
pub mod route_guard;
pub mod session;
pub mod verification;
