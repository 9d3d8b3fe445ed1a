//! Reusable view components.
//!
//! SYSTEM CONTEXT
//! ==============
//! `route_guard` wraps routes in session-aware gates; `session_loading` is the
//! indicator those gates show while verification is in flight.

pub mod route_guard;
pub mod session_loading;
