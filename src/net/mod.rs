//! Networking modules for the admin REST backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` owns the shared bearer-authenticated HTTP client, `error` the failure
//! taxonomy callers match on, and `types` the auth wire schema.

pub mod api;
pub mod error;
pub mod types;
