//! Utility helpers shared across client modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns (storage, change
//! notification) from session and page logic to improve reuse and testability.

pub mod observers;
pub mod storage;
