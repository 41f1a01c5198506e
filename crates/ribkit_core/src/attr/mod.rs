//! Attribute storage with change detection.
//!
//! # Responsibility
//! - Own the per-instance `defaults`/`attributes` containers.
//! - Report value transitions so the instance layer can fire `change`.
//!
//! # Invariants
//! - Defaults fill missing keys only; they never overwrite a value that is
//!   already set.
//! - Setting an equal value is a no-op and reports no transition.

pub mod store;

pub use store::{AttrChange, AttrError, AttrStore};
