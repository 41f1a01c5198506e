//! Small shared helpers.
//!
//! # Responsibility
//! - Provide the generic iteration, string predicate and token formatting
//!   helpers used across the crate and exposed to embedders.
//!
//! # Invariants
//! - Helpers are pure: no logging, no global state besides compiled
//!   patterns.

pub mod each;
pub mod text;

pub use each::{each_entries, each_values, Step};
pub use text::{format_tokens, is_string};
