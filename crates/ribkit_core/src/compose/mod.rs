//! Mixin composition and instance construction.
//!
//! # Responsibility
//! - Merge ordered mixins into an immutable blueprint.
//! - Construct instances with fresh per-instance containers.
//! - Bridge to the external element resolver for string `el` values.
//!
//! # Invariants
//! - Merge precedence is positional: later mixins win; inherent instance
//!   operations always win over mixin methods.
//! - Two instances from one blueprint never share container identity.

pub mod blueprint;
pub mod instance;
pub mod resolver;

pub use blueprint::{compose, Blueprint, ComposeError, Composer};
pub use instance::{Instance, InstanceError, CHANGE_EVENT};
pub use resolver::{ElementHandle, ElementResolver, ResolveError};
