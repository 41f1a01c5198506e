//! Mixin composition core.
//!
//! Builds class-like constructors by merging reusable capability mixins —
//! attribute defaults, named methods, an optional element selector and an
//! initializer — into one immutable blueprint. Every constructed instance
//! owns fresh attribute and handler containers and exposes a uniform
//! attr/event surface with change notification and one-shot replay.

pub mod attr;
pub mod compose;
pub mod event;
pub mod logging;
pub mod mixin;
pub mod util;

pub use attr::store::{AttrChange, AttrError, AttrStore};
pub use compose::blueprint::{compose, Blueprint, ComposeError, Composer};
pub use compose::instance::{Instance, InstanceError, CHANGE_EVENT};
pub use compose::resolver::{ElementHandle, ElementResolver, ResolveError};
pub use event::registry::{Callback, EventError, HandlerError, HandlerId, HandlerRegistry};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use mixin::definition::Mixin;
pub use util::{each_entries, each_values, format_tokens, is_string, Step};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
