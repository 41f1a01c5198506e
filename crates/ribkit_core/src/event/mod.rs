//! Named-event handler bookkeeping.
//!
//! # Responsibility
//! - Store ordered handler lists and the triggered-event set per context.
//! - Provide the snapshot primitive that dispatch iterates over.
//!
//! # Invariants
//! - Registration order is dispatch order.
//! - Removal preserves the relative order of the remaining handlers.
//! - Dispatch itself lives at the instance layer, which owns the context
//!   handlers are invoked against.

pub mod registry;

pub use registry::{
    Callback, EventError, HandlerError, HandlerId, HandlerRegistry, HandlerSnapshot,
};
