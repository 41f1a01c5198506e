//! Mixin capability bundles.
//!
//! A mixin carries attribute defaults, named methods, an optional element
//! value and an optional initializer. The composer merges an ordered list
//! of them into one blueprint; later mixins take precedence on collisions.

pub mod definition;

pub use definition::{InitFn, MethodFn, Mixin};
