//! Element selector resolution seam.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Opaque handle returned by a resolver for one selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementHandle {
    /// Selector string the handle was resolved from.
    pub selector: String,
    /// Resolver-defined reference to the underlying element.
    pub node_ref: String,
}

/// Selector resolution errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    NotFound(String),
    Backend(String),
}

impl Display for ResolveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(selector) => write!(f, "no element matches selector: {selector}"),
            Self::Backend(detail) => write!(f, "resolver backend failed: {detail}"),
        }
    }
}

impl Error for ResolveError {}

/// External collaborator mapping selector strings to element handles.
///
/// The composer calls this at most once per constructed instance, only when
/// the merged `el` value is a string. The core stores the returned handle
/// and takes no further responsibility for its lifecycle.
pub trait ElementResolver {
    fn resolve(&self, selector: &str) -> Result<ElementHandle, ResolveError>;
}
