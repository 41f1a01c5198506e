//! Builder for one reusable capability bundle.

use crate::compose::instance::Instance;
use crate::event::registry::HandlerError;
use serde_json::Value;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Named callable contributed by a mixin, invocable via [`Instance::call`].
pub type MethodFn = Rc<dyn Fn(&mut Instance, &[Value]) -> Result<Value, HandlerError>>;

/// Effective constructor body supplied by a mixin.
pub type InitFn = Rc<dyn Fn(&mut Instance, &[Value]) -> Result<(), HandlerError>>;

/// Reusable capability bundle merged by the composer.
///
/// Mixins have no identity beyond their diagnostic label; merge precedence
/// is purely positional (later wins).
pub struct Mixin {
    pub(crate) label: String,
    pub(crate) defaults: BTreeMap<String, Value>,
    pub(crate) methods: BTreeMap<String, MethodFn>,
    pub(crate) el: Option<Value>,
    pub(crate) initializer: Option<InitFn>,
}

impl Mixin {
    /// Creates an empty mixin with a diagnostic label.
    ///
    /// Labels are validated at compose time: lowercase ascii, digits, `_`
    /// and `-` only.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            defaults: BTreeMap::new(),
            methods: BTreeMap::new(),
            el: None,
            initializer: None,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Adds one attribute default. A later mixin overrides the same key.
    pub fn default_value(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.defaults.insert(key.into(), value.into());
        self
    }

    /// Adds one named method. A later mixin overrides the same name.
    pub fn method(
        mut self,
        name: impl Into<String>,
        method: impl Fn(&mut Instance, &[Value]) -> Result<Value, HandlerError> + 'static,
    ) -> Self {
        self.methods.insert(name.into(), Rc::new(method));
        self
    }

    /// Sets the element value. A string form is resolved to an element
    /// handle at construction time.
    pub fn el(mut self, el: impl Into<Value>) -> Self {
        self.el = Some(el.into());
        self
    }

    /// Sets the initializer run as the effective constructor body.
    pub fn initializer(
        mut self,
        init: impl Fn(&mut Instance, &[Value]) -> Result<(), HandlerError> + 'static,
    ) -> Self {
        self.initializer = Some(Rc::new(init));
        self
    }
}
