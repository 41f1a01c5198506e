//! Instances produced by a composed blueprint.

use crate::attr::store::{AttrError, AttrStore};
use crate::compose::blueprint::BlueprintInner;
use crate::compose::resolver::ElementHandle;
use crate::event::registry::{
    EventError, HandlerError, HandlerId, HandlerRegistry,
};
use log::debug;
use serde_json::Value;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;
use uuid::Uuid;

/// Event name fired on attribute value transitions.
pub const CHANGE_EVENT: &str = "change";

/// Instance-surface errors spanning attribute, event and method calls.
#[derive(Debug)]
pub enum InstanceError {
    Attr(AttrError),
    Event(EventError),
    Method(HandlerError),
    UnknownMethod(String),
}

impl Display for InstanceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Attr(err) => write!(f, "{err}"),
            Self::Event(err) => write!(f, "{err}"),
            Self::Method(err) => write!(f, "{err}"),
            Self::UnknownMethod(name) => write!(f, "no merged method named: {name}"),
        }
    }
}

impl Error for InstanceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Attr(err) => Some(err),
            Self::Event(err) => Some(err),
            Self::Method(err) => Some(err),
            Self::UnknownMethod(_) => None,
        }
    }
}

/// Object produced by [`Blueprint::construct`](crate::Blueprint::construct).
///
/// Owns its attribute and handler containers outright; nothing mutable is
/// shared with sibling instances.
pub struct Instance {
    id: Uuid,
    blueprint: Rc<BlueprintInner>,
    attrs: AttrStore,
    events: HandlerRegistry<Instance>,
    element: Option<ElementHandle>,
}

impl std::fmt::Debug for Instance {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Instance")
            .field("id", &self.id)
            .field("element", &self.element)
            .finish_non_exhaustive()
    }
}

impl Instance {
    pub(crate) fn new(
        blueprint: Rc<BlueprintInner>,
        attrs: AttrStore,
        events: HandlerRegistry<Instance>,
        element: Option<ElementHandle>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            blueprint,
            attrs,
            events,
            element,
        }
    }

    /// Stable diagnostic id for this instance.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Labels of the mixins merged into this instance's blueprint.
    pub fn labels(&self) -> &[String] {
        &self.blueprint.labels
    }

    /// Resolved element handle, present when `el` was a selector string.
    pub fn element(&self) -> Option<&ElementHandle> {
        self.element.as_ref()
    }

    /// Raw `el` value carried by the blueprint.
    pub fn el(&self) -> Option<&Value> {
        self.blueprint.el.as_ref()
    }

    // ── Attributes ───────────────────────────────────────────────────

    /// Current value for `key`, or `None` when unset.
    pub fn attr(&self, key: &str) -> Option<&Value> {
        self.attrs.get(key)
    }

    /// Live view of all current attributes (sets merged with defaults).
    pub fn attrs(&self) -> &BTreeMap<String, Value> {
        self.attrs.all()
    }

    /// Sets one attribute.
    ///
    /// Fires [`CHANGE_EVENT`] with `(key, value)` args only when the value
    /// actually changed; setting an equal value is a no-op. Returns whether
    /// a change event fired.
    pub fn set_attr(&mut self, key: &str, value: Value) -> Result<bool, InstanceError> {
        let change = self.attrs.set(key, value).map_err(InstanceError::Attr)?;
        let Some(change) = change else {
            return Ok(false);
        };
        debug!(
            "event=attr_change module=compose instance={} key={}",
            self.id, change.key
        );
        let args = [Value::String(change.key), change.value];
        self.trigger(CHANGE_EVENT, &args)
            .map_err(InstanceError::Event)?;
        Ok(true)
    }

    /// Applies a batch of updates through the single-key path, in key
    /// order. Returns how many change events fired.
    pub fn set_attrs(&mut self, values: BTreeMap<String, Value>) -> Result<usize, InstanceError> {
        let mut changed = 0;
        for (key, value) in values {
            if self.set_attr(&key, value)? {
                changed += 1;
            }
        }
        Ok(changed)
    }

    // ── Events ───────────────────────────────────────────────────────

    /// Registers a handler under `name`; returns its removal token.
    pub fn on<F>(&mut self, name: &str, handler: F) -> Result<HandlerId, EventError>
    where
        F: Fn(&mut Instance, &[Value]) -> Result<(), HandlerError> + 'static,
    {
        let name = valid_event_name(name)?;
        Ok(self.events.register(name, Rc::new(handler), false))
    }

    /// One-shot registration.
    ///
    /// When `name` has already fired at least once, the handler runs
    /// immediately with empty args and nothing is registered (`None`).
    /// Otherwise the handler is appended and removed after its first
    /// invocation.
    pub fn one<F>(&mut self, name: &str, handler: F) -> Result<Option<HandlerId>, EventError>
    where
        F: Fn(&mut Instance, &[Value]) -> Result<(), HandlerError> + 'static,
    {
        let name = valid_event_name(name)?;
        if self.events.was_triggered(name) {
            handler(self, &[]).map_err(EventError::Handler)?;
            return Ok(None);
        }
        Ok(Some(self.events.register(name, Rc::new(handler), true)))
    }

    /// Removes one handler by token; no-op when absent.
    pub fn off(&mut self, name: &str, id: HandlerId) -> Result<(), EventError> {
        let name = valid_event_name(name)?;
        self.events.remove(name, id);
        Ok(())
    }

    /// Removes every handler registered under `name`.
    pub fn off_all(&mut self, name: &str) -> Result<(), EventError> {
        let name = valid_event_name(name)?;
        self.events.clear(name);
        Ok(())
    }

    /// Fires `name`.
    ///
    /// With no handlers registered the call is a no-op and does not mark
    /// the event triggered, so a later one-shot registration still
    /// registers normally. Otherwise the event is marked triggered and a
    /// snapshot of the currently registered handlers is invoked in
    /// registration order with `args` forwarded. One-shot entries are
    /// removed from the live list after they return. Handlers registered
    /// or removed during dispatch affect the live list only, never the
    /// running snapshot. A handler error aborts the remaining invocations
    /// and propagates to the caller unmodified; the failing one-shot entry
    /// stays registered.
    pub fn trigger(&mut self, name: &str, args: &[Value]) -> Result<(), EventError> {
        let name = valid_event_name(name)?;
        let snapshot = self.events.snapshot(name);
        if snapshot.is_empty() {
            return Ok(());
        }
        self.events.mark_triggered(name);
        debug!(
            "event=dispatch module=compose instance={} name={} handlers={}",
            self.id,
            name,
            snapshot.len()
        );
        for entry in snapshot {
            (entry.callback)(self, args).map_err(EventError::Handler)?;
            if entry.once {
                self.events.remove(name, entry.id);
            }
        }
        Ok(())
    }

    /// Whether `name` has ever fired on this instance.
    pub fn triggered(&self, name: &str) -> Result<bool, EventError> {
        let name = valid_event_name(name)?;
        Ok(self.events.was_triggered(name))
    }

    /// Number of handlers currently registered under `name`.
    pub fn handler_count(&self, name: &str) -> Result<usize, EventError> {
        let name = valid_event_name(name)?;
        Ok(self.events.handler_count(name))
    }

    // ── Mixin methods ────────────────────────────────────────────────

    /// Invokes a merged mixin method by name.
    ///
    /// Inherent operations are not reachable through this table; a mixin
    /// method can shadow them in name only.
    pub fn call(&mut self, method: &str, args: &[Value]) -> Result<Value, InstanceError> {
        let found = self.blueprint.methods.get(method).cloned();
        match found {
            Some(callable) => callable(self, args).map_err(InstanceError::Method),
            None => Err(InstanceError::UnknownMethod(method.to_string())),
        }
    }
}

fn valid_event_name(name: &str) -> Result<&str, EventError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(EventError::EmptyEventName);
    }
    Ok(trimmed)
}
