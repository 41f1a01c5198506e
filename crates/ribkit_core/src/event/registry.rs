//! Ordered handler storage for named events.

use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

/// Fault raised by a user-registered handler.
///
/// Dispatch propagates this to the `trigger` caller unmodified; the core
/// neither catches nor logs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerError {
    message: String,
}

impl HandlerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for HandlerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "handler failed: {}", self.message)
    }
}

impl Error for HandlerError {}

/// Event registration/dispatch errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventError {
    EmptyEventName,
    Handler(HandlerError),
}

impl Display for EventError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyEventName => write!(f, "event name must not be empty"),
            Self::Handler(err) => write!(f, "{err}"),
        }
    }
}

impl Error for EventError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::EmptyEventName => None,
            Self::Handler(err) => Some(err),
        }
    }
}

/// Stable token identifying one registered handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandlerId(u64);

/// Callback signature shared by all event handlers for a context `C`.
pub type Callback<C> = Rc<dyn Fn(&mut C, &[Value]) -> Result<(), HandlerError>>;

struct HandlerEntry<C> {
    id: HandlerId,
    once: bool,
    callback: Callback<C>,
}

/// Dispatch-time view of one registered handler.
pub struct HandlerSnapshot<C> {
    pub id: HandlerId,
    pub once: bool,
    pub callback: Callback<C>,
}

/// Per-context handler lists plus the triggered-event record.
pub struct HandlerRegistry<C> {
    handlers: BTreeMap<String, Vec<HandlerEntry<C>>>,
    triggered: BTreeSet<String>,
    next_id: u64,
}

impl<C> HandlerRegistry<C> {
    pub fn new() -> Self {
        Self {
            handlers: BTreeMap::new(),
            triggered: BTreeSet::new(),
            next_id: 1,
        }
    }

    /// Appends one handler under `name`, returning its removal token.
    pub fn register(&mut self, name: &str, callback: Callback<C>, once: bool) -> HandlerId {
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        self.handlers
            .entry(name.to_string())
            .or_default()
            .push(HandlerEntry { id, once, callback });
        id
    }

    /// Removes one handler by token, preserving the order of the rest.
    /// No-op when `name` or the token is unknown.
    pub fn remove(&mut self, name: &str, id: HandlerId) {
        if let Some(entries) = self.handlers.get_mut(name) {
            entries.retain(|entry| entry.id != id);
        }
    }

    /// Removes every handler registered under `name`.
    pub fn clear(&mut self, name: &str) {
        self.handlers.remove(name);
    }

    /// Returns the current handler list for dispatch iteration.
    ///
    /// The snapshot is independent of the live list: removals applied
    /// during dispatch do not shift its iteration.
    pub fn snapshot(&self, name: &str) -> Vec<HandlerSnapshot<C>> {
        self.handlers
            .get(name)
            .map(|entries| {
                entries
                    .iter()
                    .map(|entry| HandlerSnapshot {
                        id: entry.id,
                        once: entry.once,
                        callback: Rc::clone(&entry.callback),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Records that `name` has fired at least once.
    pub fn mark_triggered(&mut self, name: &str) {
        self.triggered.insert(name.to_string());
    }

    /// Whether `name` has ever fired.
    pub fn was_triggered(&self, name: &str) -> bool {
        self.triggered.contains(name)
    }

    /// Number of handlers currently registered under `name`.
    pub fn handler_count(&self, name: &str) -> usize {
        self.handlers.get(name).map_or(0, Vec::len)
    }
}

impl<C> Default for HandlerRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}
