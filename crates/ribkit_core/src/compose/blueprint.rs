//! Ordered mixin merge and the constructor it produces.

use crate::attr::store::AttrStore;
use crate::compose::instance::Instance;
use crate::compose::resolver::{ElementResolver, ResolveError};
use crate::event::registry::{HandlerError, HandlerRegistry};
use crate::mixin::definition::{InitFn, MethodFn, Mixin};
use log::debug;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

/// Composition and construction errors.
#[derive(Debug)]
pub enum ComposeError {
    InvalidMixinLabel(String),
    DuplicateMixinLabel(String),
    InvalidAttributeKey { mixin: String, key: String },
    InvalidMethodName { mixin: String, name: String },
    /// The merged `el` is a selector string but no resolver is configured.
    ResolverMissing(String),
    Resolve(ResolveError),
    Initializer(HandlerError),
}

impl Display for ComposeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMixinLabel(label) => write!(f, "mixin label is invalid: {label}"),
            Self::DuplicateMixinLabel(label) => {
                write!(f, "mixin label already merged: {label}")
            }
            Self::InvalidAttributeKey { mixin, key } => {
                write!(f, "mixin `{mixin}` declares an invalid attribute key: {key:?}")
            }
            Self::InvalidMethodName { mixin, name } => {
                write!(f, "mixin `{mixin}` declares an invalid method name: {name:?}")
            }
            Self::ResolverMissing(selector) => {
                write!(f, "no resolver configured for selector: {selector}")
            }
            Self::Resolve(err) => write!(f, "{err}"),
            Self::Initializer(err) => write!(f, "initializer failed: {}", err.message()),
        }
    }
}

impl Error for ComposeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Resolve(err) => Some(err),
            Self::Initializer(err) => Some(err),
            _ => None,
        }
    }
}

/// Ordered mixin merge producing a constructor blueprint.
#[derive(Default)]
pub struct Composer {
    mixins: Vec<Mixin>,
    resolver: Option<Rc<dyn ElementResolver>>,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one mixin. Later mixins take precedence on name collisions.
    pub fn mixin(mut self, mixin: Mixin) -> Self {
        self.mixins.push(mixin);
        self
    }

    /// Configures the selector resolution collaborator.
    pub fn resolver(mut self, resolver: Rc<dyn ElementResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Validates and merges all mixins into a blueprint.
    ///
    /// Merge order is lowest to highest precedence: the built-in attribute
    /// and event capabilities (inherent on [`Instance`], so they contribute
    /// no dynamic members), then each user mixin in the order given. Later
    /// mixins overwrite same-named defaults and methods and replace the
    /// `el`/initializer members wholesale.
    pub fn build(self) -> Result<Blueprint, ComposeError> {
        let mut labels: Vec<String> = Vec::new();
        let mut seen: BTreeSet<String> = BTreeSet::new();
        let mut defaults: BTreeMap<String, Value> = BTreeMap::new();
        let mut methods: BTreeMap<String, MethodFn> = BTreeMap::new();
        let mut el: Option<Value> = None;
        let mut initializer: Option<InitFn> = None;

        for mixin in self.mixins {
            let label = mixin.label.trim().to_string();
            if !is_valid_label(&label) {
                return Err(ComposeError::InvalidMixinLabel(label));
            }
            if !seen.insert(label.clone()) {
                return Err(ComposeError::DuplicateMixinLabel(label));
            }

            for (key, value) in mixin.defaults {
                if key.trim().is_empty() {
                    return Err(ComposeError::InvalidAttributeKey {
                        mixin: label.clone(),
                        key,
                    });
                }
                defaults.insert(key, value);
            }
            for (name, method) in mixin.methods {
                if name.trim().is_empty() {
                    return Err(ComposeError::InvalidMethodName {
                        mixin: label.clone(),
                        name,
                    });
                }
                methods.insert(name, method);
            }
            if mixin.el.is_some() {
                el = mixin.el;
            }
            if mixin.initializer.is_some() {
                initializer = mixin.initializer;
            }
            labels.push(label);
        }

        debug!(
            "event=compose_build module=compose status=ok mixins={} defaults={} methods={}",
            labels.len(),
            defaults.len(),
            methods.len()
        );

        Ok(Blueprint {
            inner: Rc::new(BlueprintInner {
                labels,
                defaults,
                methods,
                el,
                initializer,
                resolver: self.resolver,
            }),
        })
    }
}

/// Convenience factory: merges `mixins` with no resolver configured.
pub fn compose(mixins: Vec<Mixin>) -> Result<Blueprint, ComposeError> {
    let mut composer = Composer::new();
    for mixin in mixins {
        composer = composer.mixin(mixin);
    }
    composer.build()
}

pub(crate) struct BlueprintInner {
    pub(crate) labels: Vec<String>,
    pub(crate) defaults: BTreeMap<String, Value>,
    pub(crate) methods: BTreeMap<String, MethodFn>,
    pub(crate) el: Option<Value>,
    pub(crate) initializer: Option<InitFn>,
    pub(crate) resolver: Option<Rc<dyn ElementResolver>>,
}

/// Immutable constructor descriptor produced by [`Composer::build`].
///
/// Cloning is cheap; all clones construct instances from the same merged
/// prototype.
#[derive(Clone)]
pub struct Blueprint {
    inner: Rc<BlueprintInner>,
}

impl std::fmt::Debug for Blueprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Blueprint")
            .field("labels", &self.inner.labels)
            .field("defaults", &self.inner.defaults)
            .field("el", &self.inner.el)
            .finish_non_exhaustive()
    }
}

impl Blueprint {
    /// Labels of the merged mixins, in merge order.
    pub fn labels(&self) -> &[String] {
        &self.inner.labels
    }

    /// Merged attribute defaults.
    pub fn defaults(&self) -> &BTreeMap<String, Value> {
        &self.inner.defaults
    }

    /// Constructs one instance.
    ///
    /// Each instance gets fresh attribute and handler containers seeded
    /// from the blueprint, so construction-time state is never shared
    /// between instances. When the merged `el` is a string, the configured
    /// resolver is called exactly once and the handle stored. The user
    /// initializer, if any, runs last with `args`.
    pub fn construct(&self, args: &[Value]) -> Result<Instance, ComposeError> {
        let attrs = AttrStore::new(self.inner.defaults.clone());
        let events = HandlerRegistry::new();

        let mut element = None;
        if let Some(el) = &self.inner.el {
            if let Some(selector) = el.as_str() {
                let resolver = self
                    .inner
                    .resolver
                    .as_ref()
                    .ok_or_else(|| ComposeError::ResolverMissing(selector.to_string()))?;
                element = Some(resolver.resolve(selector).map_err(ComposeError::Resolve)?);
            }
        }

        let mut instance = Instance::new(Rc::clone(&self.inner), attrs, events, element);
        debug!(
            "event=construct module=compose status=ok instance={} mixins={}",
            instance.id(),
            self.inner.labels.len()
        );

        if let Some(initializer) = &self.inner.initializer {
            let initializer = Rc::clone(initializer);
            initializer(&mut instance, args).map_err(ComposeError::Initializer)?;
        }
        Ok(instance)
    }
}

fn is_valid_label(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
}
