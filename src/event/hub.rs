//! Event hub.
//!
//! The hub owns a closed set of event names, each with an ordered list of
//! listeners, and dispatches synchronously. Dispatch works on a snapshot of
//! the listener list taken when `trigger` starts: listeners added while an
//! event is being dispatched are first called on the next trigger, and
//! listeners removed meanwhile still run in the current one. The registry
//! lock is never held while a listener runs, so listeners may freely call
//! back into the hub they receive.

use crate::common::types::{Construction, DispatchContext, HubArg};
use crate::event::listener::Listener;
use crate::utils::error::{AggregateListenerError, HubError, ListenerFailure, Result};
use parking_lot::RwLock;
use serde_json::Value;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Handle to an event hub. Clones share the same registry and context.
pub struct EventHub<C = ()> {
    inner: Arc<HubInner<C>>,
}

struct HubInner<C> {
    /// Declared event names, in first-declaration order
    names: Vec<String>,
    /// Map of event names to listeners
    listeners: RwLock<HashMap<String, Vec<Listener<C>>>>,
    context: DispatchContext<C>,
}

impl<C> EventHub<C> {
    /// Create a new, distinct hub. Without a target argument the hub is its
    /// own dispatch context.
    pub fn new<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = HubArg<C>>,
    {
        Self::construct(args, Construction::Fresh)
    }

    /// Create a hub attached to the supplied target. Fails with
    /// [`HubError::Identity`] when no target argument is present.
    pub fn attach<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = HubArg<C>>,
    {
        Self::construct(args, Construction::Attach)
    }

    /// Create a hub for `names` with `target` as dispatch context.
    pub fn with_target<I, S>(names: I, target: C) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args = names
            .into_iter()
            .map(|name| HubArg::Event(name.into()))
            .chain(std::iter::once(HubArg::Target(target)));
        Self::new(args)
    }

    pub fn construct<I>(args: I, mode: Construction) -> Result<Self>
    where
        I: IntoIterator<Item = HubArg<C>>,
    {
        let mut names = Vec::new();
        let mut listeners = HashMap::new();
        let mut target = None;

        for arg in args {
            match arg {
                HubArg::Event(name) => {
                    if !listeners.contains_key(&name) {
                        listeners.insert(name.clone(), Vec::new());
                        names.push(name);
                    }
                }
                // last one wins
                HubArg::Target(value) => target = Some(value),
            }
        }

        if names.is_empty() {
            return Err(HubError::Configuration(
                "There should be at least one event name for the event hub to be useful".to_string(),
            ));
        }

        let context = match (target, mode) {
            (Some(value), _) => DispatchContext::Target(value),
            (None, Construction::Fresh) => DispatchContext::Hub,
            (None, Construction::Attach) => {
                return Err(HubError::Identity(
                    "The event hub is not created as a new instance and no target object is passed to it"
                        .to_string(),
                ))
            }
        };

        log::debug!(
            "Created event hub for {:?} ({} context)",
            names,
            if context.is_hub() { "hub" } else { "target" }
        );

        Ok(EventHub {
            inner: Arc::new(HubInner {
                names,
                listeners: RwLock::new(listeners),
                context,
            }),
        })
    }

    /// Register listeners for an event. Listeners already registered for
    /// this event are skipped.
    pub fn on<I>(&self, event: &str, listeners: I) -> Result<&Self>
    where
        I: IntoIterator<Item = Listener<C>>,
    {
        let mut registry = self.inner.listeners.write();
        let list = registry.get_mut(event).ok_or_else(|| unknown_event(event))?;

        for listener in listeners {
            if list.contains(&listener) {
                log::debug!("Listener {} already registered for '{}'", listener.id(), event);
                continue;
            }
            log::debug!("Registering listener {} for '{}'", listener.id(), event);
            list.push(listener);
        }

        Ok(self)
    }

    /// Remove every listener of every event.
    pub fn off_all(&self) -> &Self {
        let mut registry = self.inner.listeners.write();
        for list in registry.values_mut() {
            list.clear();
        }
        log::debug!("Removed all listeners");
        self
    }

    /// Remove every listener of one event.
    pub fn off_event(&self, event: &str) -> Result<&Self> {
        let mut registry = self.inner.listeners.write();
        let list = registry.get_mut(event).ok_or_else(|| unknown_event(event))?;
        list.clear();
        log::debug!("Removed all listeners for '{}'", event);
        Ok(self)
    }

    /// Remove specific listeners from an event. Listeners that are not
    /// registered are ignored.
    pub fn off<I>(&self, event: &str, listeners: I) -> Result<&Self>
    where
        I: IntoIterator<Item = Listener<C>>,
    {
        let mut registry = self.inner.listeners.write();
        let list = registry.get_mut(event).ok_or_else(|| unknown_event(event))?;

        for listener in listeners {
            if let Some(index) = list.iter().position(|existing| *existing == listener) {
                list.remove(index);
                log::debug!("Unregistered listener {} from '{}'", listener.id(), event);
            }
        }

        Ok(self)
    }

    /// Call every listener of `event` with `args`, in registration order.
    ///
    /// A listener that returns an error or panics does not stop the others.
    /// Once all of them have run, any failures are reported together as
    /// [`HubError::Listeners`].
    pub fn trigger(&self, event: &str, args: &[Value]) -> Result<&Self> {
        let snapshot: Vec<Listener<C>> = {
            let registry = self.inner.listeners.read();
            registry.get(event).ok_or_else(|| unknown_event(event))?.clone()
        };

        let mut failures = Vec::new();
        for listener in &snapshot {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| listener.call(self, args)));
            let failure = match outcome {
                Ok(Ok(())) => continue,
                Ok(Err(error)) => ListenerFailure {
                    listener: listener.id(),
                    label: listener.label().map(str::to_string),
                    error,
                    panicked: false,
                },
                Err(payload) => ListenerFailure {
                    listener: listener.id(),
                    label: listener.label().map(str::to_string),
                    error: panic_message(payload.as_ref()).into(),
                    panicked: true,
                },
            };
            log::warn!("Error handling event '{}': {}", event, failure);
            failures.push(failure);
        }

        if failures.is_empty() {
            Ok(self)
        } else {
            Err(AggregateListenerError {
                event: event.to_string(),
                failures,
            }
            .into())
        }
    }

    /// Declared event names, in declaration order.
    pub fn event_names(&self) -> &[String] {
        &self.inner.names
    }

    pub fn is_declared(&self, event: &str) -> bool {
        self.inner.listeners.read().contains_key(event)
    }

    /// Get the number of listeners for a specific event
    pub fn listener_count(&self, event: &str) -> Result<usize> {
        let registry = self.inner.listeners.read();
        registry
            .get(event)
            .map(Vec::len)
            .ok_or_else(|| unknown_event(event))
    }

    /// Get the total number of listeners across all events
    pub fn total_listener_count(&self) -> usize {
        self.inner.listeners.read().values().map(Vec::len).sum()
    }

    pub fn has_listeners(&self, event: &str) -> Result<bool> {
        Ok(self.listener_count(event)? > 0)
    }

    /// Whether `listener` is registered for `event`.
    pub fn contains(&self, event: &str, listener: &Listener<C>) -> Result<bool> {
        let registry = self.inner.listeners.read();
        registry
            .get(event)
            .map(|list| list.contains(listener))
            .ok_or_else(|| unknown_event(event))
    }

    /// The receiver context listeners are dispatched against.
    pub fn context(&self) -> &DispatchContext<C> {
        &self.inner.context
    }

    /// The attached target, or `None` when the hub is its own context.
    pub fn target(&self) -> Option<&C> {
        self.inner.context.target()
    }

    /// Whether both handles refer to the same hub.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl EventHub<()> {
    /// Create a new hub that is its own dispatch context.
    pub fn with_events<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(names.into_iter().map(|name| HubArg::Event(name.into())))
    }
}

impl EventHub<Value> {
    /// Build a hub from dynamically typed arguments: strings declare event
    /// names, objects and arrays designate the target. Anything else is an
    /// [`HubError::InvalidArgument`].
    pub fn from_values<I>(values: I, mode: Construction) -> Result<Self>
    where
        I: IntoIterator<Item = Value>,
    {
        let args = values
            .into_iter()
            .map(|value| match value {
                Value::String(name) => Ok(HubArg::Event(name)),
                Value::Object(_) | Value::Array(_) => Ok(HubArg::Target(value)),
                other => Err(HubError::InvalidArgument(format!(
                    "only string and object arguments are accepted, got {}",
                    other
                ))),
            })
            .collect::<Result<Vec<_>>>()?;
        Self::construct(args, mode)
    }
}

impl<C> Clone for EventHub<C> {
    fn clone(&self) -> Self {
        EventHub {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: fmt::Debug> fmt::Debug for EventHub<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHub")
            .field("events", &self.inner.names)
            .field("listeners", &self.total_listener_count())
            .field("context", &self.inner.context)
            .finish()
    }
}

fn unknown_event(event: &str) -> HubError {
    HubError::UnknownEvent(event.to_string())
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "listener panicked".to_string()
    }
}
