//! Listener handles for the event hub.
//!
//! A listener wraps a callback together with a stable identity. Cloning a
//! listener keeps its identity, so the clone can later be passed to `off`
//! to remove the original registration. Two listeners built separately are
//! always distinct, even when they wrap the same function.

use crate::event::hub::EventHub;
use crate::utils::error::ListenerResult;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Type alias for listener callback functions.
pub type ListenerCallback<C> = Arc<dyn Fn(&EventHub<C>, &[Value]) -> ListenerResult + Send + Sync>;

/// Identity-comparable listener.
pub struct Listener<C> {
    /// Unique ID of the listener
    id: Uuid,
    /// Optional human readable name, used in logs and failure reports
    label: Option<String>,
    callback: ListenerCallback<C>,
}

impl<C> Listener<C> {
    /// Create a new listener
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&EventHub<C>, &[Value]) -> ListenerResult + Send + Sync + 'static,
    {
        Listener {
            id: Uuid::new_v4(),
            label: None,
            callback: Arc::new(callback),
        }
    }

    /// Create a new listener with a label
    pub fn named<F>(label: impl Into<String>, callback: F) -> Self
    where
        F: Fn(&EventHub<C>, &[Value]) -> ListenerResult + Send + Sync + 'static,
    {
        let mut listener = Self::new(callback);
        listener.label = Some(label.into());
        listener
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Invoke the callback with `hub` as receiver.
    pub fn call(&self, hub: &EventHub<C>, args: &[Value]) -> ListenerResult {
        (self.callback)(hub, args)
    }
}

// Manual impls: `C` itself does not need to be Clone or Debug.
impl<C> Clone for Listener<C> {
    fn clone(&self) -> Self {
        Listener {
            id: self.id,
            label: self.label.clone(),
            callback: Arc::clone(&self.callback),
        }
    }
}

impl<C> PartialEq for Listener<C> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<C> Eq for Listener<C> {}

impl<C> fmt::Debug for Listener<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("id", &self.id)
            .field("label", &self.label)
            .finish()
    }
}
