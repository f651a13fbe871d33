//! Error types for the event hub.

use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Error a listener may return from its callback.
pub type ListenerError = Box<dyn std::error::Error + Send + Sync>;

/// Return type of a listener callback.
pub type ListenerResult = std::result::Result<(), ListenerError>;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, HubError>;

#[derive(Debug, Error)]
pub enum HubError {
    /// A construction argument was neither an event name nor a target object.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Construction declared no event names.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The attach path was used without a target to attach to.
    #[error("Identity error: {0}")]
    Identity(String),

    /// The event name was not declared when the hub was created.
    #[error("The event name does not exist in this event hub: {0}")]
    UnknownEvent(String),

    /// One or more listeners failed during a single trigger.
    #[error(transparent)]
    Listeners(#[from] AggregateListenerError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    YamlSerialization(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One listener that failed while an event was being dispatched.
#[derive(Debug)]
pub struct ListenerFailure {
    /// Identity of the failing listener, comparable with `Listener::id`.
    pub listener: Uuid,
    /// Label the listener was created with, if any.
    pub label: Option<String>,
    /// What went wrong. Panics are converted into an error carrying the panic message.
    pub error: ListenerError,
    /// Whether the listener panicked rather than returning an error.
    pub panicked: bool,
}

impl fmt::Display for ListenerFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let who = self.label.as_deref().unwrap_or("<anonymous>");
        if self.panicked {
            write!(f, "listener {} ({}) panicked: {}", who, self.listener, self.error)
        } else {
            write!(f, "listener {} ({}) failed: {}", who, self.listener, self.error)
        }
    }
}

/// Every listener failure collected during one trigger, in dispatch order.
#[derive(Debug, Error)]
#[error("{} of the listeners for '{event}' failed: {}", .failures.len(), join_failures(.failures))]
pub struct AggregateListenerError {
    pub event: String,
    pub failures: Vec<ListenerFailure>,
}

impl AggregateListenerError {
    /// Returns true if the listener with this id is among the failures.
    pub fn involves(&self, listener: Uuid) -> bool {
        self.failures.iter().any(|failure| failure.listener == listener)
    }
}

fn join_failures(failures: &[ListenerFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
