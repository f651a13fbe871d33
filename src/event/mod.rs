//! Event hub module.
//!
//! Named events with synchronous, in-process dispatch to registered
//! listeners.

pub mod hub;
pub mod listener;

pub use hub::EventHub;
pub use listener::Listener;
pub use listener::ListenerCallback;
