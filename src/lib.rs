//! # eventhub
//!
//! A small observer-pattern hub: a closed set of named events, listeners
//! registered per event, and synchronous dispatch that keeps going when a
//! listener fails and reports every failure at the end.
//!
//! ```
//! use eventhub::{EventHub, Listener};
//! use serde_json::json;
//!
//! let hub = EventHub::with_events(["start", "finish"])?;
//! let greet = Listener::new(|_hub, args| {
//!     assert_eq!(args, [json!("hello")]);
//!     Ok(())
//! });
//! hub.on("start", [greet.clone()])?
//!     .trigger("start", &[json!("hello")])?
//!     .off("start", [greet])?;
//! # Ok::<(), eventhub::HubError>(())
//! ```

pub mod common;
pub mod config;
pub mod event;
pub mod utils;

pub use common::types::{Construction, DispatchContext, HubArg};
pub use config::{ConfigManager, HubConfig};
pub use event::{EventHub, Listener, ListenerCallback};
pub use utils::error::{
    AggregateListenerError, HubError, ListenerError, ListenerFailure, ListenerResult, Result,
};

/// Load a hub declaration from a JSON or YAML file and build the hub.
pub fn init(config_path: &str) -> Result<EventHub<serde_json::Value>> {
    let config = ConfigManager::load_config(config_path)?;
    log::info!("Loaded event hub config from {}", config_path);
    config.into_hub()
}
