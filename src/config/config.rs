use crate::common::types::Construction;
use crate::event::EventHub;
use crate::utils::error::{HubError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Hub declaration as read from a config file.
///
/// `events` is kept loosely typed so that non-string entries surface as
/// [`HubError::InvalidArgument`] instead of a generic parse failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HubConfig {
    pub events: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Value>,
}

impl HubConfig {
    /// Build a fresh hub from this declaration.
    pub fn into_hub(self) -> Result<EventHub<Value>> {
        let values = self.events.into_iter().chain(self.target);
        EventHub::from_values(values, Construction::Fresh)
    }
}

pub struct ConfigManager;

impl ConfigManager {
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<HubConfig> {
        let path_ref = path.as_ref();
        let extension = path_ref
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| HubError::Config("File has no extension".to_string()))?;

        let config_str = fs::read_to_string(path_ref)
            .map_err(|e| HubError::Config(format!("Failed to read config file: {}", e)))?;

        let config: HubConfig = match extension {
            "json" => serde_json::from_str(&config_str)?,
            "yaml" | "yml" => serde_yaml::from_str(&config_str)?,
            _ => {
                return Err(HubError::Config(format!(
                    "Unsupported file extension: {}",
                    extension
                )))
            }
        };

        Self::validate_config(&config)?;

        Ok(config)
    }

    fn validate_config(config: &HubConfig) -> Result<()> {
        if config.events.is_empty() {
            return Err(HubError::Configuration(
                "At least one event name must be declared".to_string(),
            ));
        }

        for event in &config.events {
            match event {
                Value::String(name) if name.trim().is_empty() => {
                    return Err(HubError::Config("Event names must not be empty".to_string()));
                }
                Value::String(_) => {}
                other => {
                    return Err(HubError::InvalidArgument(format!(
                        "Event names must be strings, got {}",
                        other
                    )));
                }
            }
        }

        if let Some(target) = &config.target {
            if !(target.is_object() || target.is_array()) {
                return Err(HubError::InvalidArgument(format!(
                    "The target must be an object, got {}",
                    target
                )));
            }
        }

        Ok(())
    }
}
