//! # Config Loader
//!
//! Configuration loading and parsing module.
//!
//! Responsibilities:
//! - Parse component attributes (JSON) into validated gate configs
//! - Parse module configuration files (the component list the host
//!   runtime would deliver) for standalone runs
//!
//! # Example
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//! use std::path::Path;
//!
//! let module = ConfigLoader::load_from_path(Path::new("config.json")).unwrap();
//! println!("components: {}", module.components.len());
//! ```

mod attributes;

pub use attributes::{CameraGateConfig, DaySpan, GateAttributes, SensorGateConfig, TimestampRange};

use std::collections::HashSet;
use std::path::Path;

use contracts::{ComponentConfig, ContractError};
use serde::{Deserialize, Serialize};

/// Module configuration: the component list to instantiate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleConfig {
    pub components: Vec<ComponentConfig>,
}

/// Configuration loader
///
/// Provides static methods to load configuration from files or strings.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load module configuration from a JSON file.
    ///
    /// # Errors
    /// - File read failure
    /// - Non-JSON extension
    /// - Parse or validation failure
    pub fn load_from_path(path: &Path) -> Result<ModuleConfig, ContractError> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if !ext.eq_ignore_ascii_case("json") {
            return Err(ContractError::config_parse(format!(
                "unsupported config format: '{}', expected .json",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path)?;
        Self::load_from_str(&content)
    }

    /// Load module configuration from a JSON string.
    pub fn load_from_str(content: &str) -> Result<ModuleConfig, ContractError> {
        let config: ModuleConfig =
            serde_json::from_str(content).map_err(|e| ContractError::ConfigParse {
                message: format!("JSON parse error: {e}"),
                source: Some(Box::new(e)),
            })?;
        validate_module_config(&config)?;
        Ok(config)
    }
}

/// Module-level validation: component names present and unique.
///
/// Per-component attribute validation happens in the constructors, where
/// the model is known.
fn validate_module_config(config: &ModuleConfig) -> Result<(), ContractError> {
    let mut seen = HashSet::new();
    for component in &config.components {
        if component.name.is_empty() {
            return Err(ContractError::config_validation(
                "components[].name",
                "component name cannot be empty",
            ));
        }
        if !seen.insert(&component.name) {
            return Err(ContractError::config_validation(
                format!("components[name={}]", component.name),
                "duplicate component name",
            ));
        }
    }
    Ok(())
}
