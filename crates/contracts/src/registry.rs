//! ComponentRegistry - model identifiers and constructors
//!
//! The host runtime looks up a constructor by model triple when it
//! instantiates a component from configuration. Registration happens once
//! at module startup.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{ContractError, Dependencies, Resource};

/// Model triple identifying a component implementation,
/// e.g. `timegate:camera:time-select-capture`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Model {
    pub namespace: String,
    pub kind: String,
    pub name: String,
}

impl Model {
    /// Create a model triple
    pub fn new(
        namespace: impl Into<String>,
        kind: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            kind: kind.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.namespace, self.kind, self.name)
    }
}

impl FromStr for Model {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(ns), Some(kind), Some(name), None)
                if !ns.is_empty() && !kind.is_empty() && !name.is_empty() =>
            {
                Ok(Self::new(ns, kind, name))
            }
            _ => Err(ContractError::config_validation(
                "model",
                format!("expected 'namespace:kind:name', got '{s}'"),
            )),
        }
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// One component entry as the host runtime configures it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentConfig {
    /// Instance name the component registers under
    pub name: String,

    /// Model triple selecting the constructor
    pub model: Model,

    /// Model-specific attributes (opaque to the registry)
    #[serde(default)]
    pub attributes: serde_json::Value,
}

/// Component constructor.
///
/// Receives the instance configuration and the resolved dependency set,
/// returns the constructed resource or a fatal configuration error.
pub type Constructor =
    Box<dyn Fn(&ComponentConfig, &Dependencies) -> Result<Resource, ContractError> + Send + Sync>;

/// Model -> constructor table.
#[derive(Default)]
pub struct ComponentRegistry {
    constructors: HashMap<Model, Constructor>,
}

impl ComponentRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a constructor for a model.
    ///
    /// # Errors
    /// Duplicate registration for the same model is rejected.
    pub fn register(&mut self, model: Model, constructor: Constructor) -> Result<(), ContractError> {
        if self.constructors.contains_key(&model) {
            return Err(ContractError::ModelAlreadyRegistered {
                model: model.to_string(),
            });
        }
        self.constructors.insert(model, constructor);
        Ok(())
    }

    /// Construct a component instance from its configuration.
    pub fn construct(
        &self,
        config: &ComponentConfig,
        deps: &Dependencies,
    ) -> Result<Resource, ContractError> {
        let constructor =
            self.constructors
                .get(&config.model)
                .ok_or_else(|| ContractError::ModelNotRegistered {
                    model: config.model.to_string(),
                })?;
        constructor(config, deps)
    }

    /// Registered models, in no particular order
    pub fn models(&self) -> impl Iterator<Item = &Model> {
        self.constructors.keys()
    }

    /// Number of registered models
    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    /// True when nothing is registered
    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}
