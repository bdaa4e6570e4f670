//! Dependencies - resources injected by the host runtime
//!
//! The runtime resolves each component's declared dependencies and hands
//! them to the constructor (and again on every reconfiguration). Lookup is
//! by registered name; a wrong-capability hit is an error distinct from a
//! missing one.

use std::collections::HashMap;
use std::sync::Arc;

use crate::{Camera, ContractError, Sensor};

/// A resolved resource of any supported capability.
#[derive(Clone)]
pub enum Resource {
    Camera(Arc<dyn Camera>),
    Sensor(Arc<dyn Sensor>),
}

impl Resource {
    /// Capability kind, for logs and error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Resource::Camera(_) => "camera",
            Resource::Sensor(_) => "sensor",
        }
    }
}

impl std::fmt::Debug for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resource::Camera(c) => write!(f, "Resource::Camera({})", c.name()),
            Resource::Sensor(s) => write!(f, "Resource::Sensor({})", s.name()),
        }
    }
}

/// Injected dependency set.
#[derive(Default, Clone)]
pub struct Dependencies {
    resources: HashMap<String, Resource>,
}

impl Dependencies {
    /// Create an empty dependency set
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resolved resource under a name
    pub fn insert(&mut self, name: impl Into<String>, resource: Resource) {
        self.resources.insert(name.into(), resource);
    }

    /// Look up a camera dependency by name
    pub fn camera(&self, name: &str) -> Result<Arc<dyn Camera>, ContractError> {
        match self.resources.get(name) {
            Some(Resource::Camera(camera)) => Ok(camera.clone()),
            Some(_) => Err(ContractError::DependencyType {
                name: name.to_string(),
                expected: "camera",
            }),
            None => Err(ContractError::dependency_not_found(name)),
        }
    }

    /// Look up a sensor dependency by name
    pub fn sensor(&self, name: &str) -> Result<Arc<dyn Sensor>, ContractError> {
        match self.resources.get(name) {
            Some(Resource::Sensor(sensor)) => Ok(sensor.clone()),
            Some(_) => Err(ContractError::DependencyType {
                name: name.to_string(),
                expected: "sensor",
            }),
            None => Err(ContractError::dependency_not_found(name)),
        }
    }

    /// Whether a resource with this name exists (any capability)
    pub fn contains(&self, name: &str) -> bool {
        self.resources.contains_key(name)
    }

    /// Number of injected resources
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// True when no resources are injected
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}
