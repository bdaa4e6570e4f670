//! Layered error definitions
//!
//! Categorized by source: config / dependency / component / capability

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Dependency Errors =====
    /// Named dependency missing from the injected set
    #[error("dependency '{name}' not found")]
    DependencyNotFound { name: String },

    /// Named dependency exists but has the wrong capability
    #[error("dependency '{name}' is not a {expected}")]
    DependencyType { name: String, expected: &'static str },

    // ===== Component Errors =====
    /// Component cannot serve until reconfigured successfully
    #[error("component '{name}' is inoperative: {message}")]
    Inoperative { name: String, message: String },

    /// Duplicate model registration
    #[error("model '{model}' is already registered")]
    ModelAlreadyRegistered { model: String },

    /// No constructor registered for the requested model
    #[error("no registration for model '{model}'")]
    ModelNotRegistered { model: String },

    // ===== Capability Errors =====
    /// Optional capability operation not provided by this component
    #[error("operation '{operation}' is not implemented")]
    Unimplemented { operation: &'static str },

    /// Sentinel: the current instant is outside the configured window.
    /// Tells the data-capture service to skip this cycle; not a failure.
    #[error("no capture to store")]
    NoCaptureToStore,

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create dependency-not-found error
    pub fn dependency_not_found(name: impl Into<String>) -> Self {
        Self::DependencyNotFound { name: name.into() }
    }

    /// Create inoperative-component error
    pub fn inoperative(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Inoperative {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create unimplemented-operation error
    pub fn unimplemented(operation: &'static str) -> Self {
        Self::Unimplemented { operation }
    }

    /// True if this is the skip-this-cycle sentinel rather than a failure
    pub fn is_no_capture_to_store(&self) -> bool {
        matches!(self, Self::NoCaptureToStore)
    }
}
