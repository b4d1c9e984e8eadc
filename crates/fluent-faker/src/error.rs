//! Error types for fake graph generation
//!
//! Every error is raised at the point of detection and propagated to the
//! caller of `include`, `build` or `build_many`. Nothing is retried: a failure
//! means the declared include paths or rules do not match the shape of the
//! target types.

use thiserror::Error;

/// Result type alias for faker operations
pub type FakerResult<T> = Result<T, FakerError>;

/// Error type for fake graph generation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FakerError {
    #[error("Invalid argument '{argument}': {message}")]
    InvalidArgument { argument: String, message: String },

    #[error("Invalid include path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Property '{field}' not found on '{entity}'")]
    PropertyNotFound { entity: String, field: String },

    #[error("Unable to construct '{entity}': {reason}")]
    Construction { entity: String, reason: String },

    #[error("Field '{entity}.{field}' cannot hold a {found} value (expected {expected})")]
    ValueMismatch {
        entity: String,
        field: String,
        expected: String,
        found: String,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl FakerError {
    /// Create an invalid argument error
    pub fn invalid_argument(argument: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument: argument.into(),
            message: message.into(),
        }
    }

    /// Create an include path resolution error
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a property not found error
    pub fn property_not_found(entity: impl Into<String>, field: impl Into<String>) -> Self {
        Self::PropertyNotFound {
            entity: entity.into(),
            field: field.into(),
        }
    }

    /// Create a construction error
    pub fn construction(entity: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Construction {
            entity: entity.into(),
            reason: reason.into(),
        }
    }

    /// Create a value mismatch error
    pub fn value_mismatch(
        entity: impl Into<String>,
        field: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::ValueMismatch {
            entity: entity.into(),
            field: field.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Check if this error was caused by a missing field
    pub fn is_property_not_found(&self) -> bool {
        matches!(self, Self::PropertyNotFound { .. })
    }
}
