//! Storage service error types

use thiserror::Error;

use crate::backend::BackendError;
use crate::schema::{SchemaDefinitionError, Violation};

/// Result type for storage service operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures of the typed storage service
#[derive(Debug, Error)]
pub enum StoreError {
    /// Stored or supplied data violates the schema given at the call site
    #[error("value for key '{key}' violates its schema: {violation}")]
    Validation { key: String, violation: Violation },

    /// The supplied schema itself is malformed
    #[error(transparent)]
    Definition(#[from] SchemaDefinitionError),

    /// Schema-valid data did not fit the caller's Rust type
    #[error("decoding value for key '{key}' failed: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The caller's value could not be serialized to JSON
    #[error("encoding value for key '{key}' failed: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Opaque backend failure, surfaced unchanged and never retried
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl StoreError {
    pub fn validation(key: impl Into<String>, violation: Violation) -> Self {
        StoreError::Validation {
            key: key.into(),
            violation,
        }
    }

    /// Returns the violation for validation failures
    pub fn violation(&self) -> Option<&Violation> {
        match self {
            StoreError::Validation { violation, .. } => Some(violation),
            _ => None,
        }
    }
}
