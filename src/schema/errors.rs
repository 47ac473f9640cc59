//! Schema error and validation-result types
//!
//! Two distinct failure families live here:
//! - `SchemaDefinitionError`: the schema itself is malformed
//! - `Violation`: well-formed schema, non-conforming value

use thiserror::Error;

/// Result type for schema-definition checks
pub type SchemaResult<T> = Result<T, SchemaDefinitionError>;

/// The supplied schema is structurally invalid.
///
/// Detected by [`crate::schema::JsonSchema::check_structure`], before any
/// value is validated and before any backend call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaDefinitionError {
    #[error("tuple schema must declare at least one item")]
    EmptyTupleItems,

    #[error("enum constraint must list at least one member")]
    EmptyEnum,

    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("'{lower}' must not exceed '{upper}'")]
    InvertedBounds {
        lower: &'static str,
        upper: &'static str,
    },
}

/// Which constraint a value failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViolationReason {
    #[error("expected {expected}, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("expected an integral number")]
    NotInteger,

    #[error("value does not equal the declared const")]
    ConstMismatch,

    #[error("value is not a member of the declared enum")]
    NotInEnum,

    #[error("number out of declared range")]
    OutOfRange,

    #[error("string length {actual} out of declared bounds")]
    StringLengthOutOfBounds { actual: usize },

    #[error("string does not match pattern '{0}'")]
    PatternMismatch(String),

    #[error("array length {actual} out of declared bounds")]
    ArrayLengthOutOfBounds { actual: usize },

    #[error("tuple expects exactly {expected} items, got {actual}")]
    TupleLengthMismatch { expected: usize, actual: usize },

    #[error("missing required property '{0}'")]
    MissingRequiredProperty(String),

    #[error("invalid schema: {0}")]
    InvalidSchema(String),
}

/// A single validation failure: where in the value, and which constraint.
///
/// Paths are rooted at `$`, e.g. `$.address.city` or `$[2]`.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("at {path}: {reason}")]
pub struct Violation {
    pub path: String,
    pub reason: ViolationReason,
}

impl Violation {
    pub fn new(path: impl Into<String>, reason: ViolationReason) -> Self {
        Self {
            path: path.into(),
            reason,
        }
    }
}

/// Outcome of validating a value against a schema.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult {
    Valid,
    Invalid(Violation),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// Converts into `Result` form for `?`-style propagation.
    pub fn ok(self) -> Result<(), Violation> {
        match self {
            ValidationResult::Valid => Ok(()),
            ValidationResult::Invalid(violation) => Err(violation),
        }
    }

    /// Returns the violation, if any.
    pub fn violation(&self) -> Option<&Violation> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid(violation) => Some(violation),
        }
    }
}
