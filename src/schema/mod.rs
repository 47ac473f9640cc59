//! Schema subsystem for schemakv
//!
//! A schema is a declarative, finite, acyclic description of an allowed
//! value shape. The validator decides acceptance of arbitrary runtime JSON
//! against a schema and reports a structured violation on rejection.
//!
//! # Design Principles
//!
//! - Schemas are pure data, immutable once constructed
//! - Validation is deterministic and performs no I/O
//! - No implicit coercion, no default substitution
//! - Structural problems in the schema itself are detected before any
//!   value is inspected

mod errors;
mod types;
mod validator;

pub use errors::{
    SchemaDefinitionError, SchemaResult, ValidationResult, Violation, ViolationReason,
};
pub use types::{ItemsSchema, JsonSchema};
pub use validator::validate;
