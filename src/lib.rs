//! schemakv - type-safe, schema-validated access to key-value storage
//!
//! Every read and write is threaded through a runtime schema validator:
//! data written by an older, incompatible version of the application (or
//! corrupted externally) fails loudly instead of silently violating the
//! caller's type assumptions.

pub mod backend;
pub mod observability;
pub mod schema;
pub mod store;
