//! Typed key bindings
//!
//! Rust cannot infer a value type from a schema literal the way a
//! structurally-typed language can, so the binding is declared once: a
//! `TypedKey<T>` pairs a key name and its schema with the Rust type the
//! caller expects back. Constructing one runs the structural schema check,
//! so later reads and writes skip it.

use std::marker::PhantomData;

use crate::schema::{JsonSchema, SchemaResult};

/// A key name bound to a schema and an expected Rust type.
pub struct TypedKey<T> {
    name: String,
    schema: JsonSchema,
    _value: PhantomData<fn() -> T>,
}

impl<T> TypedKey<T> {
    /// Binds a key name to a schema, checking the schema's structure.
    pub fn new(name: impl Into<String>, schema: JsonSchema) -> SchemaResult<Self> {
        schema.check_structure()?;
        Ok(Self {
            name: name.into(),
            schema,
            _value: PhantomData,
        })
    }

    /// The key name used in the backend
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The schema every read and write of this key is validated against
    pub fn schema(&self) -> &JsonSchema {
        &self.schema
    }
}

// Manual impls: `T` is phantom, so no bounds on it are needed
impl<T> Clone for TypedKey<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            schema: self.schema.clone(),
            _value: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for TypedKey<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypedKey")
            .field("name", &self.name)
            .field("schema", &self.schema)
            .finish()
    }
}
