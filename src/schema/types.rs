//! Schema type definitions
//!
//! Supported types:
//! - string: UTF-8 string, optional const/enum/length/pattern constraints
//! - number: 64-bit floating point, optional const/enum/range constraints
//! - integer: integral number, optional const/enum/range constraints
//! - boolean: no refinement beyond the type
//! - array: homogeneous (single items schema) or fixed-arity tuple
//!   (ordered items sequence)
//! - object: named properties with a required-name set

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::errors::{SchemaDefinitionError, SchemaResult};

/// Items declaration of an array schema.
///
/// A single schema describes a homogeneous array; an ordered sequence
/// describes a fixed-length tuple, each position independently typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemsSchema {
    /// Every element conforms to one schema
    Single(Box<JsonSchema>),
    /// Position `i` conforms to schema `i`; length must match exactly
    Tuple(Vec<JsonSchema>),
}

/// A declarative description of an allowed value shape.
///
/// Structurally recursive but finite (no self-reference is expressible);
/// carries no behavior and is immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum JsonSchema {
    /// UTF-8 string
    String {
        #[serde(rename = "const", default, skip_serializing_if = "Option::is_none")]
        const_value: Option<String>,
        #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
        enum_values: Option<Vec<String>>,
        #[serde(rename = "minLength", default, skip_serializing_if = "Option::is_none")]
        min_length: Option<usize>,
        #[serde(rename = "maxLength", default, skip_serializing_if = "Option::is_none")]
        max_length: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pattern: Option<String>,
    },
    /// 64-bit floating point (integral values accepted)
    Number {
        #[serde(rename = "const", default, skip_serializing_if = "Option::is_none")]
        const_value: Option<f64>,
        #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
        enum_values: Option<Vec<f64>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        minimum: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        maximum: Option<f64>,
    },
    /// Integral number (non-integral numerics rejected)
    Integer {
        #[serde(rename = "const", default, skip_serializing_if = "Option::is_none")]
        const_value: Option<i64>,
        #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
        enum_values: Option<Vec<i64>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        minimum: Option<i64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        maximum: Option<i64>,
    },
    /// Boolean
    Boolean,
    /// Homogeneous array or fixed-length tuple
    Array {
        items: ItemsSchema,
        #[serde(rename = "minItems", default, skip_serializing_if = "Option::is_none")]
        min_items: Option<usize>,
        #[serde(rename = "maxItems", default, skip_serializing_if = "Option::is_none")]
        max_items: Option<usize>,
    },
    /// Nested object; names absent from `required` are optional, value
    /// properties not named in `properties` are ignored
    Object {
        #[serde(default)]
        properties: BTreeMap<String, JsonSchema>,
        #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
        required: BTreeSet<String>,
    },
}

impl JsonSchema {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            JsonSchema::String { .. } => "string",
            JsonSchema::Number { .. } => "number",
            JsonSchema::Integer { .. } => "integer",
            JsonSchema::Boolean => "boolean",
            JsonSchema::Array { .. } => "array",
            JsonSchema::Object { .. } => "object",
        }
    }

    /// Create an unconstrained string schema
    pub fn string() -> Self {
        JsonSchema::String {
            const_value: None,
            enum_values: None,
            min_length: None,
            max_length: None,
            pattern: None,
        }
    }

    /// Create a string schema accepting a single literal
    pub fn string_const(value: impl Into<String>) -> Self {
        JsonSchema::String {
            const_value: Some(value.into()),
            enum_values: None,
            min_length: None,
            max_length: None,
            pattern: None,
        }
    }

    /// Create a string schema accepting a finite set of literals
    pub fn string_enum<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        JsonSchema::String {
            const_value: None,
            enum_values: Some(members.into_iter().map(Into::into).collect()),
            min_length: None,
            max_length: None,
            pattern: None,
        }
    }

    /// Create an unconstrained number schema
    pub fn number() -> Self {
        JsonSchema::Number {
            const_value: None,
            enum_values: None,
            minimum: None,
            maximum: None,
        }
    }

    /// Create a number schema with inclusive bounds
    pub fn number_range(minimum: Option<f64>, maximum: Option<f64>) -> Self {
        JsonSchema::Number {
            const_value: None,
            enum_values: None,
            minimum,
            maximum,
        }
    }

    /// Create an unconstrained integer schema
    pub fn integer() -> Self {
        JsonSchema::Integer {
            const_value: None,
            enum_values: None,
            minimum: None,
            maximum: None,
        }
    }

    /// Create an integer schema with inclusive bounds
    pub fn integer_range(minimum: Option<i64>, maximum: Option<i64>) -> Self {
        JsonSchema::Integer {
            const_value: None,
            enum_values: None,
            minimum,
            maximum,
        }
    }

    /// Create a boolean schema
    pub fn boolean() -> Self {
        JsonSchema::Boolean
    }

    /// Create a homogeneous array schema
    pub fn array_of(items: JsonSchema) -> Self {
        JsonSchema::Array {
            items: ItemsSchema::Single(Box::new(items)),
            min_items: None,
            max_items: None,
        }
    }

    /// Create a fixed-length tuple schema
    pub fn tuple<I>(items: I) -> Self
    where
        I: IntoIterator<Item = JsonSchema>,
    {
        JsonSchema::Array {
            items: ItemsSchema::Tuple(items.into_iter().collect()),
            min_items: None,
            max_items: None,
        }
    }

    /// Create an object schema from property definitions and required names
    pub fn object<P, R, K, N>(properties: P, required: R) -> Self
    where
        P: IntoIterator<Item = (K, JsonSchema)>,
        K: Into<String>,
        R: IntoIterator<Item = N>,
        N: Into<String>,
    {
        JsonSchema::Object {
            properties: properties
                .into_iter()
                .map(|(name, schema)| (name.into(), schema))
                .collect(),
            required: required.into_iter().map(Into::into).collect(),
        }
    }

    /// Checks that the schema itself is well formed.
    ///
    /// Rejects empty tuple item lists, empty enum lists, inverted bounds
    /// and uncompilable patterns. Called by the storage service before any
    /// backend call, and by `TypedKey` construction.
    pub fn check_structure(&self) -> SchemaResult<()> {
        match self {
            JsonSchema::String {
                enum_values,
                min_length,
                max_length,
                pattern,
                ..
            } => {
                check_enum_non_empty(enum_values.as_deref())?;
                check_bounds(*min_length, *max_length, "minLength", "maxLength")?;
                if let Some(pattern) = pattern {
                    Regex::new(pattern).map_err(|e| SchemaDefinitionError::InvalidPattern {
                        pattern: pattern.clone(),
                        reason: e.to_string(),
                    })?;
                }
                Ok(())
            }
            JsonSchema::Number {
                enum_values,
                minimum,
                maximum,
                ..
            } => {
                check_enum_non_empty(enum_values.as_deref())?;
                check_bounds(*minimum, *maximum, "minimum", "maximum")
            }
            JsonSchema::Integer {
                enum_values,
                minimum,
                maximum,
                ..
            } => {
                check_enum_non_empty(enum_values.as_deref())?;
                check_bounds(*minimum, *maximum, "minimum", "maximum")
            }
            JsonSchema::Boolean => Ok(()),
            JsonSchema::Array {
                items,
                min_items,
                max_items,
            } => {
                check_bounds(*min_items, *max_items, "minItems", "maxItems")?;
                match items {
                    ItemsSchema::Single(item) => item.check_structure(),
                    ItemsSchema::Tuple(items) => {
                        if items.is_empty() {
                            return Err(SchemaDefinitionError::EmptyTupleItems);
                        }
                        for item in items {
                            item.check_structure()?;
                        }
                        Ok(())
                    }
                }
            }
            JsonSchema::Object { properties, .. } => {
                for schema in properties.values() {
                    schema.check_structure()?;
                }
                Ok(())
            }
        }
    }
}

fn check_enum_non_empty<T>(members: Option<&[T]>) -> SchemaResult<()> {
    match members {
        Some([]) => Err(SchemaDefinitionError::EmptyEnum),
        _ => Ok(()),
    }
}

fn check_bounds<T: PartialOrd>(
    lower_bound: Option<T>,
    upper_bound: Option<T>,
    lower: &'static str,
    upper: &'static str,
) -> SchemaResult<()> {
    if let (Some(lo), Some(hi)) = (&lower_bound, &upper_bound) {
        if lo > hi {
            return Err(SchemaDefinitionError::InvertedBounds { lower, upper });
        }
    }
    Ok(())
}
