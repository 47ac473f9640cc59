//! Schema validator
//!
//! Validation semantics:
//! - Type tags must match exactly, no implicit coercion
//! - `const` and `enum` compare by value
//! - Tuples match their declared arity exactly
//! - Required object properties must be present; undeclared value
//!   properties are ignored
//! - Constraints (range, length, pattern, item count) are enforced at
//!   runtime, not treated as documentation
//!
//! The validator is pure: no I/O, no mutation, deterministic, and total
//! because schemas are finite and acyclic.

use regex::Regex;
use serde_json::Value;

use super::errors::{ValidationResult, Violation, ViolationReason};
use super::types::{ItemsSchema, JsonSchema};

/// Validates a runtime value against a schema.
///
/// Returns [`ValidationResult::Invalid`] carrying the path of the first
/// failing location (rooted at `$`) and the violated constraint. Assumes
/// the schema passed [`JsonSchema::check_structure`]; a structural problem
/// discovered mid-walk is reported as [`ViolationReason::InvalidSchema`]
/// rather than a panic.
pub fn validate(schema: &JsonSchema, value: &Value) -> ValidationResult {
    match validate_at(schema, value, "$") {
        Ok(()) => ValidationResult::Valid,
        Err(violation) => ValidationResult::Invalid(violation),
    }
}

fn validate_at(schema: &JsonSchema, value: &Value, path: &str) -> Result<(), Violation> {
    match schema {
        JsonSchema::String {
            const_value,
            enum_values,
            min_length,
            max_length,
            pattern,
        } => {
            let text = value
                .as_str()
                .ok_or_else(|| type_violation(path, "string", value))?;

            if let Some(expected) = const_value {
                if text != expected.as_str() {
                    return Err(Violation::new(path, ViolationReason::ConstMismatch));
                }
            }
            if let Some(members) = enum_values {
                if !members.iter().any(|m| m.as_str() == text) {
                    return Err(Violation::new(path, ViolationReason::NotInEnum));
                }
            }

            let length = text.chars().count();
            if min_length.is_some_and(|min| length < min)
                || max_length.is_some_and(|max| length > max)
            {
                return Err(Violation::new(
                    path,
                    ViolationReason::StringLengthOutOfBounds { actual: length },
                ));
            }

            if let Some(pattern) = pattern {
                let regex = Regex::new(pattern).map_err(|e| {
                    Violation::new(path, ViolationReason::InvalidSchema(e.to_string()))
                })?;
                if !regex.is_match(text) {
                    return Err(Violation::new(
                        path,
                        ViolationReason::PatternMismatch(pattern.clone()),
                    ));
                }
            }
            Ok(())
        }
        JsonSchema::Number {
            const_value,
            enum_values,
            minimum,
            maximum,
        } => {
            let number = value
                .as_f64()
                .ok_or_else(|| type_violation(path, "number", value))?;

            if let Some(expected) = const_value {
                if number != *expected {
                    return Err(Violation::new(path, ViolationReason::ConstMismatch));
                }
            }
            if let Some(members) = enum_values {
                if !members.contains(&number) {
                    return Err(Violation::new(path, ViolationReason::NotInEnum));
                }
            }
            if minimum.is_some_and(|min| number < min) || maximum.is_some_and(|max| number > max) {
                return Err(Violation::new(path, ViolationReason::OutOfRange));
            }
            Ok(())
        }
        JsonSchema::Integer {
            const_value,
            enum_values,
            minimum,
            maximum,
        } => {
            if !value.is_number() {
                return Err(type_violation(path, "integer", value));
            }
            let number = integral_value(value)
                .ok_or_else(|| Violation::new(path, ViolationReason::NotInteger))?;

            if let Some(expected) = const_value {
                if number != *expected {
                    return Err(Violation::new(path, ViolationReason::ConstMismatch));
                }
            }
            if let Some(members) = enum_values {
                if !members.contains(&number) {
                    return Err(Violation::new(path, ViolationReason::NotInEnum));
                }
            }
            if minimum.is_some_and(|min| number < min) || maximum.is_some_and(|max| number > max) {
                return Err(Violation::new(path, ViolationReason::OutOfRange));
            }
            Ok(())
        }
        JsonSchema::Boolean => {
            if value.is_boolean() {
                Ok(())
            } else {
                Err(type_violation(path, "boolean", value))
            }
        }
        JsonSchema::Array {
            items,
            min_items,
            max_items,
        } => {
            let elements = value
                .as_array()
                .ok_or_else(|| type_violation(path, "array", value))?;

            match items {
                ItemsSchema::Single(item_schema) => {
                    if min_items.is_some_and(|min| elements.len() < min)
                        || max_items.is_some_and(|max| elements.len() > max)
                    {
                        return Err(Violation::new(
                            path,
                            ViolationReason::ArrayLengthOutOfBounds {
                                actual: elements.len(),
                            },
                        ));
                    }
                    for (i, element) in elements.iter().enumerate() {
                        validate_at(item_schema, element, &element_path(path, i))?;
                    }
                    Ok(())
                }
                ItemsSchema::Tuple(item_schemas) => {
                    if item_schemas.is_empty() {
                        return Err(Violation::new(
                            path,
                            ViolationReason::InvalidSchema(
                                "tuple schema must declare at least one item".into(),
                            ),
                        ));
                    }
                    // Exact arity, no partial tuples
                    if elements.len() != item_schemas.len() {
                        return Err(Violation::new(
                            path,
                            ViolationReason::TupleLengthMismatch {
                                expected: item_schemas.len(),
                                actual: elements.len(),
                            },
                        ));
                    }
                    for (i, (item_schema, element)) in
                        item_schemas.iter().zip(elements).enumerate()
                    {
                        validate_at(item_schema, element, &element_path(path, i))?;
                    }
                    Ok(())
                }
            }
        }
        JsonSchema::Object {
            properties,
            required,
        } => {
            let object = value
                .as_object()
                .ok_or_else(|| type_violation(path, "object", value))?;

            for name in required {
                if !object.contains_key(name) {
                    return Err(Violation::new(
                        path,
                        ViolationReason::MissingRequiredProperty(name.clone()),
                    ));
                }
            }

            for (name, property_schema) in properties {
                if let Some(property_value) = object.get(name) {
                    validate_at(property_schema, property_value, &property_path(path, name))?;
                }
            }
            Ok(())
        }
    }
}

/// Returns the value as i64 when it is integral.
///
/// JSON text like `1.0` parses as an f64-backed number; a zero fractional
/// part still counts as integral, matching how the data may have been
/// written by another producer.
fn integral_value(value: &Value) -> Option<i64> {
    if let Some(number) = value.as_i64() {
        return Some(number);
    }
    let float = value.as_f64()?;
    if float.fract() == 0.0 && float >= i64::MIN as f64 && float < i64::MAX as f64 {
        Some(float as i64)
    } else {
        None
    }
}

/// Returns the JSON type name for error messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn type_violation(path: &str, expected: &'static str, value: &Value) -> Violation {
    Violation::new(
        path,
        ViolationReason::TypeMismatch {
            expected,
            actual: json_type_name(value),
        },
    )
}

fn property_path(prefix: &str, name: &str) -> String {
    format!("{}.{}", prefix, name)
}

fn element_path(prefix: &str, index: usize) -> String {
    format!("{}[{}]", prefix, index)
}
