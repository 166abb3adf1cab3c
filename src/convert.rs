// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Schema-guided conversion from Terraform values to Kubernetes JSON.
//!
//! Object attributes are renamed from their Terraform name to their Kubernetes
//! field name. Null and unknown attributes are dropped, which gives the rendered
//! manifest `omitempty` semantics. Map keys and dynamic content are kept verbatim.
//! Scalars are coerced the way Terraform coerces primitive types (`"3"` into a
//! number attribute is `3`, `true` into a string attribute is `"true"`).

use crate::diagnostics::AttributePath;
use crate::errors::{MaterializeError, Result};
use crate::schema::{find_attribute, Attribute, AttributeType};
use crate::value::Value;
use serde_json::{Map, Number};

/// Convert an object value against its attributes.
///
/// Returns `None` when the value is null or unknown. Attributes not declared in
/// `attrs` are rejected.
///
/// # Errors
///
/// Returns [`MaterializeError::Convert`] when a value does not fit its attribute.
pub fn object_to_json(
    attrs: &[Attribute],
    value: &Value,
    path: &AttributePath,
) -> Result<Option<serde_json::Value>> {
    if !value.is_known() {
        return Ok(None);
    }
    let Value::Object(entries) = value else {
        return Err(mismatch(path, "an object", value));
    };

    let mut out = Map::new();
    for (name, item) in entries {
        let attr_path = path.child(name);
        let Some(attr) = find_attribute(attrs, name) else {
            return Err(MaterializeError::Convert {
                path: attr_path,
                reason: "unsupported attribute".to_string(),
            });
        };
        if let Some(json) = value_to_json(&attr.attr_type, item, &attr_path)? {
            out.insert(attr.field_name.clone(), json);
        }
    }
    Ok(Some(serde_json::Value::Object(out)))
}

/// Convert a single value against its type.
///
/// # Errors
///
/// Returns [`MaterializeError::Convert`] when the value does not fit the type.
pub fn value_to_json(
    attr_type: &AttributeType,
    value: &Value,
    path: &AttributePath,
) -> Result<Option<serde_json::Value>> {
    if !value.is_known() {
        return Ok(None);
    }

    let json = match attr_type {
        AttributeType::Dynamic => value.to_json(),
        AttributeType::String => serde_json::Value::String(scalar_to_string(value, path)?),
        AttributeType::IntOrString => {
            let s = scalar_to_string(value, path)?;
            // Only canonical integers; "+80" and "080" stay strings.
            match s.parse::<i64>() {
                Ok(n) if n.to_string() == s => serde_json::Value::Number(n.into()),
                _ => serde_json::Value::String(s),
            }
        }
        AttributeType::Int64 => serde_json::Value::Number(to_int(value, path)?.into()),
        AttributeType::Float64 => serde_json::Value::Number(to_number(value, path)?),
        AttributeType::Bool => serde_json::Value::Bool(to_bool(value, path)?),
        AttributeType::List(elem) => {
            let Value::List(items) = value else {
                return Err(mismatch(path, "a list", value));
            };
            let mut out = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                let item_path = path.index(i);
                match value_to_json(elem, item, &item_path)? {
                    Some(json) => out.push(json),
                    None => {
                        return Err(MaterializeError::Convert {
                            path: item_path,
                            reason: "list elements must not be null".to_string(),
                        })
                    }
                }
            }
            serde_json::Value::Array(out)
        }
        AttributeType::Map(elem) => {
            let Value::Object(entries) = value else {
                return Err(mismatch(path, "a map", value));
            };
            let mut out = Map::new();
            for (key, item) in entries {
                if let Some(json) = value_to_json(elem, item, &path.key(key))? {
                    out.insert(key.clone(), json);
                }
            }
            serde_json::Value::Object(out)
        }
        AttributeType::Object(attrs) => return object_to_json(attrs, value, path),
    };

    Ok(Some(json))
}

fn scalar_to_string(value: &Value, path: &AttributePath) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(mismatch(path, "a string", other)),
    }
}

fn to_int(value: &Value, path: &AttributePath) -> Result<i64> {
    match value {
        Value::Number(n) => n.as_i64().ok_or_else(|| mismatch(path, "a whole number", value)),
        Value::String(s) => s.parse().map_err(|_| mismatch(path, "a whole number", value)),
        other => Err(mismatch(path, "a whole number", other)),
    }
}

fn to_number(value: &Value, path: &AttributePath) -> Result<Number> {
    match value {
        Value::Number(n) => Ok(n.clone()),
        Value::String(s) => s
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .ok_or_else(|| mismatch(path, "a number", value)),
        other => Err(mismatch(path, "a number", other)),
    }
}

fn to_bool(value: &Value, path: &AttributePath) -> Result<bool> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) => s.parse().map_err(|_| mismatch(path, "a bool", value)),
        other => Err(mismatch(path, "a bool", other)),
    }
}

fn mismatch(path: &AttributePath, expected: &str, got: &Value) -> MaterializeError {
    MaterializeError::Convert {
        path: path.clone(),
        reason: format!("expected {expected}, got {}", got.type_name()),
    }
}

#[cfg(test)]
#[path = "convert_tests.rs"]
mod convert_tests;
