// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Attribute validators for Kubernetes object metadata.
//!
//! These mirror the checks the Kubernetes API server applies to `metadata`, so a
//! manifest rendered by this provider is not rejected later at apply time for a
//! bad name, label, or annotation.

use crate::constants::{
    ANNOTATIONS_TOTAL_MAX_BYTES, DNS1123_LABEL_MAX_LEN, DNS1123_SUBDOMAIN_MAX_LEN,
    QUALIFIED_NAME_MAX_LEN,
};
use crate::value::Value;
use serde::Serialize;
use std::borrow::Cow;

/// Validator attached to a schema attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Validator {
    /// Object name: DNS-1123 subdomain.
    Name,
    /// Namespace: DNS-1123 label.
    Namespace,
    /// Label map: qualified-name keys, label-value values.
    Labels,
    /// Annotation map: qualified-name keys, bounded total size.
    Annotations,
}

impl Validator {
    /// Check a known value. Non-matching value shapes are left to type validation.
    ///
    /// # Errors
    ///
    /// Returns a human-readable reason when the value is invalid.
    pub fn validate(&self, value: &Value) -> Result<(), String> {
        match (self, value) {
            (Self::Name, Value::String(s)) => validate_dns1123_subdomain(s),
            (Self::Namespace, Value::String(s)) => validate_dns1123_label(s),
            (Self::Labels, Value::Object(entries)) => {
                for (key, value) in entries {
                    validate_qualified_name(key)?;
                    if let Some(v) = rendered_scalar(value) {
                        validate_label_value(&v)
                            .map_err(|e| format!("Invalid value for label \"{key}\": {e}"))?;
                    }
                }
                Ok(())
            }
            (Self::Annotations, Value::Object(entries)) => {
                let mut total = 0;
                for (key, value) in entries {
                    validate_qualified_name(key)?;
                    total += key.len() + rendered_scalar(value).map_or(0, |v| v.len());
                }
                if total > ANNOTATIONS_TOTAL_MAX_BYTES {
                    return Err(format!(
                        "Annotations must have at most {ANNOTATIONS_TOTAL_MAX_BYTES} bytes in total, got {total}"
                    ));
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

/// RFC 1123 subdomain: lowercase alphanumerics, `-` and `.`, alphanumeric at both ends.
///
/// # Errors
///
/// Returns the reason the name is invalid.
pub fn validate_dns1123_subdomain(name: &str) -> Result<(), String> {
    if name.is_empty() || name.len() > DNS1123_SUBDOMAIN_MAX_LEN {
        return Err(format!(
            "\"{name}\" must be between 1 and {DNS1123_SUBDOMAIN_MAX_LEN} characters"
        ));
    }
    for label in name.split('.') {
        if !is_dns1123_label(label) {
            return Err(format!(
                "\"{name}\" must consist of lower case alphanumeric characters, '-' or '.', \
                 and must start and end with an alphanumeric character"
            ));
        }
    }
    Ok(())
}

/// RFC 1123 label: lowercase alphanumerics and `-`, alphanumeric at both ends.
///
/// # Errors
///
/// Returns the reason the label is invalid.
pub fn validate_dns1123_label(name: &str) -> Result<(), String> {
    if name.is_empty() || name.len() > DNS1123_LABEL_MAX_LEN {
        return Err(format!(
            "\"{name}\" must be between 1 and {DNS1123_LABEL_MAX_LEN} characters"
        ));
    }
    if !is_dns1123_label(name) {
        return Err(format!(
            "\"{name}\" must consist of lower case alphanumeric characters or '-', \
             and must start and end with an alphanumeric character"
        ));
    }
    Ok(())
}

/// Label or annotation key: optional DNS subdomain prefix, `/`, and a name part.
///
/// # Errors
///
/// Returns the reason the key is invalid.
pub fn validate_qualified_name(key: &str) -> Result<(), String> {
    let (prefix, name) = match key.split_once('/') {
        Some((prefix, name)) => (Some(prefix), name),
        None => (None, key),
    };

    if let Some(prefix) = prefix {
        validate_dns1123_subdomain(prefix)
            .map_err(|e| format!("Invalid prefix of key \"{key}\": {e}"))?;
    }

    if name.is_empty() || name.len() > QUALIFIED_NAME_MAX_LEN {
        return Err(format!(
            "Name part of key \"{key}\" must be between 1 and {QUALIFIED_NAME_MAX_LEN} characters"
        ));
    }
    if !is_qualified_name_part(name) {
        return Err(format!(
            "Name part of key \"{key}\" must consist of alphanumeric characters, '-', '_' or '.', \
             and must start and end with an alphanumeric character"
        ));
    }
    Ok(())
}

/// Label value: empty, or a qualified-name part of at most 63 characters.
///
/// # Errors
///
/// Returns the reason the value is invalid.
pub fn validate_label_value(value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Ok(());
    }
    if value.len() > QUALIFIED_NAME_MAX_LEN {
        return Err(format!("must be no more than {QUALIFIED_NAME_MAX_LEN} characters"));
    }
    if !is_qualified_name_part(value) {
        return Err(
            "must consist of alphanumeric characters, '-', '_' or '.', \
             and must start and end with an alphanumeric character"
                .to_string(),
        );
    }
    Ok(())
}

/// A scalar as it appears in the manifest once coerced to a string.
fn rendered_scalar(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s)),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        _ => None,
    }
}

fn is_dns1123_label(label: &str) -> bool {
    let bytes = label.as_bytes();
    !bytes.is_empty()
        && bytes.len() <= DNS1123_LABEL_MAX_LEN
        && bytes
            .iter()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'-')
        && bytes[0].is_ascii_alphanumeric()
        && bytes[bytes.len() - 1].is_ascii_alphanumeric()
}

fn is_qualified_name_part(name: &str) -> bool {
    let bytes = name.as_bytes();
    !bytes.is_empty()
        && bytes
            .iter()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'))
        && bytes[0].is_ascii_alphanumeric()
        && bytes[bytes.len() - 1].is_ascii_alphanumeric()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_valid_names() {
        assert!(validate_dns1123_subdomain("apm1").is_ok());
        assert!(validate_dns1123_subdomain("apm-server.quickstart").is_ok());
        assert!(validate_dns1123_label("default").is_ok());
    }

    #[test]
    fn test_invalid_names() {
        assert!(validate_dns1123_subdomain("").is_err());
        assert!(validate_dns1123_subdomain("Apm").is_err());
        assert!(validate_dns1123_subdomain("-apm").is_err());
        assert!(validate_dns1123_subdomain("apm..server").is_err());
        assert!(validate_dns1123_label("my.namespace").is_err());
        assert!(validate_dns1123_label(&"a".repeat(64)).is_err());
    }

    #[test]
    fn test_qualified_names() {
        assert!(validate_qualified_name("app").is_ok());
        assert!(validate_qualified_name("app.kubernetes.io/name").is_ok());
        assert!(validate_qualified_name("Team_Name").is_ok());
        assert!(validate_qualified_name("/name").is_err());
        assert!(validate_qualified_name("example.com/").is_err());
        assert!(validate_qualified_name("bad key").is_err());
    }

    #[test]
    fn test_label_values() {
        assert!(validate_label_value("").is_ok());
        assert!(validate_label_value("v8.10.0").is_ok());
        assert!(validate_label_value("-leading").is_err());
        assert!(validate_label_value(&"x".repeat(64)).is_err());
    }

    #[test]
    fn test_labels_validator() {
        let mut labels = BTreeMap::new();
        labels.insert("app".to_string(), Value::string("apm"));
        assert!(Validator::Labels.validate(&Value::Object(labels.clone())).is_ok());

        labels.insert("tier".to_string(), Value::string("not valid!"));
        let err = Validator::Labels.validate(&Value::Object(labels)).unwrap_err();
        assert!(err.contains("tier"));
    }

    #[test]
    fn test_annotations_validator_size_limit() {
        let mut annotations = BTreeMap::new();
        annotations.insert(
            "example.com/blob".to_string(),
            Value::string("x".repeat(ANNOTATIONS_TOTAL_MAX_BYTES)),
        );
        assert!(Validator::Annotations
            .validate(&Value::Object(annotations))
            .is_err());
    }

    #[test]
    fn test_annotations_size_counts_non_string_values() {
        let annotations: BTreeMap<String, Value> = (0..20_000_i64)
            .map(|i| (format!("key{i:05}"), Value::from(1_000_000_000 + i)))
            .collect();
        let err = Validator::Annotations
            .validate(&Value::Object(annotations))
            .unwrap_err();
        assert!(err.contains("Annotations must have at most"));
    }

    #[test]
    fn test_labels_validator_checks_rendered_scalars() {
        let mut labels = BTreeMap::new();
        labels.insert("replicas".to_string(), Value::from(3_i64));
        labels.insert("enabled".to_string(), Value::from(true));
        assert!(Validator::Labels.validate(&Value::Object(labels.clone())).is_ok());

        labels.insert(
            "ratio".to_string(),
            Value::from_json(serde_json::json!(-1.5)),
        );
        let err = Validator::Labels.validate(&Value::Object(labels)).unwrap_err();
        assert!(err.contains("ratio"));
    }

    #[test]
    fn test_validator_ignores_other_shapes() {
        assert!(Validator::Name.validate(&Value::Bool(true)).is_ok());
        assert!(Validator::Labels.validate(&Value::string("x")).is_ok());
    }
}
