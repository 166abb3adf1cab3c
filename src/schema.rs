// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Terraform resource schemas.
//!
//! A [`Schema`] is the attribute tree Terraform validates a resource block against.
//! Each [`Attribute`] records both its Terraform name (snake_case) and the
//! Kubernetes field name it maps to, which is what [`crate::convert`] uses to
//! rebuild the camelCase manifest.
//!
//! Hand-declaring the tree for a CRD the size of `ApmServer` is thousands of
//! lines; instead [`attributes_from_openapi`] derives it from the OpenAPI v3
//! schema that `kube::CustomResourceExt::crd()` generates for the Rust types.
//!
//! # Type mapping
//!
//! | OpenAPI | Terraform |
//! | ------- | --------- |
//! | `string` | String |
//! | `x-kubernetes-int-or-string` | String (emitted as an integer when it is a canonical one) |
//! | `integer` | Int64 |
//! | `number` | Float64 |
//! | `boolean` | Bool |
//! | `array` | List of the item type |
//! | `object` with `properties` | Single nested object |
//! | `object` with `additionalProperties` | Map of the value type |
//! | `x-kubernetes-preserve-unknown-fields`, untyped | Dynamic |

use crate::constants::DIAG_INVALID_CONFIG_SUMMARY;
use crate::diagnostics::{AttributePath, Diagnostics};
use crate::naming::to_snake_case;
use crate::validators::Validator;
use crate::value::Value;
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::{
    JSONSchemaProps, JSONSchemaPropsOrArray, JSONSchemaPropsOrBool,
};
use serde::Serialize;
use std::fmt;
use tracing::trace;

/// Type of an attribute or of a collection element.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", content = "element", rename_all = "snake_case")]
pub enum AttributeType {
    String,
    /// A string that is emitted as an integer when it is written as a canonical integer.
    IntOrString,
    Int64,
    Float64,
    Bool,
    /// Any value; passed through verbatim.
    Dynamic,
    List(Box<AttributeType>),
    Map(Box<AttributeType>),
    Object(Vec<Attribute>),
}

impl AttributeType {
    /// Nested attributes when this is an object.
    #[must_use]
    pub fn attributes(&self) -> Option<&[Attribute]> {
        match self {
            Self::Object(attrs) => Some(attrs),
            _ => None,
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String | Self::IntOrString => f.write_str("String"),
            Self::Int64 => f.write_str("Number"),
            Self::Float64 => f.write_str("Number"),
            Self::Bool => f.write_str("Boolean"),
            Self::Dynamic => f.write_str("Dynamic"),
            Self::List(elem) => write!(f, "List of {elem}"),
            Self::Map(elem) => write!(f, "Map of {elem}"),
            Self::Object(_) => f.write_str("Attributes"),
        }
    }
}

/// A single attribute in a resource schema.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Attribute {
    /// Terraform attribute name.
    pub name: String,
    /// Kubernetes field name the attribute is written to.
    pub field_name: String,
    #[serde(flatten)]
    pub attr_type: AttributeType,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub computed: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub validators: Vec<Validator>,
}

impl Attribute {
    /// Optional attribute whose Kubernetes field name is derived from the Terraform name.
    #[must_use]
    pub fn new(name: &str, attr_type: AttributeType) -> Self {
        Self {
            name: name.to_string(),
            field_name: name.to_string(),
            attr_type,
            required: false,
            optional: true,
            computed: false,
            description: String::new(),
            validators: Vec::new(),
        }
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self.optional = false;
        self
    }

    /// Computed-only: set by the provider, never by configuration.
    #[must_use]
    pub fn computed(mut self) -> Self {
        self.computed = true;
        self.optional = false;
        self.required = false;
        self
    }

    #[must_use]
    pub fn field_name(mut self, field_name: &str) -> Self {
        self.field_name = field_name.to_string();
        self
    }

    #[must_use]
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    #[must_use]
    pub fn validator(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    /// `true` when configuration may not set this attribute.
    #[must_use]
    pub fn is_computed_only(&self) -> bool {
        self.computed && !self.required && !self.optional
    }
}

/// Look up an attribute by Terraform name.
#[must_use]
pub fn find_attribute<'a>(attrs: &'a [Attribute], name: &str) -> Option<&'a Attribute> {
    attrs.iter().find(|a| a.name == name)
}

/// Schema of one resource or data source.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Schema {
    pub version: i64,
    pub description: String,
    pub attributes: Vec<Attribute>,
}

impl Schema {
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        find_attribute(&self.attributes, name)
    }

    /// Validate a configuration the way Terraform would before calling the provider.
    ///
    /// Reports missing required attributes, values for computed-only attributes,
    /// unsupported attributes, type mismatches and validator failures. Unknown
    /// values pass every check.
    #[must_use]
    pub fn validate(&self, config: &Value) -> Diagnostics {
        let mut diags = Diagnostics::new();
        match config {
            Value::Object(_) => {
                validate_object(&self.attributes, config, &AttributePath::root(), &mut diags);
            }
            Value::Unknown => {}
            other => diags.add_error(
                DIAG_INVALID_CONFIG_SUMMARY,
                format!("Expected an object of attributes, got {}", other.type_name()),
            ),
        }
        diags
    }
}

fn validate_object(attrs: &[Attribute], value: &Value, path: &AttributePath, diags: &mut Diagnostics) {
    let Some(map) = value.as_object() else {
        return;
    };

    for key in map.keys() {
        if find_attribute(attrs, key).is_none() {
            diags.add_attribute_error(
                path.child(key),
                "Unsupported argument",
                format!("An argument named \"{key}\" is not expected here."),
            );
        }
    }

    for attr in attrs {
        let attr_path = path.child(&attr.name);
        let attr_value = map.get(&attr.name).unwrap_or(&Value::Null);

        if attr.is_computed_only() {
            if attr_value.is_known() {
                diags.add_attribute_error(
                    attr_path,
                    "Invalid Configuration for Read-Only Attribute",
                    format!("Cannot set value for attribute \"{}\", it is computed by the provider.", attr.name),
                );
            }
            continue;
        }

        if attr_value.is_null() {
            if attr.required {
                diags.add_attribute_error(
                    attr_path,
                    "Missing required argument",
                    format!("The argument \"{}\" is required, but no definition was found.", attr.name),
                );
            }
            continue;
        }

        validate_value(&attr.attr_type, attr_value, &attr_path, diags);

        if attr_value.is_known() {
            for validator in &attr.validators {
                if let Err(reason) = validator.validate(attr_value) {
                    diags.add_attribute_error(attr_path.clone(), DIAG_INVALID_CONFIG_SUMMARY, reason);
                }
            }
        }
    }
}

fn validate_value(attr_type: &AttributeType, value: &Value, path: &AttributePath, diags: &mut Diagnostics) {
    if !value.is_known() {
        return;
    }

    let mismatch = |diags: &mut Diagnostics, expected: &str| {
        diags.add_attribute_error(
            path.clone(),
            "Incorrect attribute value type",
            format!("Expected {expected}, got {}", value.type_name()),
        );
    };

    match (attr_type, value) {
        (AttributeType::Dynamic, _) => {}
        (AttributeType::String | AttributeType::IntOrString, Value::String(_) | Value::Number(_) | Value::Bool(_)) => {}
        (AttributeType::String | AttributeType::IntOrString, _) => mismatch(diags, "a string"),
        (AttributeType::Int64, Value::Number(n)) if n.as_i64().is_some() => {}
        (AttributeType::Int64, Value::String(s)) if s.parse::<i64>().is_ok() => {}
        (AttributeType::Int64, _) => mismatch(diags, "a whole number"),
        (AttributeType::Float64, Value::Number(_)) => {}
        (AttributeType::Float64, Value::String(s)) if s.parse::<f64>().is_ok() => {}
        (AttributeType::Float64, _) => mismatch(diags, "a number"),
        (AttributeType::Bool, Value::Bool(_)) => {}
        (AttributeType::Bool, Value::String(s)) if s == "true" || s == "false" => {}
        (AttributeType::Bool, _) => mismatch(diags, "a bool"),
        (AttributeType::List(elem), Value::List(items)) => {
            for (i, item) in items.iter().enumerate() {
                if item.is_null() {
                    diags.add_attribute_error(
                        path.index(i),
                        "Invalid list element",
                        "List elements must not be null",
                    );
                } else {
                    validate_value(elem, item, &path.index(i), diags);
                }
            }
        }
        (AttributeType::List(_), _) => mismatch(diags, "a list"),
        (AttributeType::Map(elem), Value::Object(entries)) => {
            for (key, item) in entries {
                validate_value(elem, item, &path.key(key), diags);
            }
        }
        (AttributeType::Map(_), _) => mismatch(diags, "a map"),
        (AttributeType::Object(attrs), Value::Object(_)) => validate_object(attrs, value, path, diags),
        (AttributeType::Object(_), _) => mismatch(diags, "an object"),
    }
}

// ============================================================================
// Derivation from OpenAPI v3
// ============================================================================

/// Derive Terraform attributes for the properties of an OpenAPI object schema.
///
/// Attributes keep the property order of the schema (alphabetical for generated
/// CRDs). Required-ness follows the schema's `required` list; everything else is
/// optional.
#[must_use]
pub fn attributes_from_openapi(schema: &JSONSchemaProps) -> Vec<Attribute> {
    let Some(properties) = &schema.properties else {
        return Vec::new();
    };
    let required = schema.required.as_deref().unwrap_or_default();

    properties
        .iter()
        .map(|(field_name, prop)| {
            let mut attr = Attribute::new(&to_snake_case(field_name), attribute_type(prop))
                .field_name(field_name);
            if required.iter().any(|r| r == field_name) {
                attr = attr.required();
            }
            if let Some(description) = &prop.description {
                attr = attr.description(description);
            }
            trace!(field = %field_name, attribute = %attr.name, "Derived attribute");
            attr
        })
        .collect()
}

/// Map one OpenAPI schema node to a Terraform type.
#[must_use]
pub fn attribute_type(schema: &JSONSchemaProps) -> AttributeType {
    if schema.x_kubernetes_int_or_string == Some(true) {
        return AttributeType::IntOrString;
    }
    if schema.x_kubernetes_preserve_unknown_fields == Some(true) && schema.properties.is_none() {
        return AttributeType::Dynamic;
    }

    match schema.type_.as_deref() {
        Some("string") => AttributeType::String,
        Some("integer") => AttributeType::Int64,
        Some("number") => AttributeType::Float64,
        Some("boolean") => AttributeType::Bool,
        Some("array") => {
            let item = match &schema.items {
                Some(JSONSchemaPropsOrArray::Schema(item)) => attribute_type(item),
                Some(JSONSchemaPropsOrArray::Schemas(items)) => {
                    items.first().map_or(AttributeType::Dynamic, attribute_type)
                }
                None => AttributeType::Dynamic,
            };
            AttributeType::List(Box::new(item))
        }
        Some("object") | None if schema.properties.is_some() => {
            AttributeType::Object(attributes_from_openapi(schema))
        }
        Some("object") => match &schema.additional_properties {
            Some(JSONSchemaPropsOrBool::Schema(value)) => {
                AttributeType::Map(Box::new(attribute_type(value)))
            }
            _ => AttributeType::Dynamic,
        },
        _ => AttributeType::Dynamic,
    }
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod schema_tests;
