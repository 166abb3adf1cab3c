// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Free-form YAML blobs.
//!
//! Some CRD fields (the APM Server `config` block) accept arbitrary nested
//! content. [`Dynamic`] carries that content through the typed model untouched
//! and advertises `x-kubernetes-preserve-unknown-fields` in the generated schema,
//! which the Terraform schema derivation maps to a dynamic attribute.

use schemars::{json_schema, JsonSchema, Schema, SchemaGenerator};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Arbitrary structured content, serialized as-is.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dynamic(pub serde_json::Value);

impl Dynamic {
    /// Wrap an already-built JSON value.
    #[must_use]
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Borrow the wrapped value.
    #[must_use]
    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    /// Unwrap into the inner JSON value.
    #[must_use]
    pub fn into_inner(self) -> serde_json::Value {
        self.0
    }

    /// `true` when the content is JSON `null`.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }
}

impl From<serde_json::Value> for Dynamic {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

impl JsonSchema for Dynamic {
    fn schema_name() -> Cow<'static, str> {
        "Dynamic".into()
    }

    fn json_schema(_: &mut SchemaGenerator) -> Schema {
        json_schema!({
            "type": "object",
            "x-kubernetes-preserve-unknown-fields": true
        })
    }
}
