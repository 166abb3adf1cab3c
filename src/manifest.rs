// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Manifest materialization.
//!
//! Two models meet here:
//!
//! - [`ResourceModel`] is the Terraform-facing model: the top-level attributes of a
//!   resource block as opaque [`Value`]s.
//! - [`Manifest`] is the YAML-facing model: a typed Kubernetes object with the
//!   fixed `apiVersion` and `kind` of its [`ManifestKind`].
//!
//! [`Materializer`] converts the first into the second through the resource schema,
//! marshals it to YAML, and produces the state Terraform stores.

use crate::constants::{
    ATTR_API_VERSION, ATTR_ID, ATTR_KIND, ATTR_METADATA, ATTR_SPEC, ATTR_YAML,
};
use crate::convert::object_to_json;
use crate::diagnostics::AttributePath;
use crate::errors::{MaterializeError, Result};
use crate::ids::IdGenerator;
use crate::schema::Schema;
use crate::value::Value;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::Arc;
use tracing::debug;

/// A Kubernetes kind that can be rendered into a manifest.
pub trait ManifestKind {
    /// YAML-facing spec type.
    type Spec: Serialize + DeserializeOwned;

    /// `group/version` stamped into every manifest.
    fn api_version() -> Cow<'static, str>;

    /// Kind stamped into every manifest.
    fn kind() -> Cow<'static, str>;
}

/// YAML-facing manifest.
///
/// Field order is the rendered key order: `apiVersion`, `kind`, `metadata`, `spec`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest<S> {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<S>,
}

impl<S: Serialize> Manifest<S> {
    /// Build a manifest for `K`, overwriting `apiVersion` and `kind` with its fixed values.
    #[must_use]
    pub fn new<K>(metadata: ObjectMeta, spec: Option<S>) -> Self
    where
        K: ManifestKind<Spec = S>,
    {
        Self {
            api_version: K::api_version().into_owned(),
            kind: K::kind().into_owned(),
            metadata,
            spec,
        }
    }

    /// Marshal to YAML.
    ///
    /// # Errors
    ///
    /// Returns [`MaterializeError::Yaml`] when serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Terraform-facing resource model.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResourceModel {
    pub id: Value,
    pub api_version: Value,
    pub kind: Value,
    pub yaml: Value,
    pub metadata: Value,
    pub spec: Value,
}

impl ResourceModel {
    /// Read the top-level attributes of a configuration or state object.
    ///
    /// # Errors
    ///
    /// Returns [`MaterializeError::InvalidModel`] when `value` is not an object.
    pub fn from_value(value: &Value) -> Result<Self> {
        if value.as_object().is_none() {
            return Err(MaterializeError::InvalidModel(format!(
                "expected an object of attributes, got {}",
                value.type_name()
            )));
        }
        Ok(Self {
            id: value.attr(ATTR_ID),
            api_version: value.attr(ATTR_API_VERSION),
            kind: value.attr(ATTR_KIND),
            yaml: value.attr(ATTR_YAML),
            metadata: value.attr(ATTR_METADATA),
            spec: value.attr(ATTR_SPEC),
        })
    }

    /// Back into an object value, one entry per attribute.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::object([
            (ATTR_ID, self.id),
            (ATTR_API_VERSION, self.api_version),
            (ATTR_KIND, self.kind),
            (ATTR_YAML, self.yaml),
            (ATTR_METADATA, self.metadata),
            (ATTR_SPEC, self.spec),
        ])
    }
}

/// Turns resource configurations of kind `K` into manifests and state.
pub struct Materializer<K> {
    schema: Arc<Schema>,
    ids: IdGenerator,
    _kind: std::marker::PhantomData<fn() -> K>,
}

impl<K: ManifestKind> Materializer<K> {
    #[must_use]
    pub fn new(schema: Arc<Schema>) -> Self {
        Self {
            schema,
            ids: IdGenerator::new(),
            _kind: std::marker::PhantomData,
        }
    }

    #[must_use]
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Build the typed manifest for a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when `metadata` or `spec` do not fit the schema or the typed model.
    pub fn manifest(&self, model: &ResourceModel) -> Result<Manifest<K::Spec>> {
        let metadata = match self.convert(ATTR_METADATA, &model.metadata)? {
            Some(json) => serde_json::from_value::<ObjectMeta>(json)?,
            None => ObjectMeta::default(),
        };
        let spec = self
            .convert(ATTR_SPEC, &model.spec)?
            .map(serde_json::from_value::<K::Spec>)
            .transpose()?;

        Ok(Manifest::new::<K>(metadata, spec))
    }

    /// Render the YAML for a configuration.
    ///
    /// # Errors
    ///
    /// See [`manifest`](Self::manifest) and [`Manifest::to_yaml`].
    pub fn render(&self, model: &ResourceModel) -> Result<String> {
        self.manifest(model)?.to_yaml()
    }

    /// Materialize a configuration into the state Terraform stores.
    ///
    /// `metadata` and `spec` are kept as configured; `id`, `api_version`, `kind`
    /// and `yaml` are overwritten. Create and Update both land here.
    ///
    /// # Errors
    ///
    /// See [`render`](Self::render).
    pub fn materialize(&self, config: &Value) -> Result<ResourceModel> {
        let mut model = ResourceModel::from_value(config)?;
        let yaml = self.render(&model)?;

        model.id = Value::String(self.ids.next_id_string());
        model.api_version = Value::String(K::api_version().into_owned());
        model.kind = Value::String(K::kind().into_owned());
        model.yaml = Value::String(yaml);

        debug!(
            id = %model.id,
            kind = %K::kind(),
            "Materialized manifest"
        );
        Ok(model)
    }

    fn convert(&self, attribute: &str, value: &Value) -> Result<Option<serde_json::Value>> {
        let attrs = self
            .schema
            .attribute(attribute)
            .and_then(|a| a.attr_type.attributes())
            .ok_or_else(|| {
                MaterializeError::InvalidModel(format!(
                    "schema has no nested attribute \"{attribute}\""
                ))
            })?;
        object_to_json(attrs, value, &AttributePath::attr(attribute))
    }
}

#[cfg(test)]
#[path = "manifest_tests.rs"]
mod manifest_tests;
