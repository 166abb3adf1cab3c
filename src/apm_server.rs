// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! The `apm_k8s_elastic_co_apm_server_v1` resource and its manifest data source.
//!
//! Neither talks to a cluster. Create and Update render the configured
//! `ApmServer` into YAML and store it in state next to a fresh timestamp id;
//! Read and Delete leave state to Terraform.

use crate::constants::{
    API_GROUP_VERSION, APM_SERVER_TYPE_SUFFIX, ATTR_API_VERSION, ATTR_ID, ATTR_KIND,
    ATTR_METADATA, ATTR_SPEC, ATTR_YAML, DIAG_YAML_SUMMARY, KIND_APM_SERVER,
    MANIFEST_DATA_SOURCE_SUFFIX,
};
use crate::crd::{ApmServer, ApmServerSpec};
use crate::data_source::{DataSource, DataSourceReadRequest, DataSourceReadResponse};
use crate::diagnostics::Diagnostics;
use crate::manifest::{Manifest, ManifestKind, Materializer};
use crate::metrics::{
    record_error, record_manifest_size, record_operation_error, record_operation_success,
    OPERATION_CREATE, OPERATION_DELETE, OPERATION_READ, OPERATION_RENDER, OPERATION_UPDATE,
};
use crate::resource::{
    CreateRequest, CreateResponse, DeleteRequest, DeleteResponse, ReadRequest, ReadResponse,
    Resource, UpdateRequest, UpdateResponse,
};
use crate::schema::{attributes_from_openapi, Attribute, AttributeType, Schema};
use crate::validators::Validator;
use crate::value::Value;
use async_trait::async_trait;
use kube::CustomResourceExt;
use std::borrow::Cow;
use std::sync::{Arc, LazyLock};
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

impl ManifestKind for ApmServer {
    type Spec = ApmServerSpec;

    fn api_version() -> Cow<'static, str> {
        Cow::Borrowed(API_GROUP_VERSION)
    }

    fn kind() -> Cow<'static, str> {
        Cow::Borrowed(KIND_APM_SERVER)
    }
}

/// A rendered `ApmServer` manifest.
pub type ApmServerManifest = Manifest<ApmServerSpec>;

/// Resource schema, derived once from the CRD.
pub static APM_SERVER_SCHEMA: LazyLock<Arc<Schema>> =
    LazyLock::new(|| Arc::new(apm_server_schema()));

/// Build the resource schema.
///
/// `metadata` is declared by hand with the Kubernetes naming validators; `spec`
/// is derived from the OpenAPI schema of [`ApmServerSpec`].
#[must_use]
pub fn apm_server_schema() -> Schema {
    let crd = ApmServer::crd();
    let spec_schema = crd
        .spec
        .versions
        .first()
        .and_then(|v| v.schema.as_ref())
        .and_then(|s| s.open_api_v3_schema.as_ref())
        .and_then(|s| s.properties.as_ref())
        .and_then(|props| props.get("spec"));

    let spec_attributes = spec_schema.map(attributes_from_openapi).unwrap_or_default();
    let spec_description = spec_schema
        .and_then(|s| s.description.clone())
        .unwrap_or_else(|| "ApmServerSpec holds the specification of an APM Server.".to_string());
    debug!(
        attributes = spec_attributes.len(),
        "Derived ApmServer spec attributes from CRD schema"
    );

    Schema {
        version: 0,
        description: "ApmServer represents an APM Server resource in a Kubernetes cluster."
            .to_string(),
        attributes: vec![
            Attribute::new(ATTR_ID, AttributeType::String)
                .computed()
                .description("The timestamp of the last change to this resource."),
            Attribute::new(ATTR_YAML, AttributeType::String)
                .computed()
                .description("The generated manifest in YAML format."),
            Attribute::new(ATTR_API_VERSION, AttributeType::String)
                .computed()
                .field_name("apiVersion")
                .description("The API group of the requested resource."),
            Attribute::new(ATTR_KIND, AttributeType::String)
                .computed()
                .description("The type of the requested resource."),
            metadata_attribute(),
            Attribute::new(ATTR_SPEC, AttributeType::Object(spec_attributes))
                .description(&spec_description),
        ],
    }
}

fn metadata_attribute() -> Attribute {
    let string_map = || AttributeType::Map(Box::new(AttributeType::String));

    Attribute::new(
        ATTR_METADATA,
        AttributeType::Object(vec![
            Attribute::new("name", AttributeType::String)
                .required()
                .description("Unique name of this object within its namespace.")
                .validator(Validator::Name),
            Attribute::new("namespace", AttributeType::String)
                .required()
                .description("Namespace of this object.")
                .validator(Validator::Namespace),
            Attribute::new("labels", string_map())
                .description(
                    "Keys and values that can be used to organize and categorize objects.",
                )
                .validator(Validator::Labels),
            Attribute::new("annotations", string_map())
                .description(
                    "Unstructured key value map stored with a resource that may be set by external tools.",
                )
                .validator(Validator::Annotations),
        ]),
    )
    .required()
    .description("Data that helps uniquely identify this object.")
}

/// Render `config` into state, reporting failures as a single diagnostic.
fn materialize_with_metrics(
    materializer: &Materializer<ApmServer>,
    operation: &str,
    config: &Value,
) -> (Option<Value>, Diagnostics) {
    let started = Instant::now();
    let mut diagnostics = Diagnostics::new();

    match materializer.materialize(config) {
        Ok(model) => {
            let yaml_len = model.yaml.as_str().map_or(0, str::len);
            record_manifest_size(KIND_APM_SERVER, yaml_len);
            record_operation_success(KIND_APM_SERVER, operation, started.elapsed());
            info!(operation, id = %model.id, "Rendered ApmServer manifest");
            (Some(model.into_value()), diagnostics)
        }
        Err(e) => {
            error!(operation, error = %e, "Failed to render ApmServer manifest");
            record_error(KIND_APM_SERVER, e.category());
            record_operation_error(KIND_APM_SERVER, operation, started.elapsed());
            diagnostics.add_error(DIAG_YAML_SUMMARY, e.to_string());
            (None, diagnostics)
        }
    }
}

/// The `<provider>_apm_k8s_elastic_co_apm_server_v1` resource.
pub struct ApmServerResource {
    materializer: Materializer<ApmServer>,
}

impl ApmServerResource {
    #[must_use]
    pub fn new() -> Self {
        Self {
            materializer: Materializer::new(Arc::clone(&APM_SERVER_SCHEMA)),
        }
    }
}

impl Default for ApmServerResource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Resource for ApmServerResource {
    fn type_name(&self, provider_name: &str) -> String {
        format!("{provider_name}_{APM_SERVER_TYPE_SUFFIX}")
    }

    fn schema(&self) -> Arc<Schema> {
        Arc::clone(self.materializer.schema())
    }

    async fn create(&self, request: CreateRequest) -> CreateResponse {
        let (state, diagnostics) =
            materialize_with_metrics(&self.materializer, OPERATION_CREATE, &request.config);
        CreateResponse { state, diagnostics }
    }

    async fn read(&self, request: ReadRequest) -> ReadResponse {
        record_operation_success(KIND_APM_SERVER, OPERATION_READ, Duration::ZERO);
        ReadResponse {
            state: Some(request.state),
            diagnostics: Diagnostics::new(),
        }
    }

    async fn update(&self, request: UpdateRequest) -> UpdateResponse {
        debug!(prior_id = %request.prior_state.attr(ATTR_ID), "Replacing ApmServer manifest");
        let (state, diagnostics) =
            materialize_with_metrics(&self.materializer, OPERATION_UPDATE, &request.config);
        UpdateResponse { state, diagnostics }
    }

    async fn delete(&self, request: DeleteRequest) -> DeleteResponse {
        debug!(id = %request.state.attr(ATTR_ID), "Removing ApmServer from state");
        record_operation_success(KIND_APM_SERVER, OPERATION_DELETE, Duration::ZERO);
        DeleteResponse::default()
    }
}

/// The `<provider>_apm_k8s_elastic_co_apm_server_v1_manifest` data source.
pub struct ApmServerManifestDataSource {
    materializer: Materializer<ApmServer>,
}

impl ApmServerManifestDataSource {
    #[must_use]
    pub fn new() -> Self {
        Self {
            materializer: Materializer::new(Arc::clone(&APM_SERVER_SCHEMA)),
        }
    }
}

impl Default for ApmServerManifestDataSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DataSource for ApmServerManifestDataSource {
    fn type_name(&self, provider_name: &str) -> String {
        format!("{provider_name}_{APM_SERVER_TYPE_SUFFIX}_{MANIFEST_DATA_SOURCE_SUFFIX}")
    }

    fn schema(&self) -> Arc<Schema> {
        Arc::clone(self.materializer.schema())
    }

    async fn read(&self, request: DataSourceReadRequest) -> DataSourceReadResponse {
        let (state, diagnostics) =
            materialize_with_metrics(&self.materializer, OPERATION_RENDER, &request.config);
        DataSourceReadResponse { state, diagnostics }
    }
}

#[cfg(test)]
#[path = "apm_server_tests.rs"]
mod apm_server_tests;
