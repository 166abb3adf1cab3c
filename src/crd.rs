// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Custom Resource Definition types for the ECK APM Server.
//!
//! This module mirrors the `apm.k8s.elastic.co/v1` `ApmServer` resource managed by
//! Elastic Cloud on Kubernetes. The types are the YAML-facing model: they serialize
//! with Kubernetes (camelCase) field names and skip every unset optional field.
//!
//! The same types drive the Terraform schema. `ApmServer::crd()` produces the
//! OpenAPI v3 schema that [`crate::schema`] walks to derive the `spec` attribute tree,
//! so adding a field here adds it to the Terraform resource as well.
//!
//! # Example
//!
//! ```rust,no_run
//! use tfcrd::crd::{ApmServerSpec, ObjectSelector};
//!
//! let spec = ApmServerSpec {
//!     version: "8.10.0".to_string(),
//!     count: Some(1),
//!     elasticsearch_ref: Some(ObjectSelector {
//!         name: "quickstart".to_string(),
//!         ..Default::default()
//!     }),
//!     ..Default::default()
//! };
//! ```

use crate::dynamic::Dynamic;
use k8s_openapi::api::core::v1::{PodTemplateSpec, ServiceSpec};
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `ApmServer` represents an Elastic APM Server deployment.
///
/// # Example
///
/// ```yaml
/// apiVersion: apm.k8s.elastic.co/v1
/// kind: ApmServer
/// metadata:
///   name: apm-server-quickstart
///   namespace: default
/// spec:
///   version: 8.10.0
///   count: 1
///   elasticsearchRef:
///     name: quickstart
/// ```
#[derive(CustomResource, Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "apm.k8s.elastic.co",
    version = "v1",
    kind = "ApmServer",
    plural = "apmservers",
    shortname = "apm",
    namespaced,
    doc = "ApmServer represents an APM Server resource in a Kubernetes cluster."
)]
#[kube(status = "ApmServerStatus")]
#[serde(rename_all = "camelCase")]
pub struct ApmServerSpec {
    /// Version of the APM Server.
    pub version: String,

    /// Image is the APM Server Docker image to deploy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Count of APM Server instances to deploy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<i32>,

    /// Config holds the APM Server configuration. See:
    /// https://www.elastic.co/guide/en/apm/server/current/configuring-howto-apm-server.html
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<Dynamic>,

    /// HTTP holds the HTTP layer configuration for the APM Server resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http: Option<HttpConfig>,

    /// ElasticsearchRef is a reference to the output Elasticsearch cluster running in the same
    /// Kubernetes cluster.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elasticsearch_ref: Option<ObjectSelector>,

    /// KibanaRef is a reference to a Kibana instance running in the same Kubernetes cluster.
    /// It allows APM agent central configuration management in Kibana.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kibana_ref: Option<ObjectSelector>,

    /// PodTemplate provides customisation options (labels, annotations, affinity rules,
    /// resource requests, and so on) for the APM Server pods.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod_template: Option<PodTemplateSpec>,

    /// RevisionHistoryLimit is the number of revisions to retain to allow rollback in the
    /// underlying Deployment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision_history_limit: Option<i32>,

    /// SecureSettings is a list of references to Kubernetes secrets containing sensitive
    /// configuration options for APM Server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secure_settings: Option<Vec<SecretSource>>,

    /// ServiceAccountName is used to check access from the current resource to a resource
    /// (for ex. Elasticsearch) in a different namespace. Can only be used if ECK is enforcing
    /// RBAC on references.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_account_name: Option<String>,
}

/// HTTP layer configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HttpConfig {
    /// Service defines the template for the associated Kubernetes Service object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<ServiceTemplate>,

    /// TLS defines options for configuring TLS for HTTP.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<TlsOptions>,
}

/// Template for the Kubernetes Service fronting the APM Server.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceTemplate {
    /// ObjectMeta is the metadata of the service. The name and namespace provided here are
    /// managed by ECK and will be ignored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<EmbeddedObjectMeta>,

    /// Spec is the specification of the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<ServiceSpec>,
}

/// Subset of `ObjectMeta` accepted on embedded templates.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddedObjectMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finalizers: Option<Vec<String>>,
}

/// TLS options for the HTTP layer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TlsOptions {
    /// SelfSignedCertificate allows configuring the self-signed certificate generated by the
    /// operator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_signed_certificate: Option<SelfSignedCertificate>,

    /// Certificate is a reference to a Kubernetes secret that contains the certificate and
    /// private key for enabling TLS. The referenced secret should contain `tls.crt`,
    /// `tls.key` and optionally `ca.crt`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate: Option<SecretRef>,
}

/// Self-signed certificate settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SelfSignedCertificate {
    /// SubjectAlternativeNames is a list of SANs to include in the generated HTTP TLS
    /// certificate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_alt_names: Option<Vec<SubjectAlternativeName>>,

    /// Disabled indicates that the provisioning of the self-signed certificate should be
    /// disabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
}

/// A Subject Alternative Name entry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SubjectAlternativeName {
    /// DNS is the DNS name of the subject.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns: Option<String>,

    /// IP is the IP address of the subject.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
}

/// Reference to a secret by name.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SecretRef {
    /// SecretName is the name of the secret.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_name: Option<String>,
}

/// Reference to another Elastic resource, optionally in another namespace.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ObjectSelector {
    /// Name of an existing Kubernetes object corresponding to an Elastic resource managed by
    /// ECK.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Namespace of the Kubernetes object. If empty, defaults to the current namespace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// ServiceName is the name of an existing Kubernetes service which is used to make
    /// requests to the referenced object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,

    /// SecretName is the name of an existing Kubernetes secret that contains connection
    /// information for associating an Elastic resource not managed by the operator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_name: Option<String>,
}

/// A secret whose keys are loaded into the APM Server keystore.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SecretSource {
    /// SecretName is the name of the secret.
    pub secret_name: String,

    /// Entries define how to project each key-value pair in the secret to filesystem paths.
    /// If not defined, all keys will be projected to similarly named paths in the
    /// filesystem.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entries: Option<Vec<KeyToPath>>,
}

/// Projection of a single secret key.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct KeyToPath {
    /// Key is the key contained in the secret.
    pub key: String,

    /// Path is the relative file path to map the key to. Path must not be an absolute file
    /// path and must not contain any ".." components.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// `ApmServer` status, written by the operator.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApmServerStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_nodes: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<String>,
    /// Name of the service associated to the APM Server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    /// Name of the secret holding the APM Server secret token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_token_secret: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elasticsearch_association_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kibana_association_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,
}
