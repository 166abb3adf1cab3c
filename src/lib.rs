// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

#![allow(unexpected_cfgs)]

//! # tfcrd - Terraform resources for Kubernetes CRD manifests
//!
//! tfcrd exposes Kubernetes Custom Resource Definitions as Terraform resources that
//! render manifests. It never talks to a cluster: Create and Update turn the
//! configured object into YAML and keep it in Terraform state, ready to be handed
//! to whatever applies manifests.
//!
//! ## Overview
//!
//! The crate currently serves the Elastic Cloud on Kubernetes `ApmServer` CRD
//! (`apm.k8s.elastic.co/v1`):
//!
//! - A resource, `k8s_apm_k8s_elastic_co_apm_server_v1`
//! - A data source, `k8s_apm_k8s_elastic_co_apm_server_v1_manifest`
//!
//! ## Modules
//!
//! - [`crd`] - The YAML-facing `ApmServer` types
//! - [`schema`] - Terraform schemas, derived from the CRD's OpenAPI schema
//! - [`value`] - Terraform-facing values
//! - [`convert`] - Schema-guided conversion between the two
//! - [`manifest`] - Manifest rendering and the materializer
//! - [`apm_server`] - The `ApmServer` resource and data source
//! - [`provider`] - Type registry and configuration
//!
//! ## Example
//!
//! ```rust,no_run
//! use tfcrd::provider::Provider;
//! use tfcrd::value::Value;
//!
//! # async fn example() {
//! let provider = Provider::default();
//! let config = Value::from_json(serde_json::json!({
//!     "metadata": { "name": "apm1", "namespace": "default" },
//!     "spec": { "version": "8.10.0" }
//! }));
//!
//! let response = provider
//!     .create("k8s_apm_k8s_elastic_co_apm_server_v1", config)
//!     .await;
//! let state = response.state.expect("rendered");
//! println!("{}", state.attr("yaml"));
//! # }
//! ```

pub mod apm_server;
pub mod constants;
pub mod convert;
pub mod crd;
pub mod data_source;
pub mod diagnostics;
pub mod dynamic;
pub mod errors;
pub mod ids;
pub mod manifest;
pub mod metrics;
pub mod naming;
pub mod provider;
pub mod resource;
pub mod schema;
pub mod validators;
pub mod value;
