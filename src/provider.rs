// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Provider registry and configuration.
//!
//! The [`Provider`] owns every resource and data source type it serves and
//! resolves full type names (`<provider>_<suffix>`) to them. It also runs the
//! configuration validation Terraform performs before calling a resource, so
//! callers outside Terraform (the CLI, tests) get the same guarantees.

use crate::apm_server::{ApmServerManifestDataSource, ApmServerResource};
use crate::constants::{DEFAULT_PROVIDER_NAME, DIAG_UNKNOWN_TYPE_SUMMARY, PROVIDER_NAME_ENV};
use crate::data_source::{DataSource, DataSourceReadRequest, DataSourceReadResponse};
use crate::diagnostics::Diagnostics;
use crate::resource::{CreateRequest, CreateResponse, Resource, UpdateRequest, UpdateResponse};
use crate::value::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Provider-level settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Prefix of every type name (`k8s` gives `k8s_apm_k8s_elastic_co_apm_server_v1`).
    pub provider_name: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider_name: DEFAULT_PROVIDER_NAME.to_string(),
        }
    }
}

impl ProviderConfig {
    /// Read the configuration from the environment.
    ///
    /// `TFCRD_PROVIDER_NAME` overrides the provider name; empty values are ignored.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let provider_name = lookup(PROVIDER_NAME_ENV)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_PROVIDER_NAME.to_string());
        Self { provider_name }
    }
}

/// Registry of resource and data source types.
pub struct Provider {
    config: ProviderConfig,
    resources: Vec<Arc<dyn Resource>>,
    data_sources: Vec<Arc<dyn DataSource>>,
}

impl Provider {
    /// Provider with every built-in resource and data source registered.
    #[must_use]
    pub fn new(config: ProviderConfig) -> Self {
        let mut provider = Self::empty(config);
        provider.register_resource(Arc::new(ApmServerResource::new()));
        provider.register_data_source(Arc::new(ApmServerManifestDataSource::new()));
        provider
    }

    /// Provider with nothing registered.
    #[must_use]
    pub fn empty(config: ProviderConfig) -> Self {
        Self {
            config,
            resources: Vec::new(),
            data_sources: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.config.provider_name
    }

    pub fn register_resource(&mut self, resource: Arc<dyn Resource>) {
        debug!(type_name = %resource.type_name(self.name()), "Registered resource");
        self.resources.push(resource);
    }

    pub fn register_data_source(&mut self, data_source: Arc<dyn DataSource>) {
        debug!(type_name = %data_source.type_name(self.name()), "Registered data source");
        self.data_sources.push(data_source);
    }

    /// Full type names of all registered resources.
    #[must_use]
    pub fn resource_type_names(&self) -> Vec<String> {
        self.resources
            .iter()
            .map(|r| r.type_name(self.name()))
            .collect()
    }

    /// Full type names of all registered data sources.
    #[must_use]
    pub fn data_source_type_names(&self) -> Vec<String> {
        self.data_sources
            .iter()
            .map(|d| d.type_name(self.name()))
            .collect()
    }

    /// Resolve a resource by full type name.
    #[must_use]
    pub fn resource(&self, type_name: &str) -> Option<Arc<dyn Resource>> {
        self.resources
            .iter()
            .find(|r| r.type_name(self.name()) == type_name)
            .cloned()
    }

    /// Resolve a data source by full type name.
    #[must_use]
    pub fn data_source(&self, type_name: &str) -> Option<Arc<dyn DataSource>> {
        self.data_sources
            .iter()
            .find(|d| d.type_name(self.name()) == type_name)
            .cloned()
    }

    /// Validate `config` and, if valid, create the resource.
    pub async fn create(&self, type_name: &str, config: Value) -> CreateResponse {
        let Some(resource) = self.resource(type_name) else {
            return CreateResponse {
                diagnostics: unknown_type(type_name),
                ..Default::default()
            };
        };

        let diagnostics = resource.schema().validate(&config);
        if diagnostics.has_error() {
            warn!(type_name, errors = diagnostics.len(), "Rejected invalid configuration");
            return CreateResponse {
                state: None,
                diagnostics,
            };
        }

        resource.create(CreateRequest { config }).await
    }

    /// Validate `config` and, if valid, replace `prior_state` with it.
    pub async fn update(&self, type_name: &str, config: Value, prior_state: Value) -> UpdateResponse {
        let Some(resource) = self.resource(type_name) else {
            return UpdateResponse {
                diagnostics: unknown_type(type_name),
                ..Default::default()
            };
        };

        let diagnostics = resource.schema().validate(&config);
        if diagnostics.has_error() {
            warn!(type_name, errors = diagnostics.len(), "Rejected invalid configuration");
            return UpdateResponse {
                state: None,
                diagnostics,
            };
        }

        resource
            .update(UpdateRequest {
                config,
                prior_state,
            })
            .await
    }

    /// Validate `config` and, if valid, read the data source.
    pub async fn read_data_source(&self, type_name: &str, config: Value) -> DataSourceReadResponse {
        let Some(data_source) = self.data_source(type_name) else {
            return DataSourceReadResponse {
                diagnostics: unknown_type(type_name),
                ..Default::default()
            };
        };

        let diagnostics = data_source.schema().validate(&config);
        if diagnostics.has_error() {
            warn!(type_name, errors = diagnostics.len(), "Rejected invalid configuration");
            return DataSourceReadResponse {
                state: None,
                diagnostics,
            };
        }

        data_source.read(DataSourceReadRequest { config }).await
    }
}

impl Default for Provider {
    fn default() -> Self {
        Self::new(ProviderConfig::default())
    }
}

fn unknown_type(type_name: &str) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    diagnostics.add_error(
        DIAG_UNKNOWN_TYPE_SUMMARY,
        format!("The provider does not support the type \"{type_name}\"."),
    );
    diagnostics
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod provider_tests;
