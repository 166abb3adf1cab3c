// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Global constants for the tfcrd provider.
//!
//! This module contains all string constants used throughout the codebase.
//! Constants are organized by category for easy maintenance.

// ============================================================================
// API Constants
// ============================================================================

/// API group of the ECK APM Server CRD
pub const API_GROUP: &str = "apm.k8s.elastic.co";

/// API version of the ECK APM Server CRD
pub const API_VERSION: &str = "v1";

/// Fully qualified API version (group/version), stamped into every manifest
pub const API_GROUP_VERSION: &str = "apm.k8s.elastic.co/v1";

/// Kind name for `ApmServer` resource
pub const KIND_APM_SERVER: &str = "ApmServer";

// ============================================================================
// Provider Constants
// ============================================================================

/// Provider name used as the prefix of every type name when none is configured
pub const DEFAULT_PROVIDER_NAME: &str = "k8s";

/// Environment variable overriding the provider name
pub const PROVIDER_NAME_ENV: &str = "TFCRD_PROVIDER_NAME";

/// Type name suffix of the ApmServer resource (`<provider>_<suffix>`)
pub const APM_SERVER_TYPE_SUFFIX: &str = "apm_k8s_elastic_co_apm_server_v1";

/// Type name suffix appended to a resource type name for its manifest data source
pub const MANIFEST_DATA_SOURCE_SUFFIX: &str = "manifest";

// ============================================================================
// Attribute Names
// ============================================================================

/// Synthetic id attribute (nanosecond timestamp of the last change)
pub const ATTR_ID: &str = "id";

/// Computed `apiVersion` attribute
pub const ATTR_API_VERSION: &str = "api_version";

/// Computed `kind` attribute
pub const ATTR_KIND: &str = "kind";

/// Computed attribute holding the rendered manifest
pub const ATTR_YAML: &str = "yaml";

/// Object metadata attribute
pub const ATTR_METADATA: &str = "metadata";

/// Resource spec attribute
pub const ATTR_SPEC: &str = "spec";

// ============================================================================
// Diagnostics
// ============================================================================

/// Summary of the only error the materializer reports
pub const DIAG_YAML_SUMMARY: &str = "Could not generate YAML";

/// Summary of configuration validation errors
pub const DIAG_INVALID_CONFIG_SUMMARY: &str = "Invalid configuration";

/// Summary reported when a type name is not registered with the provider
pub const DIAG_UNKNOWN_TYPE_SUMMARY: &str = "Unknown resource type";

// ============================================================================
// Kubernetes Naming Limits
// ============================================================================

/// Maximum length of a DNS-1123 subdomain (object names)
pub const DNS1123_SUBDOMAIN_MAX_LEN: usize = 253;

/// Maximum length of a DNS-1123 label (namespaces)
pub const DNS1123_LABEL_MAX_LEN: usize = 63;

/// Maximum length of a label value and of the name part of a qualified key
pub const QUALIFIED_NAME_MAX_LEN: usize = 63;

/// Maximum total size of all annotations on an object, in bytes
pub const ANNOTATIONS_TOTAL_MAX_BYTES: usize = 256 * 1024;

// ============================================================================
// Metrics
// ============================================================================

/// Namespace prefix for all metrics (prometheus-safe)
pub const METRICS_NAMESPACE: &str = "tfcrd";
