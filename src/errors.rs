// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Error types for manifest materialization.
//!
//! Every error here ends up as a single Terraform diagnostic with the summary
//! [`DIAG_YAML_SUMMARY`](crate::constants::DIAG_YAML_SUMMARY) and the error's
//! `Display` text as detail.

use crate::diagnostics::AttributePath;
use thiserror::Error;

/// Errors that can occur while turning a Terraform configuration into a manifest.
#[derive(Error, Debug)]
pub enum MaterializeError {
    /// A configuration value does not fit the attribute it was given for
    ///
    /// Returned by the schema-guided conversion, e.g. a list where the schema
    /// declares a nested object, or a number that is not a valid integer.
    #[error("Invalid value at {path}: {reason}")]
    Convert {
        /// Attribute path of the offending value
        path: AttributePath,
        /// What was expected
        reason: String,
    },

    /// The resource model is missing or malformed
    ///
    /// Returned when the configuration is not an object or a top-level attribute
    /// has the wrong shape.
    #[error("Invalid resource model: {0}")]
    InvalidModel(String),

    /// The converted JSON does not deserialize into the typed manifest model
    #[error("Unable to build manifest, got error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The typed manifest could not be marshaled to YAML
    #[error("Unable to generate YAML, got error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl MaterializeError {
    /// Error category used as the `error_type` metric label.
    #[must_use]
    pub fn category(&self) -> &'static str {
        match self {
            Self::Convert { .. } => "convert_error",
            Self::InvalidModel(_) => "model_error",
            Self::Decode(_) => "decode_error",
            Self::Yaml(_) => "yaml_error",
        }
    }
}

/// Result alias for materialization.
pub type Result<T, E = MaterializeError> = std::result::Result<T, E>;
