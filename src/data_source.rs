// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! The data source contract.
//!
//! A data source only has Read: it turns configuration into state without managing
//! anything. Manifest data sources use this to render YAML without creating a
//! resource in state.

use crate::diagnostics::Diagnostics;
use crate::schema::Schema;
use crate::value::Value;
use async_trait::async_trait;
use std::sync::Arc;

#[derive(Clone, Debug, Default)]
pub struct DataSourceReadRequest {
    pub config: Value,
}

#[derive(Clone, Debug, Default)]
pub struct DataSourceReadResponse {
    pub state: Option<Value>,
    pub diagnostics: Diagnostics,
}

/// A Terraform data source type.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Full type name given the provider's name.
    fn type_name(&self, provider_name: &str) -> String;

    fn schema(&self) -> Arc<Schema>;

    async fn read(&self, request: DataSourceReadRequest) -> DataSourceReadResponse;
}
