// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! The resource lifecycle contract.
//!
//! [`Resource`] mirrors the resource interface of a Terraform provider: a type
//! name, a schema, and Create/Read/Update/Delete handlers. Handlers never return
//! `Err`; failures are reported as error diagnostics on the response, and a
//! response with errors carries no new state.

use crate::diagnostics::Diagnostics;
use crate::schema::Schema;
use crate::value::Value;
use async_trait::async_trait;
use std::sync::Arc;

/// Create: the planned configuration.
#[derive(Clone, Debug, Default)]
pub struct CreateRequest {
    pub config: Value,
}

#[derive(Clone, Debug, Default)]
pub struct CreateResponse {
    pub state: Option<Value>,
    pub diagnostics: Diagnostics,
}

/// Read: the state Terraform currently holds.
#[derive(Clone, Debug, Default)]
pub struct ReadRequest {
    pub state: Value,
}

#[derive(Clone, Debug, Default)]
pub struct ReadResponse {
    /// `None` removes the resource from state.
    pub state: Option<Value>,
    pub diagnostics: Diagnostics,
}

/// Update: the new configuration plus the state it replaces.
#[derive(Clone, Debug, Default)]
pub struct UpdateRequest {
    pub config: Value,
    pub prior_state: Value,
}

#[derive(Clone, Debug, Default)]
pub struct UpdateResponse {
    pub state: Option<Value>,
    pub diagnostics: Diagnostics,
}

/// Delete: the state being destroyed.
#[derive(Clone, Debug, Default)]
pub struct DeleteRequest {
    pub state: Value,
}

#[derive(Clone, Debug, Default)]
pub struct DeleteResponse {
    pub diagnostics: Diagnostics,
}

/// A Terraform-managed resource type.
#[async_trait]
pub trait Resource: Send + Sync {
    /// Full type name given the provider's name, e.g. `k8s_apm_k8s_elastic_co_apm_server_v1`.
    fn type_name(&self, provider_name: &str) -> String;

    /// Attribute schema of the resource.
    fn schema(&self) -> Arc<Schema>;

    async fn create(&self, request: CreateRequest) -> CreateResponse;

    async fn read(&self, request: ReadRequest) -> ReadResponse;

    async fn update(&self, request: UpdateRequest) -> UpdateResponse;

    async fn delete(&self, request: DeleteRequest) -> DeleteResponse;
}
