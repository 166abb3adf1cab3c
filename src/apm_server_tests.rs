// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `apm_server.rs`

#[cfg(test)]
mod tests {
    use crate::apm_server::{ApmServerManifestDataSource, ApmServerResource};
    use crate::constants::DIAG_YAML_SUMMARY;
    use crate::data_source::{DataSource, DataSourceReadRequest};
    use crate::resource::{CreateRequest, DeleteRequest, ReadRequest, Resource, UpdateRequest};
    use crate::value::Value;
    use serde_json::json;

    fn config(name: &str, version: &str) -> Value {
        Value::from_json(json!({
            "metadata": { "name": name, "namespace": "default" },
            "spec": { "version": version }
        }))
    }

    fn yaml_of(state: &Value) -> String {
        state.attr("yaml").as_str().unwrap().to_string()
    }

    fn id_of(state: &Value) -> i64 {
        state.attr("id").as_str().unwrap().parse().unwrap()
    }

    #[test]
    fn test_type_names() {
        assert_eq!(
            ApmServerResource::new().type_name("k8s"),
            "k8s_apm_k8s_elastic_co_apm_server_v1"
        );
        assert_eq!(
            ApmServerManifestDataSource::new().type_name("custom"),
            "custom_apm_k8s_elastic_co_apm_server_v1_manifest"
        );
    }

    #[tokio::test]
    async fn test_create_renders_manifest() {
        let resource = ApmServerResource::new();
        let response = resource
            .create(CreateRequest {
                config: config("apm1", "8.10.0"),
            })
            .await;

        assert!(response.diagnostics.is_empty());
        let state = response.state.unwrap();
        let yaml = yaml_of(&state);
        assert!(yaml.starts_with("apiVersion: apm.k8s.elastic.co/v1\nkind: ApmServer\n"), "{yaml}");
        assert!(yaml.contains("metadata:\n  name: apm1"), "{yaml}");
        assert!(yaml.contains("spec:\n  version: 8.10.0"), "{yaml}");

        assert_eq!(state.attr("api_version"), Value::string("apm.k8s.elastic.co/v1"));
        assert_eq!(state.attr("kind"), Value::string("ApmServer"));
        assert_eq!(state.attr("metadata").attr("name"), Value::string("apm1"));
        assert!(id_of(&state) > 0);
    }

    #[tokio::test]
    async fn test_create_omits_unset_optional_fields() {
        let resource = ApmServerResource::new();
        let state = resource
            .create(CreateRequest {
                config: config("apm1", "8.10.0"),
            })
            .await
            .state
            .unwrap();

        let yaml = yaml_of(&state);
        for field in ["image", "count", "podTemplate", "elasticsearchRef", "labels", "annotations"] {
            assert!(!yaml.contains(field), "{field} should be omitted: {yaml}");
        }
    }

    #[tokio::test]
    async fn test_update_renders_same_yaml_as_create() {
        let resource = ApmServerResource::new();
        let created = resource
            .create(CreateRequest {
                config: config("apm1", "8.10.0"),
            })
            .await
            .state
            .unwrap();
        let updated = resource
            .update(UpdateRequest {
                config: config("apm1", "8.10.0"),
                prior_state: created.clone(),
            })
            .await
            .state
            .unwrap();

        assert_eq!(yaml_of(&created), yaml_of(&updated));
        assert!(id_of(&updated) > id_of(&created));
    }

    #[tokio::test]
    async fn test_update_reflects_new_config() {
        let resource = ApmServerResource::new();
        let prior = resource
            .create(CreateRequest {
                config: config("apm1", "8.10.0"),
            })
            .await
            .state
            .unwrap();
        let updated = resource
            .update(UpdateRequest {
                config: config("apm1", "8.11.1"),
                prior_state: prior,
            })
            .await
            .state
            .unwrap();

        assert!(yaml_of(&updated).contains("version: 8.11.1"));
    }

    #[tokio::test]
    async fn test_read_returns_state_unchanged() {
        let resource = ApmServerResource::new();
        let state = resource
            .create(CreateRequest {
                config: config("apm1", "8.10.0"),
            })
            .await
            .state
            .unwrap();

        let response = resource
            .read(ReadRequest {
                state: state.clone(),
            })
            .await;
        assert!(response.diagnostics.is_empty());
        assert_eq!(response.state, Some(state));
    }

    #[tokio::test]
    async fn test_delete_is_a_no_op() {
        let resource = ApmServerResource::new();
        let response = resource
            .delete(DeleteRequest {
                state: config("apm1", "8.10.0"),
            })
            .await;
        assert!(response.diagnostics.is_empty());
    }

    #[tokio::test]
    async fn test_render_failure_is_reported_as_diagnostic() {
        let resource = ApmServerResource::new();
        let response = resource
            .create(CreateRequest {
                config: Value::from_json(json!({
                    "metadata": { "name": "apm1", "namespace": "default" },
                    "spec": { "count": 1 }
                })),
            })
            .await;

        assert!(response.state.is_none());
        assert_eq!(response.diagnostics.len(), 1);
        let diag = response.diagnostics.iter().next().unwrap();
        assert_eq!(diag.summary, DIAG_YAML_SUMMARY);
        assert!(diag.detail.contains("version"), "{}", diag.detail);
    }

    #[tokio::test]
    async fn test_data_source_renders_same_yaml() {
        let resource = ApmServerResource::new();
        let data_source = ApmServerManifestDataSource::new();

        let from_resource = resource
            .create(CreateRequest {
                config: config("apm1", "8.10.0"),
            })
            .await
            .state
            .unwrap();
        let from_data_source = data_source
            .read(DataSourceReadRequest {
                config: config("apm1", "8.10.0"),
            })
            .await
            .state
            .unwrap();

        assert_eq!(yaml_of(&from_resource), yaml_of(&from_data_source));
        assert_eq!(from_data_source.attr("kind"), Value::string("ApmServer"));
    }

    #[tokio::test]
    async fn test_concurrent_creates_have_unique_ids() {
        let resource = std::sync::Arc::new(ApmServerResource::new());
        let mut handles = Vec::new();
        for i in 0..8 {
            let resource = std::sync::Arc::clone(&resource);
            handles.push(tokio::spawn(async move {
                let state = resource
                    .create(CreateRequest {
                        config: config(&format!("apm{i}"), "8.10.0"),
                    })
                    .await
                    .state
                    .unwrap();
                id_of(&state)
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 8);
    }
}
