// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `provider.rs`

#[cfg(test)]
mod tests {
    use crate::constants::DIAG_UNKNOWN_TYPE_SUMMARY;
    use crate::provider::{Provider, ProviderConfig};
    use crate::value::Value;
    use serde_json::json;

    const APM_TYPE: &str = "k8s_apm_k8s_elastic_co_apm_server_v1";

    fn valid_config() -> Value {
        Value::from_json(json!({
            "metadata": { "name": "apm1", "namespace": "default" },
            "spec": { "version": "8.10.0" }
        }))
    }

    #[test]
    fn test_config_default_name() {
        assert_eq!(ProviderConfig::default().provider_name, "k8s");
    }

    #[test]
    fn test_config_from_lookup() {
        let config = ProviderConfig::from_lookup(|key| {
            (key == "TFCRD_PROVIDER_NAME").then(|| " custom ".to_string())
        });
        assert_eq!(config.provider_name, "custom");
    }

    #[test]
    fn test_config_from_lookup_ignores_empty() {
        let config = ProviderConfig::from_lookup(|_| Some("  ".to_string()));
        assert_eq!(config.provider_name, "k8s");

        let config = ProviderConfig::from_lookup(|_| None);
        assert_eq!(config.provider_name, "k8s");
    }

    #[test]
    fn test_registered_type_names() {
        let provider = Provider::default();
        assert_eq!(provider.resource_type_names(), vec![APM_TYPE.to_string()]);
        assert_eq!(
            provider.data_source_type_names(),
            vec![format!("{APM_TYPE}_manifest")]
        );
    }

    #[test]
    fn test_type_names_follow_provider_name() {
        let provider = Provider::new(ProviderConfig {
            provider_name: "eck".into(),
        });
        assert!(provider.resource("eck_apm_k8s_elastic_co_apm_server_v1").is_some());
        assert!(provider.resource(APM_TYPE).is_none());
    }

    #[test]
    fn test_empty_provider() {
        let provider = Provider::empty(ProviderConfig::default());
        assert!(provider.resource_type_names().is_empty());
        assert!(provider.data_source_type_names().is_empty());
    }

    #[tokio::test]
    async fn test_create_valid_config() {
        let response = Provider::default().create(APM_TYPE, valid_config()).await;
        assert!(response.diagnostics.is_empty());
        let state = response.state.unwrap();
        assert!(state.attr("yaml").as_str().unwrap().contains("name: apm1"));
    }

    #[tokio::test]
    async fn test_create_unknown_type() {
        let response = Provider::default().create("k8s_nope", valid_config()).await;
        assert!(response.state.is_none());
        let diag = response.diagnostics.iter().next().unwrap();
        assert_eq!(diag.summary, DIAG_UNKNOWN_TYPE_SUMMARY);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_config_before_rendering() {
        let config = Value::from_json(json!({
            "metadata": { "name": "apm1" },
            "spec": { "version": "8.10.0" }
        }));
        let response = Provider::default().create(APM_TYPE, config).await;

        assert!(response.state.is_none());
        assert!(response.diagnostics.has_error());
        let diag = response.diagnostics.errors().next().unwrap();
        assert_eq!(diag.summary, "Missing required argument");
    }

    #[tokio::test]
    async fn test_update_valid_config() {
        let provider = Provider::default();
        let created = provider.create(APM_TYPE, valid_config()).await.state.unwrap();
        let response = provider.update(APM_TYPE, valid_config(), created.clone()).await;

        let updated = response.state.unwrap();
        assert_eq!(updated.attr("yaml"), created.attr("yaml"));
        assert_ne!(updated.attr("id"), created.attr("id"));
    }

    #[tokio::test]
    async fn test_update_unknown_type() {
        let response = Provider::default()
            .update("k8s_nope", valid_config(), Value::Null)
            .await;
        assert!(response.state.is_none());
        assert!(response.diagnostics.has_error());
    }

    #[tokio::test]
    async fn test_read_data_source() {
        let response = Provider::default()
            .read_data_source(&format!("{APM_TYPE}_manifest"), valid_config())
            .await;
        assert!(response.diagnostics.is_empty());
        assert!(response.state.unwrap().attr("yaml").as_str().is_some());
    }

    #[tokio::test]
    async fn test_read_data_source_rejects_resource_type() {
        let response = Provider::default().read_data_source(APM_TYPE, valid_config()).await;
        assert!(response.state.is_none());
        let diag = response.diagnostics.iter().next().unwrap();
        assert_eq!(diag.summary, DIAG_UNKNOWN_TYPE_SUMMARY);
    }
}
