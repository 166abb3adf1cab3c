// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! End-to-end tests for the `tfcrd` command line
//!
//! Run with: cargo test --test render_integration

mod common;

use common::{render, stderr, stdout, tfcrd, write_config, QUICKSTART_CONFIG};

#[test]
fn test_render_quickstart_yaml() {
    let (_dir, path) = write_config("apm.json", QUICKSTART_CONFIG);
    let output = render(&path, &[]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "apiVersion: apm.k8s.elastic.co/v1\n\
         kind: ApmServer\n\
         metadata:\n  name: apm1\n  namespace: default\n\
         spec:\n  version: 8.10.0\n"
    );
}

#[test]
fn test_render_yaml_config_file() {
    let (_dir, path) = write_config(
        "apm.yaml",
        "metadata:\n  name: apm1\n  namespace: default\nspec:\n  version: 8.10.0\n  count: 2\n  elasticsearch_ref:\n    name: quickstart\n",
    );
    let output = render(&path, &[]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let yaml = stdout(&output);
    assert!(yaml.contains("count: 2"), "{yaml}");
    assert!(yaml.contains("elasticsearchRef:\n    name: quickstart"), "{yaml}");
}

#[test]
fn test_render_state_output() {
    let (_dir, path) = write_config("apm.json", QUICKSTART_CONFIG);
    let output = render(&path, &["--output", "state", "--operation", "update"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let state: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("state is JSON");
    assert_eq!(state["api_version"], "apm.k8s.elastic.co/v1");
    assert_eq!(state["kind"], "ApmServer");
    assert_eq!(state["metadata"]["name"], "apm1");
    assert!(state["id"].as_str().unwrap().parse::<i64>().is_ok());
    assert!(state["yaml"].as_str().unwrap().contains("name: apm1"));
}

#[test]
fn test_render_data_source() {
    let (_dir, path) = write_config("apm.json", QUICKSTART_CONFIG);
    let output = render(
        &path,
        &[
            "--operation",
            "data-source",
            "--type",
            "k8s_apm_k8s_elastic_co_apm_server_v1_manifest",
        ],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("kind: ApmServer"));
}

#[test]
fn test_render_invalid_config_fails_with_diagnostics() {
    let (_dir, path) = write_config(
        "apm.json",
        r#"{ "metadata": { "name": "apm1" }, "spec": { "version": "8.10.0" } }"#,
    );
    let output = render(&path, &[]);

    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    let err = stderr(&output);
    assert!(err.contains("Missing required argument"), "{err}");
    assert!(err.contains("metadata.namespace"), "{err}");
}

#[test]
fn test_render_missing_file_fails() {
    let dir = tempfile::TempDir::new().unwrap();
    let output = render(&dir.path().join("missing.json"), &[]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to read"));
}

#[test]
fn test_provider_name_flag() {
    let (_dir, path) = write_config("apm.json", QUICKSTART_CONFIG);

    let output = render(&path, &["--provider-name", "eck"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let output = render(
        &path,
        &["--provider-name", "eck", "--type", "k8s_apm_k8s_elastic_co_apm_server_v1"],
    );
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Unknown resource type"));
}

#[test]
fn test_resources_lists_type_names() {
    let output = tfcrd(&["resources"]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("resource     k8s_apm_k8s_elastic_co_apm_server_v1\n"));
    assert!(out.contains("data source  k8s_apm_k8s_elastic_co_apm_server_v1_manifest\n"));
}

#[test]
fn test_schema_is_json() {
    let output = tfcrd(&["schema"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let schema: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("schema is JSON");
    let attributes = schema["attributes"].as_array().unwrap();
    assert!(attributes.iter().any(|a| a["name"] == "metadata" && a["required"] == true));
    assert!(attributes.iter().any(|a| a["name"] == "yaml" && a["computed"] == true));
}

#[test]
fn test_schema_unknown_type_fails() {
    let output = tfcrd(&["schema", "--type", "k8s_nope"]);
    assert!(!output.status.success());
}

#[test]
fn test_metrics_flag_dumps_registry_to_stderr() {
    let (_dir, path) = write_config("apm.json", QUICKSTART_CONFIG);
    let output = render(&path, &["--metrics"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(!stdout(&output).contains("tfcrd_"));
    let err = stderr(&output);
    assert!(
        err.contains(r#"tfcrd_operations_total{operation="create",resource_type="ApmServer",status="success"} 1"#),
        "{err}"
    );
    assert!(err.contains("tfcrd_manifest_size_bytes"), "{err}");
}

#[test]
fn test_metrics_not_printed_by_default() {
    let (_dir, path) = write_config("apm.json", QUICKSTART_CONFIG);
    let output = render(&path, &[]);

    assert!(output.status.success());
    assert!(!stderr(&output).contains("tfcrd_operations_total"));
}
