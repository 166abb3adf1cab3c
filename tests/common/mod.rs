// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Shared helpers for integration tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Configuration of the `apm1` quickstart ApmServer.
pub const QUICKSTART_CONFIG: &str = r#"{
  "metadata": { "name": "apm1", "namespace": "default" },
  "spec": { "version": "8.10.0" }
}"#;

/// Write `contents` to `name` inside a fresh temporary directory.
pub fn write_config(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("Failed to write config");
    (dir, path)
}

/// Run the `tfcrd` binary with logging turned down and no provider name override.
pub fn tfcrd(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tfcrd"))
        .args(args)
        .env("RUST_LOG", "error")
        .env_remove("TFCRD_PROVIDER_NAME")
        .output()
        .expect("Failed to run tfcrd")
}

/// `tfcrd render --config <path>` plus extra arguments.
pub fn render(path: &Path, extra: &[&str]) -> Output {
    let path = path.to_str().expect("utf-8 path");
    let mut args = vec!["render", "--config", path];
    args.extend_from_slice(extra);
    tfcrd(&args)
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
