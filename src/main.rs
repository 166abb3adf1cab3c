// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tfcrd::{
    constants::{APM_SERVER_TYPE_SUFFIX, ATTR_YAML, PROVIDER_NAME_ENV},
    diagnostics::Diagnostics,
    provider::{Provider, ProviderConfig},
    value::Value,
};
use tracing::{debug, info};

/// Render Kubernetes CRD manifests the way the Terraform provider does.
#[derive(Debug, Parser)]
#[command(name = "tfcrd", version, about)]
struct Cli {
    /// Provider name used as the type name prefix (defaults to $TFCRD_PROVIDER_NAME, then "k8s")
    #[arg(long, global = true)]
    provider_name: Option<String>,

    /// Print the Prometheus metrics gathered during the command to stderr
    #[arg(long, global = true)]
    metrics: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List registered resource and data source type names
    Resources,

    /// Print the schema of a resource or data source as JSON
    Schema {
        /// Full type name (defaults to the ApmServer resource)
        #[arg(long = "type")]
        type_name: Option<String>,
    },

    /// Run a lifecycle operation on a configuration file (JSON or YAML attribute map)
    Render {
        /// Path to the configuration file
        #[arg(long)]
        config: PathBuf,

        /// Full type name (defaults to the ApmServer resource)
        #[arg(long = "type")]
        type_name: Option<String>,

        /// Lifecycle operation to run
        #[arg(long, value_enum, default_value_t = Operation::Create)]
        operation: Operation,

        /// What to print on success
        #[arg(long, value_enum, default_value_t = Output::Yaml)]
        output: Output,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Operation {
    Create,
    Update,
    /// Read the manifest data source
    DataSource,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Output {
    /// The rendered manifest
    Yaml,
    /// The full Terraform state as JSON
    State,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .thread_name("tfcrd")
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cli))
}

async fn async_main(cli: Cli) -> Result<()> {
    init_logging();

    let mut config = ProviderConfig::from_env();
    if let Some(name) = cli.provider_name {
        config.provider_name = name;
    }
    debug!(provider = %config.provider_name, env = PROVIDER_NAME_ENV, "Provider configured");
    let provider = Provider::new(config);

    let result = run_command(&provider, cli.command).await;
    if cli.metrics {
        dump_metrics()?;
    }
    result
}

async fn run_command(provider: &Provider, command: Command) -> Result<()> {
    match command {
        Command::Resources => {
            for name in provider.resource_type_names() {
                println!("resource     {name}");
            }
            for name in provider.data_source_type_names() {
                println!("data source  {name}");
            }
            Ok(())
        }
        Command::Schema { type_name } => {
            let type_name = type_name.unwrap_or_else(|| default_type_name(provider));
            let schema = provider
                .resource(&type_name)
                .map(|r| r.schema())
                .or_else(|| provider.data_source(&type_name).map(|d| d.schema()))
                .with_context(|| format!("Unknown type \"{type_name}\""))?;
            println!("{}", serde_json::to_string_pretty(schema.as_ref())?);
            Ok(())
        }
        Command::Render {
            config,
            type_name,
            operation,
            output,
        } => {
            let type_name = type_name.unwrap_or_else(|| default_type_name(provider));
            let input = load_config(&config).await?;
            info!(type_name = %type_name, ?operation, path = %config.display(), "Rendering configuration");

            let (state, diagnostics) = run_operation(provider, &type_name, operation, input).await;
            report(&diagnostics);
            let Some(state) = state.filter(|_| !diagnostics.has_error()) else {
                bail!("{operation:?} of {type_name} failed with {} error(s)", diagnostics.errors().count());
            };

            match output {
                Output::Yaml => print!("{}", state.attr(ATTR_YAML).as_str().unwrap_or_default()),
                Output::State => println!("{}", serde_json::to_string_pretty(&state)?),
            }
            Ok(())
        }
    }
}

/// Initialize logging on stderr so stdout only carries command output.
///
/// Respects `RUST_LOG` (default `info`) and `RUST_LOG_FORMAT` (`text` or `json`).
fn init_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let log_format = std::env::var("RUST_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    match log_format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_file(true)
                .with_line_number(true)
                .with_target(false)
                .json()
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_file(true)
                .with_line_number(true)
                .with_target(false)
                .with_ansi(true)
                .compact()
                .init();
        }
    }
}

fn default_type_name(provider: &Provider) -> String {
    format!("{}_{APM_SERVER_TYPE_SUFFIX}", provider.name())
}

/// Read a configuration file. JSON is tried first, then YAML.
async fn load_config(path: &Path) -> Result<Value> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_config(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}

fn parse_config(raw: &str) -> Result<Value> {
    let json = match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(json) => json,
        Err(json_err) => serde_yaml::from_str::<serde_json::Value>(raw)
            .with_context(|| format!("not valid JSON ({json_err}) or YAML"))?,
    };
    Ok(Value::from_json(json))
}

async fn run_operation(
    provider: &Provider,
    type_name: &str,
    operation: Operation,
    config: Value,
) -> (Option<Value>, Diagnostics) {
    match operation {
        Operation::Create => {
            let response = provider.create(type_name, config).await;
            (response.state, response.diagnostics)
        }
        Operation::Update => {
            let response = provider.update(type_name, config, Value::Null).await;
            (response.state, response.diagnostics)
        }
        Operation::DataSource => {
            let response = provider.read_data_source(type_name, config).await;
            (response.state, response.diagnostics)
        }
    }
}

/// Write the metrics registry in Prometheus text format to stderr.
fn dump_metrics() -> Result<()> {
    let text = tfcrd::metrics::gather_metrics().context("Failed to gather metrics")?;
    eprint!("{text}");
    Ok(())
}

fn report(diagnostics: &Diagnostics) {
    for diagnostic in diagnostics {
        eprintln!("{diagnostic}");
    }
}
