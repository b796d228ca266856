// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! `negfake` command line tool.
//!
//! Usage:
//!   negfake zones [--config FILE]
//!   negfake node-zone NODE [--config FILE]
//!   negfake replay SCRIPT [--config FILE] [--format json|yaml]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use negfake::{
    config::FakeCloudConfig,
    constants::DEFAULT_LOG_FILTER,
    replay,
    zone::{FakeZoneGetter, ZoneGetter},
    FakeNetworkEndpointGroupCloud,
};
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Debug, Parser)]
#[command(
    name = "negfake",
    version,
    about = "Inspect zone topologies and replay network endpoint group scripts"
)]
struct Cli {
    /// Configuration file (YAML or JSON). Built-in test defaults are used when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List zones and the nodes in each
    Zones,

    /// Print the zone a node belongs to
    NodeZone {
        /// Node name
        node: String,
    },

    /// Apply a script of store operations to an empty fake and print the result
    Replay {
        /// Script file (YAML or JSON list of operations)
        script: PathBuf,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

fn main() -> Result<()> {
    // Initialize logging with custom format
    // Format: timestamp file:line LEVEL message
    //
    // Respects RUST_LOG environment variable if set, otherwise defaults to INFO level.
    // Logs go to stderr; stdout carries results.
    //
    // Respects RUST_LOG_FORMAT environment variable for output format
    // Example: RUST_LOG_FORMAT=json negfake zones
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER));

    let log_format = std::env::var("RUST_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    match log_format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_target(false)
                .with_writer(std::io::stderr)
                .json()
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_ansi(true)
                .compact()
                .init();
        }
    }

    let cli = Cli::parse();
    debug!(?cli, "Parsed arguments");

    let output = run(&cli)?;
    println!("{output}");
    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<FakeCloudConfig> {
    match path {
        Some(path) => FakeCloudConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => {
            debug!("No config file given, using defaults");
            Ok(FakeCloudConfig::default())
        }
    }
}

/// Execute a parsed command and return what should be printed.
fn run(cli: &Cli) -> Result<String> {
    let config = load_config(cli.config.as_ref())?;

    match &cli.command {
        Command::Zones => {
            let lines: Vec<String> = config
                .topology
                .zones()
                .map(|(zone, nodes)| {
                    let nodes: Vec<&str> = nodes.iter().map(String::as_str).collect();
                    format!("{zone}: {}", nodes.join(","))
                })
                .collect();
            Ok(lines.join("\n"))
        }

        Command::NodeZone { node } => {
            let zones = FakeZoneGetter::new(config.topology);
            Ok(zones.zone_for_node(node)?)
        }

        Command::Replay { script, format } => {
            let document = std::fs::read_to_string(script)
                .with_context(|| format!("Failed to read script {}", script.display()))?;
            let operations = replay::parse_script(&document)?;

            let cloud = FakeNetworkEndpointGroupCloud::from_config(&config);
            let applied = replay::apply(&cloud, &operations)?;
            info!(applied, script = %script.display(), "Replayed script");

            let snapshot = cloud.snapshot();
            match format {
                OutputFormat::Json => Ok(serde_json::to_string_pretty(&snapshot)?),
                OutputFormat::Yaml => Ok(serde_yaml::to_string(&snapshot)?),
            }
        }
    }
}

#[cfg(test)]
mod main_tests;
