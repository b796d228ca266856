// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `main.rs` - argument parsing and command execution

use super::{run, Cli, Command, OutputFormat};
use clap::Parser;
use std::io::Write;

fn write_temp(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_default_log_filter_is_info() {
    assert_eq!(negfake::constants::DEFAULT_LOG_FILTER, "info");
    assert!(tracing_subscriber::EnvFilter::try_new(negfake::constants::DEFAULT_LOG_FILTER).is_ok());
}

#[test]
fn test_parse_zones_command() {
    let cli = Cli::try_parse_from(["negfake", "zones"]).unwrap();
    assert!(matches!(cli.command, Command::Zones));
    assert!(cli.config.is_none());
}

#[test]
fn test_parse_global_config_after_subcommand() {
    let cli = Cli::try_parse_from(["negfake", "node-zone", "instance1", "--config", "cfg.yaml"])
        .unwrap();
    assert_eq!(cli.config.unwrap().to_str(), Some("cfg.yaml"));
    match cli.command {
        Command::NodeZone { node } => assert_eq!(node, "instance1"),
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_parse_replay_format() {
    let cli = Cli::try_parse_from(["negfake", "replay", "ops.yaml", "--format", "yaml"]).unwrap();
    match cli.command {
        Command::Replay { format, .. } => assert_eq!(format, OutputFormat::Yaml),
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_parse_rejects_missing_subcommand() {
    assert!(Cli::try_parse_from(["negfake"]).is_err());
}

#[test]
fn test_run_zones_with_defaults() {
    let cli = Cli::try_parse_from(["negfake", "zones"]).unwrap();
    let output = run(&cli).unwrap();

    assert_eq!(
        output,
        "zone1: instance1,instance2\nzone2: instance3,instance4,instance5,instance6"
    );
}

#[test]
fn test_run_node_zone_from_config() {
    let config = write_temp("topology:\n  edge-a: [node-1]\n");
    let path = config.path().to_str().unwrap();

    let cli = Cli::try_parse_from(["negfake", "--config", path, "node-zone", "node-1"]).unwrap();
    assert_eq!(run(&cli).unwrap(), "edge-a");
}

#[test]
fn test_run_node_zone_unknown_node() {
    let cli = Cli::try_parse_from(["negfake", "node-zone", "missing"]).unwrap();
    let err = run(&cli).unwrap_err();
    assert!(err.to_string().contains("node 'missing' not found"));
}

#[test]
fn test_run_replay_prints_snapshot() {
    let script = write_temp(
        r"
- op: create
  name: neg-a
  zone: zone1
- op: attach
  name: neg-a
  zone: zone1
  endpoints:
    - ipAddress: 10.0.0.1
      port: 80
      instance: instance1
",
    );
    let path = script.path().to_str().unwrap();

    let cli = Cli::try_parse_from(["negfake", "replay", path]).unwrap();
    let output = run(&cli).unwrap();

    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["groups"][0]["zone"], "zone1");
    assert_eq!(value["groups"][0]["group"]["name"], "neg-a");
    assert_eq!(
        value["endpoints"]["zones/zone1/networkEndpointGroups/neg-a"][0]["ipAddress"],
        "10.0.0.1"
    );
}

#[test]
fn test_run_replay_reports_failing_operation() {
    let script = write_temp("- op: delete\n  name: neg-a\n  zone: zone1\n");
    let path = script.path().to_str().unwrap();

    let cli = Cli::try_parse_from(["negfake", "replay", path]).unwrap();
    let err = run(&cli).unwrap_err();
    assert!(err.to_string().contains("operation #0 (delete) failed"));
}

#[test]
fn test_run_with_missing_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.yaml");

    let cli =
        Cli::try_parse_from(["negfake", "--config", path.to_str().unwrap(), "zones"]).unwrap();
    let err = run(&cli).unwrap_err();
    assert!(err.to_string().contains("Failed to load config"));
}
