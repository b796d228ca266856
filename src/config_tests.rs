// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `config.rs`

#[cfg(test)]
mod tests {
    use crate::config::FakeCloudConfig;
    use crate::constants::{DEFAULT_NETWORK_URL, DEFAULT_PROJECT, DEFAULT_SUBNETWORK_URL};
    use crate::errors::ConfigError;
    use crate::zone::ZoneTopology;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = FakeCloudConfig::default();

        assert_eq!(config.project, DEFAULT_PROJECT);
        assert_eq!(config.network_url, DEFAULT_NETWORK_URL);
        assert_eq!(config.subnetwork_url, DEFAULT_SUBNETWORK_URL);
        assert_eq!(config.topology, ZoneTopology::test_default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = FakeCloudConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, FakeCloudConfig::default());
    }

    #[test]
    fn test_partial_document_overrides_fields() {
        let config = FakeCloudConfig::from_yaml_str(
            r"
project: other-project
subnetworkUrl: ''
topology:
  zone-a: [node-1]
",
        )
        .unwrap();

        assert_eq!(config.project, "other-project");
        assert_eq!(config.network_url, DEFAULT_NETWORK_URL);
        assert_eq!(config.subnetwork_url, "");
        assert_eq!(config.topology, ZoneTopology::new().with_node("zone-a", "node-1"));
    }

    #[test]
    fn test_json_document_is_accepted() {
        let config =
            FakeCloudConfig::from_yaml_str(r#"{"project": "json-project", "topology": {}}"#)
                .unwrap();
        assert_eq!(config.project, "json-project");
        assert!(config.topology.is_empty());
    }

    #[test]
    fn test_malformed_document_is_parse_error() {
        let result = FakeCloudConfig::from_yaml_str("project: [unterminated");
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_invalid_network_url() {
        let result = FakeCloudConfig::from_yaml_str("networkUrl: not a url");
        match result {
            Err(ConfigError::InvalidUrl { field, value, .. }) => {
                assert_eq!(field, "networkUrl");
                assert_eq!(value, "not a url");
            }
            other => panic!("expected InvalidUrl, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_node_rejected() {
        let result = FakeCloudConfig::from_yaml_str(
            r"
topology:
  zone1: [instance1]
  zone2: [instance1]
",
        );
        assert!(matches!(result, Err(ConfigError::DuplicateNode { .. })));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "project: file-project").unwrap();

        let config = FakeCloudConfig::from_file(file.path()).unwrap();
        assert_eq!(config.project, "file-project");
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.yaml");

        let result = FakeCloudConfig::from_file(&path);
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
