// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Configuration for the fake provider.
//!
//! A configuration names the project self links are minted under, the network
//! URLs handed back verbatim by the store, and the zone topology used by the
//! zone resolver. Every field has a default, so an empty document is valid.
//!
//! # Example
//!
//! ```rust
//! use negfake::config::FakeCloudConfig;
//!
//! let config = FakeCloudConfig::from_yaml_str(
//!     r#"
//! project: team-project
//! topology:
//!   us-central1-a: [node-1, node-2]
//!   us-central1-b: [node-3]
//! "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.project, "team-project");
//! assert!(!config.topology.is_empty());
//! ```

use crate::constants::{DEFAULT_NETWORK_URL, DEFAULT_PROJECT, DEFAULT_SUBNETWORK_URL};
use crate::errors::ConfigError;
use crate::zone::ZoneTopology;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;
use url::Url;

/// Settings for [`FakeNetworkEndpointGroupCloud`](crate::cloud::FakeNetworkEndpointGroupCloud)
/// and [`FakeZoneGetter`](crate::zone::FakeZoneGetter).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FakeCloudConfig {
    /// Project encoded into every self link
    pub project: String,

    /// Value returned by `network_url`
    pub network_url: String,

    /// Value returned by `subnetwork_url`
    pub subnetwork_url: String,

    /// Zone → nodes membership table
    pub topology: ZoneTopology,
}

impl Default for FakeCloudConfig {
    fn default() -> Self {
        Self {
            project: DEFAULT_PROJECT.to_string(),
            network_url: DEFAULT_NETWORK_URL.to_string(),
            subnetwork_url: DEFAULT_SUBNETWORK_URL.to_string(),
            topology: ZoneTopology::test_default(),
        }
    }
}

impl FakeCloudConfig {
    /// Parse and validate a YAML (or JSON) configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed documents and any error
    /// from [`FakeCloudConfig::validate`].
    pub fn from_yaml_str(document: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(document).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read, otherwise the
    /// same errors as [`FakeCloudConfig::from_yaml_str`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading fake cloud config");
        let document = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_yaml_str(&document)
    }

    /// Check the network URLs and the topology.
    ///
    /// Empty network URLs are accepted and returned as-is by the store.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if a non-empty network URL is not an
    /// absolute URL, or [`ConfigError::DuplicateNode`] if a node is listed in
    /// two zones.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_url("networkUrl", &self.network_url)?;
        check_url("subnetworkUrl", &self.subnetwork_url)?;
        self.topology.validate()
    }
}

fn check_url(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Ok(());
    }
    Url::parse(value)
        .map(|_| ())
        .map_err(|e| ConfigError::InvalidUrl {
            field: field.to_string(),
            value: value.to_string(),
            reason: e.to_string(),
        })
}
