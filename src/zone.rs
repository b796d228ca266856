// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Node to zone resolution.
//!
//! Controllers ask a [`ZoneGetter`] which zones exist and which zone a node
//! lives in before deciding where network endpoint groups must be created.
//! [`FakeZoneGetter`] answers from a static [`ZoneTopology`] handed in at
//! construction, so each test can describe its own cluster layout.
//!
//! # Example
//!
//! ```rust
//! use negfake::zone::{FakeZoneGetter, ZoneGetter, ZoneTopology};
//!
//! let topology = ZoneTopology::new()
//!     .with_node("us-central1-a", "node-1")
//!     .with_node("us-central1-b", "node-2");
//! let zones = FakeZoneGetter::new(topology);
//!
//! assert_eq!(zones.zone_for_node("node-2").unwrap(), "us-central1-b");
//! assert!(zones.zone_for_node("node-3").is_err());
//! ```

use crate::constants::{TEST_ZONE_1, TEST_ZONE_1_INSTANCES, TEST_ZONE_2, TEST_ZONE_2_INSTANCES};
use crate::errors::{ConfigError, ZoneError};
use crate::labels::ZONE_LABELS;
use k8s_openapi::api::core::v1::Node;
use kube::ResourceExt;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

/// Answers zone-membership queries for nodes.
pub trait ZoneGetter: Send + Sync {
    /// Returns every known zone. Callers must treat the result as a set.
    ///
    /// # Errors
    ///
    /// Returns [`ZoneError::Internal`] if the zones cannot be listed.
    fn list_zones(&self) -> Result<Vec<String>, ZoneError>;

    /// Returns the zone `node` belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`ZoneError::NodeNotFound`] if no zone contains the node.
    fn zone_for_node(&self, node: &str) -> Result<String, ZoneError>;
}

/// Static zone → nodes membership table.
///
/// Serializes as a plain mapping so it can be embedded in configuration files:
///
/// ```yaml
/// zone1: [instance1, instance2]
/// zone2: [instance3]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneTopology {
    zones: BTreeMap<String, BTreeSet<String>>,
}

impl ZoneTopology {
    /// Creates an empty topology.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The two-zone layout most controller tests are written against:
    /// `zone1` holds `instance1..=2`, `zone2` holds `instance3..=6`.
    #[must_use]
    pub fn test_default() -> Self {
        let mut topology = Self::new();
        for node in TEST_ZONE_1_INSTANCES {
            topology = topology.with_node(TEST_ZONE_1, *node);
        }
        for node in TEST_ZONE_2_INSTANCES {
            topology = topology.with_node(TEST_ZONE_2, *node);
        }
        topology
    }

    /// Adds `node` to `zone`, creating the zone if needed.
    #[must_use]
    pub fn with_node(mut self, zone: impl Into<String>, node: impl Into<String>) -> Self {
        self.zones.entry(zone.into()).or_default().insert(node.into());
        self
    }

    /// Adds a zone without any nodes.
    #[must_use]
    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.zones.entry(zone.into()).or_default();
        self
    }

    /// Builds the table from Kubernetes `Node` objects.
    ///
    /// The zone is read from `topology.kubernetes.io/zone`, falling back to the
    /// legacy failure-domain label. Nodes carrying neither label are skipped.
    #[must_use]
    pub fn from_nodes(nodes: &[Node]) -> Self {
        let mut topology = Self::new();
        for node in nodes {
            let name = node.name_any();
            let labels = node.labels();
            match ZONE_LABELS.iter().find_map(|label| labels.get(*label)) {
                Some(zone) => {
                    debug!(node = %name, zone = %zone, "Adding node to zone");
                    topology = topology.with_node(zone.clone(), name);
                }
                None => debug!(node = %name, "Skipping node without a zone label"),
            }
        }
        topology
    }

    /// Iterates zones and their member nodes in zone order.
    pub fn zones(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.zones.iter().map(|(zone, nodes)| (zone.as_str(), nodes))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Checks that every node belongs to exactly one zone.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateNode`] for the first node found in two zones.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen: HashMap<&str, &str> = HashMap::new();
        for (zone, nodes) in &self.zones {
            for node in nodes {
                if let Some(first_zone) = seen.insert(node.as_str(), zone.as_str()) {
                    return Err(ConfigError::DuplicateNode {
                        node: node.clone(),
                        first_zone: first_zone.to_string(),
                        second_zone: zone.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// [`ZoneGetter`] backed by an immutable [`ZoneTopology`].
///
/// Nothing mutates the table after construction, so no locking is needed.
#[derive(Debug, Clone)]
pub struct FakeZoneGetter {
    topology: ZoneTopology,
}

impl FakeZoneGetter {
    /// Creates a resolver over a fixed topology.
    #[must_use]
    pub fn new(topology: ZoneTopology) -> Self {
        Self { topology }
    }

    #[must_use]
    pub fn topology(&self) -> &ZoneTopology {
        &self.topology
    }
}

impl Default for FakeZoneGetter {
    fn default() -> Self {
        Self::new(ZoneTopology::test_default())
    }
}

impl ZoneGetter for FakeZoneGetter {
    fn list_zones(&self) -> Result<Vec<String>, ZoneError> {
        Ok(self.topology.zones.keys().cloned().collect())
    }

    fn zone_for_node(&self, node: &str) -> Result<String, ZoneError> {
        self.topology
            .zones()
            .find(|(_, nodes)| nodes.contains(node))
            .map(|(zone, _)| zone.to_string())
            .ok_or_else(|| ZoneError::NodeNotFound {
                node: node.to_string(),
            })
    }
}
