// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Replay scripts of store operations.
//!
//! A script is a YAML (or JSON) list of operations tagged by `op`. Scripts let
//! test fixtures describe the cloud state a controller should start from
//! without writing the calls by hand:
//!
//! ```yaml
//! - op: create
//!   name: neg-a
//!   zone: zone1
//! - op: attach
//!   name: neg-a
//!   zone: zone1
//!   endpoints:
//!     - ipAddress: 10.0.0.1
//!       port: 80
//!       instance: instance1
//! ```
//!
//! Operations go through the [`NetworkEndpointGroupCloud`] trait, so a script
//! can be replayed against any implementation.

use crate::cloud::NetworkEndpointGroupCloud;
use crate::errors::{NegError, ReplayError};
use crate::types::{ApiVersion, NetworkEndpoint, NetworkEndpointGroup};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// One step of a replay script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Operation {
    /// Create a group
    #[serde(rename_all = "camelCase")]
    Create {
        name: String,
        zone: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default_port: Option<i64>,
    },

    /// Delete a group and its endpoints
    Delete { name: String, zone: String },

    /// Attach endpoints to a group
    Attach {
        name: String,
        zone: String,
        endpoints: Vec<NetworkEndpoint>,
    },

    /// Detach endpoints from a group
    Detach {
        name: String,
        zone: String,
        endpoints: Vec<NetworkEndpoint>,
    },
}

impl Operation {
    /// Tag of this operation as written in scripts.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Create { .. } => "create",
            Self::Delete { .. } => "delete",
            Self::Attach { .. } => "attach",
            Self::Detach { .. } => "detach",
        }
    }

    fn run(&self, cloud: &dyn NetworkEndpointGroupCloud) -> Result<(), NegError> {
        match self {
            Self::Create {
                name,
                zone,
                description,
                default_port,
            } => {
                let mut neg = NetworkEndpointGroup::new(name.as_str());
                neg.description.clone_from(description);
                neg.default_port = *default_port;
                cloud.create_network_endpoint_group(&mut neg, zone)
            }
            Self::Delete { name, zone } => {
                cloud.delete_network_endpoint_group(name, zone, ApiVersion::Ga)
            }
            Self::Attach {
                name,
                zone,
                endpoints,
            } => cloud.attach_network_endpoints(name, zone, endpoints, ApiVersion::Ga),
            Self::Detach {
                name,
                zone,
                endpoints,
            } => cloud.detach_network_endpoints(name, zone, endpoints, ApiVersion::Ga),
        }
    }
}

/// Parse a replay script.
///
/// # Errors
///
/// Returns [`ReplayError::Parse`] if the document is not a list of operations.
pub fn parse_script(document: &str) -> Result<Vec<Operation>, ReplayError> {
    serde_yaml::from_str(document).map_err(|e| ReplayError::Parse {
        reason: e.to_string(),
    })
}

/// Apply `operations` to `cloud` in order, stopping at the first failure.
///
/// Returns the number of operations applied.
///
/// # Errors
///
/// Returns [`ReplayError::OperationFailed`] with the index of the first
/// operation the store rejected. Earlier operations stay applied.
pub fn apply(
    cloud: &dyn NetworkEndpointGroupCloud,
    operations: &[Operation],
) -> Result<usize, ReplayError> {
    for (index, operation) in operations.iter().enumerate() {
        debug!(index, operation = operation.kind(), "Applying replay operation");
        operation
            .run(cloud)
            .map_err(|source| ReplayError::OperationFailed {
                index,
                operation: operation.kind().to_string(),
                source,
            })?;
    }

    info!(count = operations.len(), "Replay script applied");
    Ok(operations.len())
}
