// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Network endpoint group store.
//!
//! [`NetworkEndpointGroupCloud`] is the full surface a controller may call on
//! the cloud provider for NEGs. Production code holds it as
//! `Arc<dyn NetworkEndpointGroupCloud>`, so tests can swap in
//! [`FakeNetworkEndpointGroupCloud`] without touching call sites.
//!
//! # Semantics of the fake
//!
//! - Groups are partitioned by zone; a name is unique within its zone only.
//! - `create` mints the self link, zone and default endpoint type on the
//!   caller's value and stores a copy. Reads report `size` from the endpoint
//!   collection.
//!   Creating an existing `(name, zone)` fails with [`NegError::AlreadyExists`].
//! - `delete` removes the group and its endpoints in one step. A miss still
//!   drops any endpoint collection filed under the key.
//! - `attach` appends and creates the endpoint collection if it is missing.
//! - `detach` removes every stored endpoint equal to any requested endpoint;
//!   requested endpoints that are not stored are ignored.
//! - `list_network_endpoints` fails only when no collection exists; a group
//!   with no endpoints lists as empty.
//!
//! # Concurrency
//!
//! One mutex guards all state. Every call holds it for its whole duration and
//! performs no I/O while holding it.
//!
//! # Example
//!
//! ```rust
//! use negfake::cloud::{FakeNetworkEndpointGroupCloud, NetworkEndpointGroupCloud};
//! use negfake::types::{ApiVersion, NetworkEndpoint, NetworkEndpointGroup};
//!
//! let cloud = FakeNetworkEndpointGroupCloud::default();
//! let mut neg = NetworkEndpointGroup::new("neg-a");
//! cloud.create_network_endpoint_group(&mut neg, "zone1").unwrap();
//! assert!(neg.self_link.ends_with("/zones/zone1/networkEndpointGroups/neg-a"));
//!
//! let ep = NetworkEndpoint::new("10.0.0.1", 80, "instance1");
//! cloud
//!     .attach_network_endpoints("neg-a", "zone1", &[ep], ApiVersion::Ga)
//!     .unwrap();
//! let listed = cloud
//!     .list_network_endpoints("neg-a", "zone1", false, ApiVersion::Ga)
//!     .unwrap();
//! assert_eq!(listed.len(), 1);
//! ```

use crate::config::FakeCloudConfig;
use crate::constants::{
    DEFAULT_NETWORK_ENDPOINT_TYPE, DEFAULT_PROJECT, RESOURCE_NETWORK_ENDPOINTS,
    RESOURCE_NETWORK_ENDPOINT_GROUP,
};
use crate::errors::NegError;
use crate::metrics;
use crate::resource_id::ResourceId;
use crate::types::{
    ApiVersion, NegKey, NetworkEndpoint, NetworkEndpointGroup, NetworkEndpointWithHealthStatus,
};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// API version every self link is minted with, regardless of the call's version.
const SELF_LINK_VERSION: ApiVersion = ApiVersion::Alpha;

/// Cloud provider operations on zonal network endpoint groups.
pub trait NetworkEndpointGroupCloud: Send + Sync {
    /// Fetch the group `name` in `zone`.
    ///
    /// # Errors
    ///
    /// Returns [`NegError::NotFound`] if the zone holds no group with that name.
    fn get_network_endpoint_group(
        &self,
        name: &str,
        zone: &str,
        version: ApiVersion,
    ) -> Result<NetworkEndpointGroup, NegError>;

    /// List the groups in `zone`. An unknown zone lists as empty.
    ///
    /// # Errors
    ///
    /// Never fails in the fake.
    fn list_network_endpoint_groups(
        &self,
        zone: &str,
        version: ApiVersion,
    ) -> Result<Vec<NetworkEndpointGroup>, NegError>;

    /// List the groups in every zone, keyed by zone and name.
    ///
    /// # Errors
    ///
    /// Never fails in the fake.
    fn aggregated_list_network_endpoint_groups(
        &self,
        version: ApiVersion,
    ) -> Result<BTreeMap<NegKey, NetworkEndpointGroup>, NegError>;

    /// Create `neg` in `zone`, writing the assigned self link into `neg`.
    ///
    /// # Errors
    ///
    /// Returns [`NegError::AlreadyExists`] if the zone already holds a group with
    /// the same name. Neither the store nor `neg` is changed in that case.
    fn create_network_endpoint_group(
        &self,
        neg: &mut NetworkEndpointGroup,
        zone: &str,
    ) -> Result<(), NegError>;

    /// Delete the group `name` in `zone` together with its endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`NegError::NotFound`] if the zone holds no group with that name.
    fn delete_network_endpoint_group(
        &self,
        name: &str,
        zone: &str,
        version: ApiVersion,
    ) -> Result<(), NegError>;

    /// Append `endpoints` to the group's endpoint collection.
    ///
    /// # Errors
    ///
    /// Never fails in the fake.
    fn attach_network_endpoints(
        &self,
        name: &str,
        zone: &str,
        endpoints: &[NetworkEndpoint],
        version: ApiVersion,
    ) -> Result<(), NegError>;

    /// Remove every stored endpoint equal to one of `endpoints`.
    ///
    /// # Errors
    ///
    /// Never fails in the fake.
    fn detach_network_endpoints(
        &self,
        name: &str,
        zone: &str,
        endpoints: &[NetworkEndpoint],
        version: ApiVersion,
    ) -> Result<(), NegError>;

    /// List the group's endpoints in attach order.
    ///
    /// # Errors
    ///
    /// Returns [`NegError::NotFound`] if no endpoint collection exists for
    /// `(name, zone)`.
    fn list_network_endpoints(
        &self,
        name: &str,
        zone: &str,
        show_health_status: bool,
        version: ApiVersion,
    ) -> Result<Vec<NetworkEndpointWithHealthStatus>, NegError>;

    /// URL of the network endpoints are created in.
    fn network_url(&self) -> String;

    /// URL of the subnetwork endpoints are created in.
    fn subnetwork_url(&self) -> String;
}

/// Everything the fake holds, guarded by one lock.
#[derive(Debug, Default)]
struct State {
    /// zone → groups in creation order
    groups: BTreeMap<String, Vec<NetworkEndpointGroup>>,
    /// (name, zone) → endpoints in attach order
    endpoints: BTreeMap<NegKey, Vec<NetworkEndpoint>>,
}

impl State {
    fn find_group(&self, name: &str, zone: &str) -> Option<&NetworkEndpointGroup> {
        self.groups
            .get(zone)
            .and_then(|groups| groups.iter().find(|neg| neg.name == name))
    }

    /// Copy of a stored group with `size` taken from its endpoint collection.
    fn sized(&self, zone: &str, neg: &NetworkEndpointGroup) -> NetworkEndpointGroup {
        let count = self
            .endpoints
            .get(&NegKey::new(neg.name.as_str(), zone))
            .map_or(0, Vec::len);
        let mut out = neg.clone();
        out.size = Some(i64::try_from(count).unwrap_or(i64::MAX));
        out
    }
}

/// In-memory [`NetworkEndpointGroupCloud`] for tests.
#[derive(Debug)]
pub struct FakeNetworkEndpointGroupCloud {
    project: String,
    network_url: String,
    subnetwork_url: String,
    state: Mutex<State>,
}

impl FakeNetworkEndpointGroupCloud {
    /// Creates an empty fake in the default project.
    #[must_use]
    pub fn new(network_url: impl Into<String>, subnetwork_url: impl Into<String>) -> Self {
        Self {
            project: DEFAULT_PROJECT.to_string(),
            network_url: network_url.into(),
            subnetwork_url: subnetwork_url.into(),
            state: Mutex::new(State::default()),
        }
    }

    /// Creates an empty fake from a configuration.
    #[must_use]
    pub fn from_config(config: &FakeCloudConfig) -> Self {
        Self::new(config.network_url.clone(), config.subnetwork_url.clone())
            .with_project(config.project.clone())
    }

    /// Sets the project encoded into self links.
    #[must_use]
    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = project.into();
        self
    }

    /// Project encoded into self links.
    #[must_use]
    pub fn project(&self) -> &str {
        &self.project
    }

    /// Number of endpoints stored for `(name, zone)`, or `None` if no
    /// collection exists.
    #[must_use]
    pub fn endpoint_count(&self, name: &str, zone: &str) -> Option<usize> {
        self.state
            .lock()
            .endpoints
            .get(&NegKey::new(name, zone))
            .map(Vec::len)
    }

    /// Serializable copy of the whole store, taken under the lock.
    #[must_use]
    pub fn snapshot(&self) -> CloudSnapshot {
        let guard = self.state.lock();
        let state = &*guard;
        CloudSnapshot {
            groups: state
                .groups
                .iter()
                .flat_map(|(zone, groups)| {
                    groups.iter().map(move |neg| ZonedGroup {
                        zone: zone.clone(),
                        group: state.sized(zone, neg),
                    })
                })
                .collect(),
            endpoints: state
                .endpoints
                .iter()
                .map(|(key, endpoints)| (key.to_string(), endpoints.clone()))
                .collect(),
        }
    }
}

impl Default for FakeNetworkEndpointGroupCloud {
    fn default() -> Self {
        Self::from_config(&FakeCloudConfig::default())
    }
}

/// Record the outcome of `operation` and hand the result back unchanged.
fn observe<T>(operation: &str, result: Result<T, NegError>) -> Result<T, NegError> {
    metrics::record_operation(operation, result.is_ok());
    if let Err(e) = &result {
        debug!(operation, error = %e, "Operation failed");
    }
    result
}

fn group_not_found(name: &str, zone: &str) -> NegError {
    NegError::NotFound {
        resource: RESOURCE_NETWORK_ENDPOINT_GROUP.to_string(),
        name: name.to_string(),
        zone: zone.to_string(),
    }
}

impl NetworkEndpointGroupCloud for FakeNetworkEndpointGroupCloud {
    fn get_network_endpoint_group(
        &self,
        name: &str,
        zone: &str,
        _version: ApiVersion,
    ) -> Result<NetworkEndpointGroup, NegError> {
        let result = {
            let state = self.state.lock();
            state
                .find_group(name, zone)
                .map(|neg| state.sized(zone, neg))
                .ok_or_else(|| group_not_found(name, zone))
        };
        trace!(name, zone, found = result.is_ok(), "Get network endpoint group");
        observe("get", result)
    }

    fn list_network_endpoint_groups(
        &self,
        zone: &str,
        _version: ApiVersion,
    ) -> Result<Vec<NetworkEndpointGroup>, NegError> {
        let groups: Vec<NetworkEndpointGroup> = {
            let state = self.state.lock();
            state
                .groups
                .get(zone)
                .map(|groups| groups.iter().map(|neg| state.sized(zone, neg)).collect())
                .unwrap_or_default()
        };
        trace!(zone, count = groups.len(), "List network endpoint groups");
        observe("list", Ok(groups))
    }

    fn aggregated_list_network_endpoint_groups(
        &self,
        _version: ApiVersion,
    ) -> Result<BTreeMap<NegKey, NetworkEndpointGroup>, NegError> {
        let all: BTreeMap<NegKey, NetworkEndpointGroup> = {
            let guard = self.state.lock();
            let state = &*guard;
            state
                .groups
                .iter()
                .flat_map(|(zone, groups)| {
                    groups.iter().map(move |neg| {
                        (
                            NegKey::new(neg.name.clone(), zone.clone()),
                            state.sized(zone, neg),
                        )
                    })
                })
                .collect()
        };
        trace!(count = all.len(), "Aggregated list network endpoint groups");
        observe("aggregated_list", Ok(all))
    }

    fn create_network_endpoint_group(
        &self,
        neg: &mut NetworkEndpointGroup,
        zone: &str,
    ) -> Result<(), NegError> {
        let result = {
            let mut state = self.state.lock();
            if state.find_group(&neg.name, zone).is_some() {
                Err(NegError::AlreadyExists {
                    name: neg.name.clone(),
                    zone: zone.to_string(),
                })
            } else {
                neg.self_link = ResourceId::new(self.project.as_str(), zone, neg.name.as_str())
                    .self_link(SELF_LINK_VERSION);
                neg.zone = Some(zone.to_string());
                if neg.network_endpoint_type.is_none() {
                    neg.network_endpoint_type = Some(DEFAULT_NETWORK_ENDPOINT_TYPE.to_string());
                }
                neg.size = Some(0);
                state
                    .groups
                    .entry(zone.to_string())
                    .or_default()
                    .push(neg.clone());
                // Replaces any collection attach created ahead of the group.
                state
                    .endpoints
                    .insert(NegKey::new(neg.name.clone(), zone), Vec::new());
                Ok(())
            }
        };

        if result.is_ok() {
            metrics::record_neg_created();
            debug!(name = %neg.name, zone, self_link = %neg.self_link, "Created network endpoint group");
        }
        observe("create", result)
    }

    fn delete_network_endpoint_group(
        &self,
        name: &str,
        zone: &str,
        _version: ApiVersion,
    ) -> Result<(), NegError> {
        let result = {
            let mut guard = self.state.lock();
            let state = &mut *guard;
            let zone_emptied = state.groups.get_mut(zone).and_then(|groups| {
                let index = groups.iter().position(|neg| neg.name == name)?;
                groups.remove(index);
                Some(groups.is_empty())
            });

            // Endpoints go with the key even when no group matches.
            state.endpoints.remove(&NegKey::new(name, zone));

            match zone_emptied {
                Some(emptied) => {
                    if emptied {
                        state.groups.remove(zone);
                    }
                    Ok(())
                }
                None => Err(group_not_found(name, zone)),
            }
        };

        if result.is_ok() {
            metrics::record_neg_deleted();
            debug!(name, zone, "Deleted network endpoint group");
        }
        observe("delete", result)
    }

    fn attach_network_endpoints(
        &self,
        name: &str,
        zone: &str,
        endpoints: &[NetworkEndpoint],
        _version: ApiVersion,
    ) -> Result<(), NegError> {
        {
            let mut state = self.state.lock();
            state
                .endpoints
                .entry(NegKey::new(name, zone))
                .or_default()
                .extend_from_slice(endpoints);
        }

        metrics::record_endpoint_changes("attach", endpoints.len());
        debug!(name, zone, count = endpoints.len(), "Attached network endpoints");
        observe("attach", Ok(()))
    }

    fn detach_network_endpoints(
        &self,
        name: &str,
        zone: &str,
        endpoints: &[NetworkEndpoint],
        _version: ApiVersion,
    ) -> Result<(), NegError> {
        let removed = {
            let mut state = self.state.lock();
            match state.endpoints.get_mut(&NegKey::new(name, zone)) {
                Some(stored) => {
                    let before = stored.len();
                    stored.retain(|ep| !endpoints.contains(ep));
                    before - stored.len()
                }
                None => 0,
            }
        };

        metrics::record_endpoint_changes("detach", removed);
        debug!(
            name,
            zone,
            requested = endpoints.len(),
            removed,
            "Detached network endpoints"
        );
        observe("detach", Ok(()))
    }

    fn list_network_endpoints(
        &self,
        name: &str,
        zone: &str,
        _show_health_status: bool,
        _version: ApiVersion,
    ) -> Result<Vec<NetworkEndpointWithHealthStatus>, NegError> {
        let result = {
            let state = self.state.lock();
            state
                .endpoints
                .get(&NegKey::new(name, zone))
                .map(|stored| {
                    stored
                        .iter()
                        .map(|ep| NetworkEndpointWithHealthStatus {
                            network_endpoint: ep.clone(),
                            healths: None,
                        })
                        .collect::<Vec<_>>()
                })
                .ok_or_else(|| NegError::NotFound {
                    resource: RESOURCE_NETWORK_ENDPOINTS.to_string(),
                    name: name.to_string(),
                    zone: zone.to_string(),
                })
        };
        trace!(name, zone, found = result.is_ok(), "List network endpoints");
        observe("list_endpoints", result)
    }

    fn network_url(&self) -> String {
        self.network_url.clone()
    }

    fn subnetwork_url(&self) -> String {
        self.subnetwork_url.clone()
    }
}

/// Point-in-time copy of a [`FakeNetworkEndpointGroupCloud`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudSnapshot {
    /// Every group, ordered by zone then creation
    pub groups: Vec<ZonedGroup>,
    /// Endpoint collections keyed by `zones/<zone>/networkEndpointGroups/<name>`
    pub endpoints: BTreeMap<String, Vec<NetworkEndpoint>>,
}

/// A group together with the zone it lives in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZonedGroup {
    pub zone: String,
    pub group: NetworkEndpointGroup,
}
