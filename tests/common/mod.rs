// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

// Common test utilities for integration tests

#![allow(dead_code)]

use negfake::cloud::{FakeNetworkEndpointGroupCloud, NetworkEndpointGroupCloud};
use negfake::types::{ApiVersion, NetworkEndpoint, NetworkEndpointGroup};
use std::sync::Arc;

/// Build a shared store the way controllers hold it
pub fn shared_cloud() -> Arc<dyn NetworkEndpointGroupCloud> {
    Arc::new(FakeNetworkEndpointGroupCloud::default())
}

/// Endpoint with a distinct address per index, placed on the given node
pub fn endpoint(index: usize, node: &str) -> NetworkEndpoint {
    NetworkEndpoint::new(
        format!("10.{}.{}.{}", (index >> 16) & 0xff, (index >> 8) & 0xff, index & 0xff),
        8080,
        node,
    )
}

/// Create a group and return it with its assigned self link
pub fn create_neg(cloud: &dyn NetworkEndpointGroupCloud, name: &str, zone: &str) -> NetworkEndpointGroup {
    let mut neg = NetworkEndpointGroup::new(name);
    cloud
        .create_network_endpoint_group(&mut neg, zone)
        .expect("create should succeed");
    neg
}

/// Stored endpoints for a group, without health
pub fn list_endpoints(
    cloud: &dyn NetworkEndpointGroupCloud,
    name: &str,
    zone: &str,
) -> Vec<NetworkEndpoint> {
    cloud
        .list_network_endpoints(name, zone, false, ApiVersion::Ga)
        .expect("endpoint collection should exist")
        .into_iter()
        .map(|ep| ep.network_endpoint)
        .collect()
}
