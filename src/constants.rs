// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Global constants for the fake NEG provider.
//!
//! This module contains all string constants used throughout the codebase.
//! Constants are organized by category for easy maintenance.

// ============================================================================
// Compute API Constants
// ============================================================================

/// Base URL of the compute API that self links are rooted at
pub const COMPUTE_API_BASE_URL: &str = "https://www.googleapis.com/compute";

/// Project that every fake resource is minted under unless configured otherwise
pub const DEFAULT_PROJECT: &str = "mock-project";

/// Collection name for network endpoint groups in a resource path
pub const NEG_COLLECTION: &str = "networkEndpointGroups";

/// Resource type label used in errors and metrics for network endpoint groups
pub const RESOURCE_NETWORK_ENDPOINT_GROUP: &str = "networkEndpointGroup";

/// Resource type label used in errors for endpoint collections
pub const RESOURCE_NETWORK_ENDPOINTS: &str = "networkEndpoints";

/// Default endpoint type for zonal NEGs
pub const DEFAULT_NETWORK_ENDPOINT_TYPE: &str = "GCE_VM_IP_PORT";

/// Default network URL returned by a fake built without configuration
pub const DEFAULT_NETWORK_URL: &str =
    "https://www.googleapis.com/compute/v1/projects/mock-project/global/networks/default";

/// Default subnetwork URL returned by a fake built without configuration
pub const DEFAULT_SUBNETWORK_URL: &str =
    "https://www.googleapis.com/compute/v1/projects/mock-project/regions/us-central1/subnetworks/default";

// ============================================================================
// Test Topology Constants
// ============================================================================

/// First zone of the default test topology
pub const TEST_ZONE_1: &str = "zone1";

/// Second zone of the default test topology
pub const TEST_ZONE_2: &str = "zone2";

/// Nodes placed in [`TEST_ZONE_1`] by the default test topology
pub const TEST_ZONE_1_INSTANCES: &[&str] = &["instance1", "instance2"];

/// Nodes placed in [`TEST_ZONE_2`] by the default test topology
pub const TEST_ZONE_2_INSTANCES: &[&str] = &["instance3", "instance4", "instance5", "instance6"];

// ============================================================================
// Logging Constants
// ============================================================================

/// Log filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info";

// ============================================================================
// Metrics Constants
// ============================================================================

/// Namespace prefix for all metrics (prometheus-safe)
pub const METRICS_NAMESPACE: &str = "negfake";

/// Metric label value for an operation that succeeded
pub const RESULT_SUCCESS: &str = "success";

/// Metric label value for an operation that returned an error
pub const RESULT_ERROR: &str = "error";
