// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Well-known Kubernetes node labels used to derive zone membership.

// ============================================================================
// Kubernetes Topology Labels
// https://kubernetes.io/docs/reference/labels-annotations-taints/
// ============================================================================

/// Standard label carrying the zone a node runs in
pub const TOPOLOGY_ZONE: &str = "topology.kubernetes.io/zone";

/// Deprecated zone label still set by older cloud providers
pub const LEGACY_FAILURE_DOMAIN_ZONE: &str = "failure-domain.beta.kubernetes.io/zone";

/// Zone labels in lookup order; the first one present on a node wins
pub const ZONE_LABELS: &[&str] = &[TOPOLOGY_ZONE, LEGACY_FAILURE_DOMAIN_ZONE];
