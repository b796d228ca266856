// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Resource types shared by the NEG store and its callers.
//!
//! Field names serialize in camelCase so fixtures can be written in the same
//! shape the compute API returns.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Compute API version a call is made against.
///
/// Accepted on every store call for interface parity with the real provider.
/// The fake behaves identically for all versions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiVersion {
    /// Generally available API (`v1`)
    #[default]
    #[serde(rename = "v1")]
    Ga,
    /// Beta API
    Beta,
    /// Alpha API
    Alpha,
}

impl ApiVersion {
    /// Path segment used for this version in resource URLs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ga => "v1",
            Self::Beta => "beta",
            Self::Alpha => "alpha",
        }
    }

    /// Parses a URL path segment back into a version.
    #[must_use]
    pub fn from_path_segment(segment: &str) -> Option<Self> {
        match segment {
            "v1" => Some(Self::Ga),
            "beta" => Some(Self::Beta),
            "alpha" => Some(Self::Alpha),
            _ => None,
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A zonal network endpoint group.
///
/// Identified by `(name, zone)`. The store files it under its zone partition
/// and fills in `zone` when the group is created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkEndpointGroup {
    /// Resource name, unique within a zone
    pub name: String,

    /// Server-assigned resource URL, empty until the group is created
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub self_link: String,

    /// Free-form description set by the creator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Endpoint type, e.g. `GCE_VM_IP_PORT`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_endpoint_type: Option<String>,

    /// URL of the network the endpoints live in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,

    /// URL of the subnetwork the endpoints live in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnetwork: Option<String>,

    /// Port used for endpoints that do not carry one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_port: Option<i64>,

    /// Zone the group lives in, set by the store on create
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,

    /// Number of endpoints attached, reported on reads
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
}

impl NetworkEndpointGroup {
    /// Creates an uncreated group with only its name set.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// One backend target inside a network endpoint group.
///
/// Compared by full value: two endpoints are the same endpoint only when the
/// address, port and instance all match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkEndpoint {
    /// Endpoint IP address
    pub ip_address: String,

    /// Endpoint port; 0 means the group's default port
    #[serde(default)]
    pub port: i64,

    /// Name of the VM instance (node) hosting the endpoint
    #[serde(default)]
    pub instance: String,
}

impl NetworkEndpoint {
    /// Creates an endpoint from its address, port and hosting instance.
    #[must_use]
    pub fn new(ip_address: impl Into<String>, port: i64, instance: impl Into<String>) -> Self {
        Self {
            ip_address: ip_address.into(),
            port,
            instance: instance.into(),
        }
    }
}

/// Health of an endpoint as seen by one backend service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointHealth {
    /// Health state, e.g. `HEALTHY` or `UNHEALTHY`
    pub health_state: String,
}

/// An endpoint together with its health, as returned by endpoint listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkEndpointWithHealthStatus {
    pub network_endpoint: NetworkEndpoint,

    /// Health per backend service; the fake never reports health
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub healths: Option<Vec<EndpointHealth>>,
}

/// Key of one entry in an aggregated listing.
///
/// Carries both the zone and the name, so two groups never share a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NegKey {
    pub zone: String,
    pub name: String,
}

impl NegKey {
    /// Creates the key for `name` in `zone`.
    #[must_use]
    pub fn new(name: impl Into<String>, zone: impl Into<String>) -> Self {
        Self {
            zone: zone.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for NegKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "zones/{}/{}/{}",
            self.zone,
            crate::constants::NEG_COLLECTION,
            self.name
        )
    }
}
