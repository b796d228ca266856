// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Error types for the fake NEG provider.
//!
//! This module provides specialized error types for:
//! - Network endpoint group store operations (missing and duplicate resources)
//! - Zone resolution for nodes
//! - Self link parsing
//! - Configuration loading
//! - Replay scripts applied against a store
//!
//! The store errors mirror what the real compute API reports, so controller
//! code written against the real provider can branch on them unchanged.

use thiserror::Error;

/// Errors returned by a [`NetworkEndpointGroupCloud`](crate::cloud::NetworkEndpointGroupCloud).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NegError {
    /// No resource exists at this identity (HTTP 404 from the compute API)
    ///
    /// Returned by get, delete and endpoint listing when the `(name, zone)` pair
    /// is unknown.
    #[error("{resource} '{name}' not found in zone '{zone}'")]
    NotFound {
        /// Kind of resource that was looked up
        resource: String,
        /// Resource name
        name: String,
        /// Zone the lookup was scoped to
        zone: String,
    },

    /// A network endpoint group with this name already exists in the zone (HTTP 409)
    #[error("networkEndpointGroup '{name}' already exists in zone '{zone}'")]
    AlreadyExists {
        /// Resource name
        name: String,
        /// Zone holding the existing resource
        zone: String,
    },
}

impl NegError {
    /// Returns true if this error means the resource does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns the HTTP status code the real compute API answers with for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::AlreadyExists { .. } => 409,
        }
    }
}

/// Errors returned by a [`ZoneGetter`](crate::zone::ZoneGetter).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ZoneError {
    /// The node is not a member of any known zone
    #[error("node '{node}' not found in any zone")]
    NodeNotFound {
        /// The node that was looked up
        node: String,
    },

    /// The zone listing could not be produced
    ///
    /// Never returned by the static resolver; real resolvers backed by a live
    /// cluster report lister failures through this variant.
    #[error("failed to list zones: {reason}")]
    Internal {
        /// Explanation of the failure
        reason: String,
    },
}

/// Errors raised while parsing a self link back into its parts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResourceIdError {
    /// The link is not a URL or does not follow the zonal NEG path layout
    #[error("invalid self link '{link}': {reason}")]
    InvalidSelfLink {
        /// The offending link
        link: String,
        /// Explanation of what is invalid
        reason: String,
    },
}

/// Errors raised while loading a [`FakeCloudConfig`](crate::config::FakeCloudConfig).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("failed to read config file '{path}': {reason}")]
    Read {
        /// Path that was read
        path: String,
        /// Underlying I/O error
        reason: String,
    },

    /// The configuration document is not valid YAML for the expected schema
    #[error("failed to parse config: {reason}")]
    Parse {
        /// Underlying deserialization error
        reason: String,
    },

    /// A network or subnetwork URL is not an absolute URL
    #[error("invalid {field} '{value}': {reason}")]
    InvalidUrl {
        /// Name of the configuration field
        field: String,
        /// The rejected value
        value: String,
        /// Explanation of what is invalid
        reason: String,
    },

    /// A node is listed under more than one zone
    #[error("node '{node}' is listed in both zone '{first_zone}' and zone '{second_zone}'")]
    DuplicateNode {
        /// The node listed twice
        node: String,
        /// Zone where the node was first seen
        first_zone: String,
        /// Zone where the node was seen again
        second_zone: String,
    },
}

/// Errors raised by [`replay`](crate::replay) while loading or applying a script.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplayError {
    /// The script document could not be parsed
    #[error("failed to parse replay script: {reason}")]
    Parse {
        /// Underlying deserialization error
        reason: String,
    },

    /// An operation in the script was rejected by the store
    #[error("operation #{index} ({operation}) failed: {source}")]
    OperationFailed {
        /// Zero-based position of the operation in the script
        index: usize,
        /// Operation kind (`create`, `delete`, `attach`, `detach`)
        operation: String,
        /// Error returned by the store
        source: NegError,
    },
}
