// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! # negfake - In-memory zoned Network Endpoint Group provider
//!
//! Controllers that manage Network Endpoint Groups (NEGs) talk to the cloud
//! through two narrow capabilities: a zone resolver and a NEG store. This crate
//! provides both as in-memory fakes that keep the observable contract of the
//! real provider, so controller logic can be tested without a live API.
//!
//! ## Overview
//!
//! - Groups are partitioned by zone and unique by name within a zone
//! - Creation mints a deterministic self link on the caller's value
//! - Missing resources surface as `NotFound`, like the compute API's 404
//! - Endpoint attach and detach follow value-equality set semantics
//! - All store state sits behind one lock, so the fake is safe to share
//!   between threads
//!
//! ## Modules
//!
//! - [`cloud`] - NEG store trait and its in-memory fake
//! - [`zone`] - Zone resolver trait, static topology and its fake
//! - [`types`] - NEG, endpoint and key types
//! - [`resource_id`] - Self link construction and parsing
//! - [`config`] - YAML configuration for the fakes
//! - [`replay`] - Scripts of store operations for fixtures
//! - [`metrics`] - Prometheus counters for store calls
//! - [`errors`] - Error types
//!
//! ## Example
//!
//! ```rust
//! use negfake::cloud::{FakeNetworkEndpointGroupCloud, NetworkEndpointGroupCloud};
//! use negfake::types::{ApiVersion, NetworkEndpointGroup};
//! use negfake::zone::{FakeZoneGetter, ZoneGetter};
//! use std::sync::Arc;
//!
//! let zones = FakeZoneGetter::default();
//! let cloud: Arc<dyn NetworkEndpointGroupCloud> =
//!     Arc::new(FakeNetworkEndpointGroupCloud::default());
//!
//! let zone = zones.zone_for_node("instance3").unwrap();
//! let mut neg = NetworkEndpointGroup::new("k8s1-web-80");
//! cloud.create_network_endpoint_group(&mut neg, &zone).unwrap();
//!
//! assert!(cloud
//!     .get_network_endpoint_group("k8s1-web-80", "zone2", ApiVersion::Ga)
//!     .is_ok());
//! ```

pub mod cloud;
pub mod config;
pub mod constants;
pub mod errors;
pub mod labels;
pub mod metrics;
pub mod replay;
pub mod resource_id;
pub mod types;
pub mod zone;

pub use cloud::{FakeNetworkEndpointGroupCloud, NetworkEndpointGroupCloud};
pub use errors::{NegError, ZoneError};
pub use zone::{FakeZoneGetter, ZoneGetter, ZoneTopology};

#[cfg(test)]
mod config_tests;
