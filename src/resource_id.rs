// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Self link construction and parsing for zonal network endpoint groups.
//!
//! A self link is a pure function of project, zone, name and API version:
//!
//! ```text
//! https://www.googleapis.com/compute/<version>/projects/<project>/zones/<zone>/networkEndpointGroups/<name>
//! ```
//!
//! # Example
//!
//! ```rust
//! use negfake::resource_id::ResourceId;
//! use negfake::types::ApiVersion;
//!
//! let id = ResourceId::new("mock-project", "zone1", "neg-a");
//! assert_eq!(
//!     id.self_link(ApiVersion::Alpha),
//!     "https://www.googleapis.com/compute/alpha/projects/mock-project/zones/zone1/networkEndpointGroups/neg-a"
//! );
//! ```

use crate::constants::{COMPUTE_API_BASE_URL, NEG_COLLECTION};
use crate::errors::ResourceIdError;
use crate::types::{ApiVersion, NegKey};
use url::Url;

/// Identity of a zonal network endpoint group inside a project.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceId {
    pub project: String,
    pub zone: String,
    pub name: String,
}

impl ResourceId {
    #[must_use]
    pub fn new(
        project: impl Into<String>,
        zone: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            project: project.into(),
            zone: zone.into(),
            name: name.into(),
        }
    }

    /// Path of the resource relative to the API version root.
    #[must_use]
    pub fn relative_resource_name(&self) -> String {
        format!(
            "projects/{}/zones/{}/{}/{}",
            self.project, self.zone, NEG_COLLECTION, self.name
        )
    }

    /// Full resource URL for the given API version.
    #[must_use]
    pub fn self_link(&self, version: ApiVersion) -> String {
        format!(
            "{}/{}/{}",
            COMPUTE_API_BASE_URL,
            version.as_str(),
            self.relative_resource_name()
        )
    }

    /// Aggregated-list key for this resource.
    #[must_use]
    pub fn key(&self) -> NegKey {
        NegKey::new(self.name.clone(), self.zone.clone())
    }

    /// Parse a self link back into its API version and resource identity.
    ///
    /// Only the path is inspected, so links minted against a different API host
    /// still parse as long as they follow the zonal layout.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceIdError::InvalidSelfLink`] if `link` is not an absolute
    /// URL or its path is not `.../<version>/projects/<p>/zones/<z>/networkEndpointGroups/<n>`.
    pub fn parse_self_link(link: &str) -> Result<(ApiVersion, Self), ResourceIdError> {
        let invalid = |reason: &str| ResourceIdError::InvalidSelfLink {
            link: link.to_string(),
            reason: reason.to_string(),
        };

        let url = Url::parse(link).map_err(|e| invalid(&e.to_string()))?;
        let segments: Vec<&str> = url
            .path_segments()
            .ok_or_else(|| invalid("URL has no path"))?
            .filter(|s| !s.is_empty())
            .collect();

        // Anything before the version segment is the API prefix (e.g. "compute").
        let Some(tail) = segments.len().checked_sub(7).map(|start| &segments[start..]) else {
            return Err(invalid("path is too short for a zonal resource"));
        };

        match tail {
            [version, "projects", project, "zones", zone, collection, name]
                if *collection == NEG_COLLECTION =>
            {
                let version = ApiVersion::from_path_segment(version)
                    .ok_or_else(|| invalid(&format!("unknown API version '{version}'")))?;
                Ok((version, Self::new(*project, *zone, *name)))
            }
            _ => Err(invalid("path does not name a zonal networkEndpointGroup")),
        }
    }
}
