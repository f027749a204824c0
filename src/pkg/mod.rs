// Copyright 2024-2026 PkgRev-Hooks Contributors
// SPDX-License-Identifier: Apache-2.0

//! Package metadata as declared by a package's manifest.
//!
//! Hooks only look at which variant they were handed. The metadata content
//! is carried so the workload templates can read the controller override.

use serde::{Deserialize, Serialize};

/// Closed set of package kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PackageKind {
    Provider,
    Configuration,
}

impl PackageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageKind::Provider => "provider",
            PackageKind::Configuration => "configuration",
        }
    }
}

impl std::fmt::Display for PackageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PackageKind::Provider => write!(f, "Provider"),
            PackageKind::Configuration => write!(f, "Configuration"),
        }
    }
}

/// Runtime package object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Package {
    Provider(ProviderMeta),
    Configuration(ConfigurationMeta),
}

impl Package {
    pub fn kind(&self) -> PackageKind {
        match self {
            Package::Provider(_) => PackageKind::Provider,
            Package::Configuration(_) => PackageKind::Configuration,
        }
    }

    pub fn meta(&self) -> &MetaSpec {
        match self {
            Package::Provider(p) => &p.meta,
            Package::Configuration(c) => &c.meta,
        }
    }

    pub fn as_provider(&self) -> Option<&ProviderMeta> {
        match self {
            Package::Provider(p) => Some(p),
            Package::Configuration(_) => None,
        }
    }
}

/// Metadata shared by every package kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaSpec {
    /// Constraint on the control plane version this package supports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crossplane: Option<CrossplaneConstraints>,
    #[serde(default)]
    pub depends_on: Vec<Dependency>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossplaneConstraints {
    pub version: String,
}

/// A dependency on another package at a version constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dependency {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<String>,
    pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderMeta {
    #[serde(flatten)]
    pub meta: MetaSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller: Option<ControllerSpec>,
}

/// Overrides for the provider's controller container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ControllerSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationMeta {
    #[serde(flatten)]
    pub meta: MetaSpec,
}
