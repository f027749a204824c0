// Copyright 2024-2026 PkgRev-Hooks Contributors
// SPDX-License-Identifier: Apache-2.0

//! Package revision objects.
//!
//! Revisions are created, persisted and status-updated by the outer
//! reconciler. Hooks only ever borrow them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::k8s::OwnerReference;
use crate::pkg::PackageKind;

/// API group/version of revision objects.
pub const REVISION_API_VERSION: &str = "pkg.crossplane.io/v1beta1";

/// Whether a revision's workload should be running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DesiredState {
    Active,
    Inactive,
}

impl std::fmt::Display for DesiredState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DesiredState::Active => write!(f, "Active"),
            DesiredState::Inactive => write!(f, "Inactive"),
        }
    }
}

/// A specific installed version of a package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageRevision {
    pub kind: PackageKind,
    pub metadata: RevisionMeta,
    pub spec: PackageRevisionSpec,
    #[serde(default)]
    pub status: PackageRevisionStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevisionMeta {
    pub name: String,
    pub uid: Uuid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageRevisionSpec {
    pub desired_state: DesiredState,
    /// Image the package was installed from.
    pub package: String,
    pub revision: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageRevisionStatus {
    #[serde(default)]
    pub conditions: Vec<RevisionCondition>,
}

/// Status condition maintained by the outer reconciler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionCondition {
    #[serde(rename = "type")]
    pub condition_type: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl PackageRevision {
    pub fn new(kind: PackageKind, name: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            kind,
            metadata: RevisionMeta {
                name: name.into(),
                uid: Uuid::new_v4(),
            },
            spec: PackageRevisionSpec {
                desired_state: DesiredState::Inactive,
                package: package.into(),
                revision: 1,
            },
            status: PackageRevisionStatus::default(),
        }
    }

    pub fn with_desired_state(mut self, state: DesiredState) -> Self {
        self.spec.desired_state = state;
        self
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn desired_state(&self) -> DesiredState {
        self.spec.desired_state
    }

    pub fn is_active(&self) -> bool {
        self.spec.desired_state == DesiredState::Active
    }

    /// Object kind as stored, e.g. `ProviderRevision`.
    pub fn object_kind(&self) -> String {
        format!("{}Revision", self.kind)
    }

    /// Controller reference making this revision the exclusive owner.
    pub fn controller_reference(&self) -> OwnerReference {
        OwnerReference {
            api_version: REVISION_API_VERSION.to_string(),
            kind: self.object_kind(),
            name: self.metadata.name.clone(),
            uid: self.metadata.uid,
            controller: true,
            block_owner_deletion: true,
        }
    }
}
