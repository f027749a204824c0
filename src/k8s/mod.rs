// Copyright 2024-2026 PkgRev-Hooks Contributors
// SPDX-License-Identifier: Apache-2.0

//! Orchestration platform object model.
//!
//! Defines the ServiceAccount and Deployment shapes a provider revision owns.

pub mod types;
pub mod validation;

pub use types::{
    ConditionStatus, Container, Deployment, DeploymentCondition, DeploymentConditionType,
    DeploymentSpec, DeploymentStatus, LabelSelector, ObjectMeta, OwnerReference, PodSpec,
    PodTemplateSpec, ServiceAccount,
};
pub use validation::ValidationError;
