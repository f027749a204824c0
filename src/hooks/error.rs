// Copyright 2024-2026 PkgRev-Hooks Contributors
// SPDX-License-Identifier: Apache-2.0

//! Hook failures and how the reconciler should treat them.

use thiserror::Error;

use crate::client::{ClientError, ResourceKind};
use crate::k8s::ValidationError;
use crate::pkg::PackageKind;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HookError {
    #[error("not a {} package", .expected.as_str())]
    KindMismatch {
        expected: PackageKind,
        actual: PackageKind,
    },
    #[error("invalid provider workload: {0}")]
    Template(#[from] ValidationError),
    #[error("failed to delete deployment: {0}")]
    DeleteDeployment(#[source] ClientError),
    #[error("failed to delete service account: {0}")]
    DeleteServiceAccount(#[source] ClientError),
    #[error("failed to apply service account: {0}")]
    ApplyServiceAccount(#[source] ClientError),
    #[error("failed to apply deployment: {0}")]
    ApplyDeployment(#[source] ClientError),
    #[error("deployment unavailable: {0}")]
    Unavailable(String),
}

/// Operation a provisioning or teardown step performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StepOp {
    Apply,
    Delete,
}

/// How the outer reconciler should react to a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Wiring error. Requeueing will not help.
    Fatal,
    /// A platform call failed. Requeue with backoff.
    Transient,
    /// Resources exist but the workload is not healthy yet. Requeue.
    Incomplete,
}

impl HookError {
    pub(crate) fn step_failed(op: StepOp, kind: ResourceKind, source: ClientError) -> Self {
        match (op, kind) {
            (StepOp::Apply, ResourceKind::ServiceAccount) => Self::ApplyServiceAccount(source),
            (StepOp::Apply, ResourceKind::Deployment) => Self::ApplyDeployment(source),
            (StepOp::Delete, ResourceKind::ServiceAccount) => Self::DeleteServiceAccount(source),
            (StepOp::Delete, ResourceKind::Deployment) => Self::DeleteDeployment(source),
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            Self::KindMismatch { .. } | Self::Template(_) => ErrorClass::Fatal,
            Self::DeleteDeployment(_)
            | Self::DeleteServiceAccount(_)
            | Self::ApplyServiceAccount(_)
            | Self::ApplyDeployment(_) => ErrorClass::Transient,
            Self::Unavailable(_) => ErrorClass::Incomplete,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.class() != ErrorClass::Fatal
    }

    /// Health message reported by the deployment, for operator diagnosis.
    pub fn health_message(&self) -> Option<&str> {
        match self {
            Self::Unavailable(msg) => Some(msg),
            _ => None,
        }
    }

    /// The platform error underneath a failed step.
    pub fn client_error(&self) -> Option<&ClientError> {
        match self {
            Self::DeleteDeployment(e)
            | Self::DeleteServiceAccount(e)
            | Self::ApplyServiceAccount(e)
            | Self::ApplyDeployment(e) => Some(e),
            _ => None,
        }
    }
}
