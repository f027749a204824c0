// Copyright 2024-2026 PkgRev-Hooks Contributors
// SPDX-License-Identifier: Apache-2.0

//! Resource management against the orchestration platform.
//!
//! `ResourceClient` is the seam the hooks talk through. Implementations own
//! transport, idempotency and cancellation handling.

mod memory;

pub use memory::InMemoryClient;

use async_trait::async_trait;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::k8s::{Deployment, ObjectMeta, ServiceAccount};

/// Kinds of object a provider revision owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    ServiceAccount,
    Deployment,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::ServiceAccount => write!(f, "service account"),
            ResourceKind::Deployment => write!(f, "deployment"),
        }
    }
}

/// An object the hooks apply or delete.
#[derive(Debug, Clone, PartialEq)]
pub enum ManagedResource {
    ServiceAccount(ServiceAccount),
    Deployment(Deployment),
}

impl ManagedResource {
    pub fn kind(&self) -> ResourceKind {
        match self {
            ManagedResource::ServiceAccount(_) => ResourceKind::ServiceAccount,
            ManagedResource::Deployment(_) => ResourceKind::Deployment,
        }
    }

    pub fn metadata(&self) -> &ObjectMeta {
        match self {
            ManagedResource::ServiceAccount(sa) => &sa.metadata,
            ManagedResource::Deployment(d) => &d.metadata,
        }
    }

    pub fn name(&self) -> &str {
        &self.metadata().name
    }

    pub fn as_deployment(&self) -> Option<&Deployment> {
        match self {
            ManagedResource::Deployment(d) => Some(d),
            ManagedResource::ServiceAccount(_) => None,
        }
    }
}

impl From<ServiceAccount> for ManagedResource {
    fn from(sa: ServiceAccount) -> Self {
        ManagedResource::ServiceAccount(sa)
    }
}

impl From<Deployment> for ManagedResource {
    fn from(d: Deployment) -> Self {
        ManagedResource::Deployment(d)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    #[error("{kind} {name} not found")]
    NotFound { kind: ResourceKind, name: String },
    #[error("request cancelled")]
    Cancelled,
    #[error("{0}")]
    Api(String),
}

/// Create-or-update and delete against the platform.
#[async_trait]
pub trait ResourceClient: Send + Sync {
    /// Idempotently create or update `resource`.
    ///
    /// Implementations may refresh `resource` with server-owned state such as
    /// deployment status.
    async fn apply(
        &self,
        ctx: &CancellationToken,
        resource: &mut ManagedResource,
    ) -> Result<(), ClientError>;

    /// Remove `resource`. Implementations are expected to report an already
    /// absent object as success.
    async fn delete(
        &self,
        ctx: &CancellationToken,
        resource: &ManagedResource,
    ) -> Result<(), ClientError>;
}

#[async_trait]
impl<C: ResourceClient + ?Sized> ResourceClient for std::sync::Arc<C> {
    async fn apply(
        &self,
        ctx: &CancellationToken,
        resource: &mut ManagedResource,
    ) -> Result<(), ClientError> {
        (**self).apply(ctx, resource).await
    }

    async fn delete(
        &self,
        ctx: &CancellationToken,
        resource: &ManagedResource,
    ) -> Result<(), ClientError> {
        (**self).delete(ctx, resource).await
    }
}
