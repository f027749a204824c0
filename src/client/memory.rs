// Copyright 2024-2026 PkgRev-Hooks Contributors
// SPDX-License-Identifier: Apache-2.0

//! In-process resource store.
//!
//! Behaves like the platform for the fields hooks care about: apply keeps
//! server-owned deployment status across updates, delete of an absent object
//! succeeds.

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use tokio_util::sync::CancellationToken;

use super::{ClientError, ManagedResource, ResourceClient, ResourceKind};
use crate::k8s::DeploymentStatus;

type ObjectKey = (ResourceKind, String, String);

fn key_of(resource: &ManagedResource) -> ObjectKey {
    let meta = resource.metadata();
    (
        resource.kind(),
        meta.namespace.clone().unwrap_or_default(),
        meta.name.clone(),
    )
}

/// Thread-safe in-memory object store.
#[derive(Default)]
pub struct InMemoryClient {
    objects: RwLock<BTreeMap<ObjectKey, ManagedResource>>,
}

impl InMemoryClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: ResourceKind, namespace: &str, name: &str) -> Option<ManagedResource> {
        self.objects
            .read()
            .get(&(kind, namespace.to_string(), name.to_string()))
            .cloned()
    }

    pub fn contains(&self, kind: ResourceKind, namespace: &str, name: &str) -> bool {
        self.get(kind, namespace, name).is_some()
    }

    pub fn len(&self) -> usize {
        self.objects.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.read().is_empty()
    }

    /// Record platform-observed status for a stored deployment.
    ///
    /// Returns `false` if no such deployment exists.
    pub fn set_deployment_status(&self, namespace: &str, name: &str, status: DeploymentStatus) -> bool {
        let key = (ResourceKind::Deployment, namespace.to_string(), name.to_string());
        match self.objects.write().get_mut(&key) {
            Some(ManagedResource::Deployment(d)) => {
                d.status = Some(status);
                true
            }
            _ => false,
        }
    }
}

#[async_trait]
impl ResourceClient for InMemoryClient {
    async fn apply(
        &self,
        ctx: &CancellationToken,
        resource: &mut ManagedResource,
    ) -> Result<(), ClientError> {
        if ctx.is_cancelled() {
            return Err(ClientError::Cancelled);
        }

        let key = key_of(resource);
        let mut objects = self.objects.write();
        if let (Some(ManagedResource::Deployment(existing)), ManagedResource::Deployment(desired)) =
            (objects.get(&key), &mut *resource)
        {
            desired.status = existing.status.clone();
        }
        objects.insert(key, resource.clone());
        Ok(())
    }

    async fn delete(
        &self,
        ctx: &CancellationToken,
        resource: &ManagedResource,
    ) -> Result<(), ClientError> {
        if ctx.is_cancelled() {
            return Err(ClientError::Cancelled);
        }

        self.objects.write().remove(&key_of(resource));
        Ok(())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
