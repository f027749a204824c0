// Copyright 2024-2026 PkgRev-Hooks Contributors
// SPDX-License-Identifier: Apache-2.0

//! Provider revision hooks.
//!
//! An active provider revision owns one ServiceAccount and one Deployment.
//! `post` applies them in order and gates success on the deployment's
//! availability; `pre` removes them in reverse order once the revision is
//! inactive. Every step stops the call on its first failure.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::error::StepOp;
use super::{kind_mismatch, HookError, Hooks};
use crate::client::{ManagedResource, ResourceClient};
use crate::k8s::{ConditionStatus, Deployment};
use crate::pkg::{Package, PackageKind, ProviderMeta};
use crate::revision::PackageRevision;
use crate::templates::{build_provider_workload, ProviderWorkload};

/// Hooks for provider packages.
pub struct ProviderHooks<C> {
    client: C,
    namespace: String,
}

impl<C: ResourceClient> ProviderHooks<C> {
    pub fn new(client: C, namespace: impl Into<String>) -> Self {
        Self {
            client,
            namespace: namespace.into(),
        }
    }

    fn steps(
        &self,
        meta: &ProviderMeta,
        rev: &PackageRevision,
    ) -> Result<Vec<ManagedResource>, HookError> {
        Ok(build_provider_workload(meta, rev, &self.namespace)?.into_steps())
    }

    async fn run_step(
        &self,
        ctx: &CancellationToken,
        op: StepOp,
        resource: &mut ManagedResource,
    ) -> Result<(), HookError> {
        tracing::debug!(
            resource = %resource.kind(),
            object = resource.name(),
            namespace = %self.namespace,
            ?op,
            "running provider workload step"
        );
        let result = match op {
            StepOp::Apply => self.client.apply(ctx, resource).await,
            StepOp::Delete => self.client.delete(ctx, resource).await,
        };
        result.map_err(|e| HookError::step_failed(op, resource.kind(), e))
    }
}

fn provider_meta(pkg: &Package) -> Result<&ProviderMeta, HookError> {
    pkg.as_provider().ok_or_else(|| kind_mismatch(pkg, PackageKind::Provider))
}

#[async_trait]
impl<C: ResourceClient> Hooks for ProviderHooks<C> {
    async fn pre(
        &self,
        ctx: &CancellationToken,
        pkg: &Package,
        rev: &PackageRevision,
    ) -> Result<(), HookError> {
        provider_meta(pkg)?;
        if rev.is_active() {
            return Ok(());
        }

        let mut steps = ProviderWorkload::teardown_targets(rev, &self.namespace).into_steps();
        for resource in steps.iter_mut().rev() {
            self.run_step(ctx, StepOp::Delete, resource).await?;
        }
        tracing::info!(revision = rev.name(), "provider workload removed");
        Ok(())
    }

    async fn post(
        &self,
        ctx: &CancellationToken,
        pkg: &Package,
        rev: &PackageRevision,
    ) -> Result<(), HookError> {
        let meta = provider_meta(pkg)?;
        if !rev.is_active() {
            return Ok(());
        }

        let mut steps = self.steps(meta, rev)?;
        for resource in steps.iter_mut() {
            self.run_step(ctx, StepOp::Apply, resource).await?;
        }

        let availability = steps
            .iter()
            .find_map(ManagedResource::as_deployment)
            .and_then(Deployment::availability);
        if let Some(cond) = availability {
            if cond.status == ConditionStatus::False {
                tracing::warn!(
                    revision = rev.name(),
                    message = %cond.message,
                    "provider deployment unavailable"
                );
                return Err(HookError::Unavailable(cond.message.clone()));
            }
        }
        tracing::debug!(revision = rev.name(), "provider workload applied");
        Ok(())
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
