// Copyright 2024-2026 PkgRev-Hooks Contributors
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::{ensure_kind, HookError, Hooks};
use crate::pkg::{Package, PackageKind};
use crate::revision::PackageRevision;

/// Hooks for configuration packages, which own no runtime workload.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigurationHooks;

impl ConfigurationHooks {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Hooks for ConfigurationHooks {
    async fn pre(
        &self,
        _ctx: &CancellationToken,
        pkg: &Package,
        _rev: &PackageRevision,
    ) -> Result<(), HookError> {
        ensure_kind(pkg, PackageKind::Configuration)
    }

    async fn post(
        &self,
        _ctx: &CancellationToken,
        pkg: &Package,
        _rev: &PackageRevision,
    ) -> Result<(), HookError> {
        ensure_kind(pkg, PackageKind::Configuration)
    }
}

#[cfg(test)]
#[path = "configuration_tests.rs"]
mod tests;
