// Copyright 2024-2026 PkgRev-Hooks Contributors
// SPDX-License-Identifier: Apache-2.0

//! Lifecycle hooks run around each revision reconciliation pass.
//!
//! The reconciler calls [`Hooks::pre`] before it finalizes generic revision
//! state and [`Hooks::post`] afterwards. A hook never mutates the revision;
//! its only output is the returned result.

mod configuration;
mod error;
mod provider;

pub use configuration::ConfigurationHooks;
pub use error::{ErrorClass, HookError};
pub use provider::ProviderHooks;

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::client::ResourceClient;
use crate::pkg::{Package, PackageKind};
use crate::revision::PackageRevision;

/// Pre/Post extension points for one package kind.
///
/// `ctx` is handed unchanged to every platform call.
#[async_trait]
pub trait Hooks: Send + Sync {
    async fn pre(
        &self,
        ctx: &CancellationToken,
        pkg: &Package,
        rev: &PackageRevision,
    ) -> Result<(), HookError>;

    async fn post(
        &self,
        ctx: &CancellationToken,
        pkg: &Package,
        rev: &PackageRevision,
    ) -> Result<(), HookError>;
}

/// Hooks matching `kind`.
pub fn hooks_for(
    kind: PackageKind,
    client: Arc<dyn ResourceClient>,
    namespace: impl Into<String>,
) -> Box<dyn Hooks> {
    match kind {
        PackageKind::Provider => Box::new(ProviderHooks::new(client, namespace)),
        PackageKind::Configuration => Box::new(ConfigurationHooks::new()),
    }
}

/// Fail unless `pkg` is of the kind the hook serves.
fn ensure_kind(pkg: &Package, expected: PackageKind) -> Result<(), HookError> {
    if pkg.kind() != expected {
        return Err(kind_mismatch(pkg, expected));
    }
    Ok(())
}

fn kind_mismatch(pkg: &Package, expected: PackageKind) -> HookError {
    let actual = pkg.kind();
    tracing::error!(%expected, %actual, "hooks invoked with mismatched package kind");
    HookError::KindMismatch { expected, actual }
}
