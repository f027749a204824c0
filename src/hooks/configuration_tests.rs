// Copyright 2024-2026 PkgRev-Hooks Contributors
// SPDX-License-Identifier: Apache-2.0

//! Tests for configuration revision hooks.

use std::sync::Arc;

use super::*;
use crate::client::InMemoryClient;
use crate::hooks::hooks_for;
use crate::pkg::{ConfigurationMeta, ProviderMeta};
use crate::revision::DesiredState;

fn revision(state: DesiredState) -> PackageRevision {
    PackageRevision::new(
        PackageKind::Configuration,
        "getting-started-aws-1f3a",
        "crossplane/getting-started-with-aws:v0.1.0",
    )
    .with_desired_state(state)
}

#[tokio::test]
async fn succeeds_for_any_state() {
    let h = ConfigurationHooks::new();
    let ctx = CancellationToken::new();
    let pkg = Package::Configuration(ConfigurationMeta::default());

    for state in [DesiredState::Active, DesiredState::Inactive] {
        let rev = revision(state);
        assert!(h.pre(&ctx, &pkg, &rev).await.is_ok());
        assert!(h.post(&ctx, &pkg, &rev).await.is_ok());
    }
}

#[tokio::test]
async fn rejects_provider_package() {
    let h = ConfigurationHooks::new();
    let ctx = CancellationToken::new();
    let pkg = Package::Provider(ProviderMeta::default());
    let rev = revision(DesiredState::Active);

    let err = h.pre(&ctx, &pkg, &rev).await.unwrap_err();
    assert_eq!(err.to_string(), "not a configuration package");
    assert!(h.post(&ctx, &pkg, &rev).await.is_err());
}

#[tokio::test]
async fn dispatch_by_kind_never_touches_store_for_configuration() {
    let store = Arc::new(InMemoryClient::new());
    let h = hooks_for(PackageKind::Configuration, store.clone(), "crossplane-system");
    let ctx = CancellationToken::new();
    let pkg = Package::Configuration(ConfigurationMeta::default());

    for state in [DesiredState::Active, DesiredState::Inactive] {
        let rev = revision(state);
        h.pre(&ctx, &pkg, &rev).await.unwrap();
        h.post(&ctx, &pkg, &rev).await.unwrap();
    }
    assert!(store.is_empty());
}

#[tokio::test]
async fn dispatch_by_kind_provisions_provider() {
    let store = Arc::new(InMemoryClient::new());
    let h = hooks_for(PackageKind::Provider, store.clone(), "crossplane-system");
    let rev = PackageRevision::new(
        PackageKind::Provider,
        "provider-aws-77aa",
        "crossplane/provider-aws:v0.1.1",
    )
    .with_desired_state(DesiredState::Active);

    h.post(&CancellationToken::new(), &Package::Provider(ProviderMeta::default()), &rev)
        .await
        .unwrap();
    assert_eq!(store.len(), 2);
}
