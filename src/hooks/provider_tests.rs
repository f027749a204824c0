// Copyright 2024-2026 PkgRev-Hooks Contributors
// SPDX-License-Identifier: Apache-2.0

//! Tests for provider revision hooks.

use std::sync::Arc;

use parking_lot::Mutex;

use super::*;
use crate::client::{ClientError, InMemoryClient, ResourceKind};
use crate::hooks::ErrorClass;
use crate::k8s::{DeploymentCondition, DeploymentConditionType, DeploymentStatus};
use crate::pkg::{ConfigurationMeta, ControllerSpec, CrossplaneConstraints, Dependency, MetaSpec};
use crate::revision::DesiredState;

const NS: &str = "crossplane-system";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Call {
    Apply(ResourceKind),
    Delete(ResourceKind),
}

/// Records every call and fails on the configured resource kinds.
#[derive(Default)]
struct MockClient {
    calls: Mutex<Vec<Call>>,
    fail_apply: Option<ResourceKind>,
    fail_delete: Option<ResourceKind>,
    availability: Option<(ConditionStatus, &'static str)>,
}

impl MockClient {
    fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }
}

fn boom() -> ClientError {
    ClientError::Api("boom".to_string())
}

#[async_trait]
impl ResourceClient for MockClient {
    async fn apply(
        &self,
        _ctx: &CancellationToken,
        resource: &mut ManagedResource,
    ) -> Result<(), ClientError> {
        let kind = resource.kind();
        self.calls.lock().push(Call::Apply(kind));
        if self.fail_apply == Some(kind) {
            return Err(boom());
        }
        if let (ManagedResource::Deployment(d), Some((status, message))) =
            (resource, self.availability)
        {
            d.status = Some(DeploymentStatus {
                ready_replicas: 0,
                conditions: vec![DeploymentCondition::new(
                    DeploymentConditionType::Available,
                    status,
                    message,
                )],
            });
        }
        Ok(())
    }

    async fn delete(
        &self,
        _ctx: &CancellationToken,
        resource: &ManagedResource,
    ) -> Result<(), ClientError> {
        let kind = resource.kind();
        self.calls.lock().push(Call::Delete(kind));
        if self.fail_delete == Some(kind) {
            return Err(boom());
        }
        Ok(())
    }
}

fn provider_pkg() -> Package {
    Package::Provider(ProviderMeta {
        meta: MetaSpec {
            crossplane: Some(CrossplaneConstraints {
                version: "v0.11.1".to_string(),
            }),
            depends_on: vec![Dependency {
                provider: Some("crossplane/provider-aws".to_string()),
                configuration: None,
                version: "v0.1.1".to_string(),
            }],
        },
        controller: None,
    })
}

fn revision(state: DesiredState) -> PackageRevision {
    PackageRevision::new(
        PackageKind::Provider,
        "provider-aws-8d2f1c",
        "crossplane/provider-aws:v0.1.1",
    )
    .with_desired_state(state)
}

fn hooks(client: MockClient) -> (ProviderHooks<Arc<MockClient>>, Arc<MockClient>) {
    let client = Arc::new(client);
    (ProviderHooks::new(client.clone(), NS), client)
}

#[tokio::test]
async fn rejects_configuration_package_for_any_state() {
    let ctx = CancellationToken::new();
    let pkg = Package::Configuration(ConfigurationMeta::default());

    for state in [DesiredState::Active, DesiredState::Inactive] {
        let (h, client) = hooks(MockClient::default());
        let rev = revision(state);

        let err = h.pre(&ctx, &pkg, &rev).await.unwrap_err();
        assert_eq!(
            err,
            HookError::KindMismatch {
                expected: PackageKind::Provider,
                actual: PackageKind::Configuration,
            }
        );
        assert_eq!(err.to_string(), "not a provider package");
        assert_eq!(err.class(), ErrorClass::Fatal);

        assert!(h.post(&ctx, &pkg, &rev).await.is_err());
        assert!(client.calls().is_empty());
    }
}

#[tokio::test]
async fn pre_active_is_noop() {
    let (h, client) = hooks(MockClient::default());
    let rev = revision(DesiredState::Active);

    h.pre(&CancellationToken::new(), &provider_pkg(), &rev)
        .await
        .unwrap();
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn pre_inactive_deletes_deployment_then_service_account() {
    let (h, client) = hooks(MockClient::default());
    let rev = revision(DesiredState::Inactive);

    h.pre(&CancellationToken::new(), &provider_pkg(), &rev)
        .await
        .unwrap();
    assert_eq!(
        client.calls(),
        vec![
            Call::Delete(ResourceKind::Deployment),
            Call::Delete(ResourceKind::ServiceAccount),
        ]
    );
}

#[tokio::test]
async fn pre_stops_when_deployment_delete_fails() {
    let (h, client) = hooks(MockClient {
        fail_delete: Some(ResourceKind::Deployment),
        ..Default::default()
    });
    let rev = revision(DesiredState::Inactive);

    let err = h
        .pre(&CancellationToken::new(), &provider_pkg(), &rev)
        .await
        .unwrap_err();
    assert_eq!(err, HookError::DeleteDeployment(boom()));
    assert_eq!(err.to_string(), "failed to delete deployment: boom");
    assert_eq!(client.calls(), vec![Call::Delete(ResourceKind::Deployment)]);
}

#[tokio::test]
async fn pre_reports_service_account_delete_failure() {
    let (h, client) = hooks(MockClient {
        fail_delete: Some(ResourceKind::ServiceAccount),
        ..Default::default()
    });
    let rev = revision(DesiredState::Inactive);

    let err = h
        .pre(&CancellationToken::new(), &provider_pkg(), &rev)
        .await
        .unwrap_err();
    assert_eq!(err, HookError::DeleteServiceAccount(boom()));
    assert!(err.is_retryable());
    assert_eq!(client.calls().len(), 2);
}

#[tokio::test]
async fn post_inactive_is_noop() {
    let (h, client) = hooks(MockClient::default());
    let rev = revision(DesiredState::Inactive);

    h.post(&CancellationToken::new(), &provider_pkg(), &rev)
        .await
        .unwrap();
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn post_stops_when_service_account_apply_fails() {
    let (h, client) = hooks(MockClient {
        fail_apply: Some(ResourceKind::ServiceAccount),
        ..Default::default()
    });
    let rev = revision(DesiredState::Active);

    let err = h
        .post(&CancellationToken::new(), &provider_pkg(), &rev)
        .await
        .unwrap_err();
    assert_eq!(err, HookError::ApplyServiceAccount(boom()));
    assert_eq!(err.client_error(), Some(&boom()));
    assert_eq!(client.calls(), vec![Call::Apply(ResourceKind::ServiceAccount)]);
}

#[tokio::test]
async fn post_reports_deployment_apply_failure() {
    let (h, client) = hooks(MockClient {
        fail_apply: Some(ResourceKind::Deployment),
        ..Default::default()
    });
    let rev = revision(DesiredState::Active);

    let err = h
        .post(&CancellationToken::new(), &provider_pkg(), &rev)
        .await
        .unwrap_err();
    assert_eq!(err, HookError::ApplyDeployment(boom()));
    assert_eq!(err.class(), ErrorClass::Transient);
    assert_eq!(
        client.calls(),
        vec![
            Call::Apply(ResourceKind::ServiceAccount),
            Call::Apply(ResourceKind::Deployment),
        ]
    );
}

#[tokio::test]
async fn post_fails_with_unavailable_message() {
    let (h, _client) = hooks(MockClient {
        availability: Some((ConditionStatus::False, "boom")),
        ..Default::default()
    });
    let rev = revision(DesiredState::Active);
    let before = rev.clone();

    let err = h
        .post(&CancellationToken::new(), &provider_pkg(), &rev)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "deployment unavailable: boom");
    assert_eq!(err.health_message(), Some("boom"));
    assert_eq!(err.class(), ErrorClass::Incomplete);
    assert!(err.is_retryable());
    assert_eq!(rev, before);
    assert_eq!(rev.desired_state(), DesiredState::Active);
}

#[tokio::test]
async fn post_succeeds_when_available_or_unreported() {
    for availability in [
        None,
        Some((ConditionStatus::True, "ok")),
        Some((ConditionStatus::Unknown, "pending")),
    ] {
        let (h, client) = hooks(MockClient {
            availability,
            ..Default::default()
        });
        let rev = revision(DesiredState::Active);

        h.post(&CancellationToken::new(), &provider_pkg(), &rev)
            .await
            .unwrap();
        assert_eq!(client.calls().len(), 2);
    }
}

#[tokio::test]
async fn invalid_revision_name_fails_before_any_call() {
    let (h, client) = hooks(MockClient::default());
    let mut rev = revision(DesiredState::Active);
    rev.metadata.name = "Not_Valid".to_string();

    let err = h
        .post(&CancellationToken::new(), &provider_pkg(), &rev)
        .await
        .unwrap_err();
    assert!(matches!(err, HookError::Template(_)));
    assert!(!err.is_retryable());
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn pre_inactive_ignores_empty_package_image() {
    let (h, client) = hooks(MockClient::default());
    let mut rev = revision(DesiredState::Inactive);
    rev.spec.package = String::new();

    h.pre(&CancellationToken::new(), &provider_pkg(), &rev)
        .await
        .unwrap();
    assert_eq!(
        client.calls(),
        vec![
            Call::Delete(ResourceKind::Deployment),
            Call::Delete(ResourceKind::ServiceAccount),
        ]
    );
}

#[tokio::test]
async fn pre_inactive_removes_workload_despite_rejected_controller_image() {
    let store = Arc::new(InMemoryClient::new());
    let h = ProviderHooks::new(store.clone(), NS);
    let ctx = CancellationToken::new();
    let rev = revision(DesiredState::Active);

    h.post(&ctx, &provider_pkg(), &rev).await.unwrap();
    assert_eq!(store.len(), 2);

    // The package now carries a controller image provisioning would refuse.
    let mut pkg = provider_pkg();
    if let Package::Provider(meta) = &mut pkg {
        meta.controller = Some(ControllerSpec {
            image: Some("bad image".to_string()),
        });
    }
    let rev = rev.with_desired_state(DesiredState::Inactive);

    h.pre(&ctx, &pkg, &rev).await.unwrap();
    assert!(store.is_empty());

    let err = h
        .post(&ctx, &pkg, &rev.with_desired_state(DesiredState::Active))
        .await
        .unwrap_err();
    assert!(matches!(err, HookError::Template(_)));
}

#[tokio::test]
async fn cancellation_reaches_client() {
    let store = Arc::new(InMemoryClient::new());
    let h = ProviderHooks::new(store.clone(), NS);
    let ctx = CancellationToken::new();
    ctx.cancel();

    let err = h
        .post(&ctx, &provider_pkg(), &revision(DesiredState::Active))
        .await
        .unwrap_err();
    assert_eq!(err, HookError::ApplyServiceAccount(ClientError::Cancelled));
    assert!(store.is_empty());
}

#[tokio::test]
async fn lifecycle_against_in_memory_store() {
    let store = Arc::new(InMemoryClient::new());
    let h = ProviderHooks::new(store.clone(), NS);
    let ctx = CancellationToken::new();
    let pkg = provider_pkg();
    let active = revision(DesiredState::Active);
    let name = active.name().to_string();

    h.pre(&ctx, &pkg, &active).await.unwrap();
    assert!(store.is_empty());
    h.post(&ctx, &pkg, &active).await.unwrap();
    assert!(store.contains(ResourceKind::ServiceAccount, NS, &name));
    assert!(store.contains(ResourceKind::Deployment, NS, &name));

    store.set_deployment_status(
        NS,
        &name,
        DeploymentStatus {
            ready_replicas: 0,
            conditions: vec![DeploymentCondition::new(
                DeploymentConditionType::Available,
                ConditionStatus::False,
                "Deployment does not have minimum availability.",
            )],
        },
    );
    let err = h.post(&ctx, &pkg, &active).await.unwrap_err();
    assert_eq!(
        err.health_message(),
        Some("Deployment does not have minimum availability.")
    );

    let inactive = active.clone().with_desired_state(DesiredState::Inactive);
    h.post(&ctx, &pkg, &inactive).await.unwrap();
    assert_eq!(store.len(), 2);
    h.pre(&ctx, &pkg, &inactive).await.unwrap();
    assert!(store.is_empty());

    // teardown of an already removed workload
    h.pre(&ctx, &pkg, &inactive).await.unwrap();
}

/// Delete that reports a missing object as an error instead of success.
struct StrictDeleteClient {
    inner: InMemoryClient,
}

#[async_trait]
impl ResourceClient for StrictDeleteClient {
    async fn apply(
        &self,
        ctx: &CancellationToken,
        resource: &mut ManagedResource,
    ) -> Result<(), ClientError> {
        self.inner.apply(ctx, resource).await
    }

    async fn delete(
        &self,
        ctx: &CancellationToken,
        resource: &ManagedResource,
    ) -> Result<(), ClientError> {
        let meta = resource.metadata();
        let namespace = meta.namespace.as_deref().unwrap_or_default();
        if !self.inner.contains(resource.kind(), namespace, &meta.name) {
            return Err(ClientError::NotFound {
                kind: resource.kind(),
                name: meta.name.clone(),
            });
        }
        self.inner.delete(ctx, resource).await
    }
}

#[tokio::test]
async fn not_found_delete_fails_partial_teardown() {
    let client = StrictDeleteClient {
        inner: InMemoryClient::new(),
    };
    let ctx = CancellationToken::new();
    let rev = revision(DesiredState::Inactive);

    // only the service account is left behind
    let mut sa = build_provider_workload(&ProviderMeta::default(), &rev, NS)
        .unwrap()
        .into_steps()
        .remove(0);
    client.inner.apply(&ctx, &mut sa).await.unwrap();

    let h = ProviderHooks::new(client, NS);
    let err = h.pre(&ctx, &provider_pkg(), &rev).await.unwrap_err();
    assert!(matches!(
        err,
        HookError::DeleteDeployment(ClientError::NotFound {
            kind: ResourceKind::Deployment,
            ..
        })
    ));
}
