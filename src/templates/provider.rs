// Copyright 2024-2026 PkgRev-Hooks Contributors
// SPDX-License-Identifier: Apache-2.0

//! Provider workload generated from a revision's identity.

use std::collections::BTreeMap;

use crate::client::ManagedResource;
use crate::k8s::types::{validate_image, validate_namespace};
use crate::k8s::{
    Container, Deployment, DeploymentSpec, LabelSelector, ObjectMeta, PodSpec, PodTemplateSpec,
    ServiceAccount, ValidationError,
};
use crate::pkg::ProviderMeta;
use crate::revision::PackageRevision;

/// Label selecting the pods of a revision's deployment.
pub const REVISION_LABEL: &str = "pkg.crossplane.io/revision";

/// Name of the controller container.
pub const CONTAINER_NAME: &str = "provider";

const IMAGE_PULL_POLICY: &str = "IfNotPresent";

/// ServiceAccount and Deployment owned by one provider revision.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderWorkload {
    pub service_account: ServiceAccount,
    pub deployment: Deployment,
}

impl ProviderWorkload {
    /// Resources in provisioning order: identity first, then its consumer.
    ///
    /// Teardown walks the same list in reverse.
    pub fn into_steps(self) -> Vec<ManagedResource> {
        vec![
            ManagedResource::ServiceAccount(self.service_account),
            ManagedResource::Deployment(self.deployment),
        ]
    }

    /// Teardown targets for `rev` in `namespace`.
    ///
    /// Only kind, name and namespace identify an object for deletion, so
    /// nothing provisioning-only (image, selector, pod template) is read or
    /// validated. Whatever the platform thinks of the identity is reported
    /// by the client.
    pub fn teardown_targets(rev: &PackageRevision, namespace: &str) -> Self {
        let metadata = workload_metadata(rev, namespace);
        Self {
            service_account: ServiceAccount::new(metadata.clone()),
            deployment: Deployment::new(
                metadata,
                DeploymentSpec {
                    replicas: 0,
                    selector: LabelSelector::default(),
                    template: PodTemplateSpec::default(),
                },
            ),
        }
    }
}

fn workload_metadata(rev: &PackageRevision, namespace: &str) -> ObjectMeta {
    ObjectMeta {
        name: rev.name().to_string(),
        namespace: Some(namespace.to_string()),
        labels: BTreeMap::new(),
        owner_references: vec![rev.controller_reference()],
    }
}

/// Build the provider workload for `rev` in `namespace`.
///
/// The controller image comes from the package's controller override if set,
/// otherwise from the image the revision was installed from.
///
/// # Errors
/// Returns a `ValidationError` if the revision name, namespace or image is
/// not acceptable to the platform.
pub fn build_provider_workload(
    meta: &ProviderMeta,
    rev: &PackageRevision,
    namespace: &str,
) -> Result<ProviderWorkload, ValidationError> {
    validate_namespace(namespace, "namespace")?;

    let image = meta
        .controller
        .as_ref()
        .and_then(|c| c.image.as_deref())
        .unwrap_or(rev.spec.package.as_str());
    validate_image(image)?;

    let metadata = workload_metadata(rev, namespace);
    metadata.validate()?;
    let name = metadata.name.clone();

    let selector_labels = BTreeMap::from([(REVISION_LABEL.to_string(), name.clone())]);

    let service_account = ServiceAccount::new(metadata.clone());
    let deployment = Deployment::new(
        metadata,
        DeploymentSpec {
            replicas: 1,
            selector: LabelSelector {
                match_labels: selector_labels.clone(),
            },
            template: PodTemplateSpec {
                metadata: ObjectMeta {
                    labels: selector_labels,
                    ..Default::default()
                },
                spec: PodSpec {
                    service_account_name: name,
                    containers: vec![Container {
                        name: CONTAINER_NAME.to_string(),
                        image: image.to_string(),
                        image_pull_policy: IMAGE_PULL_POLICY.to_string(),
                    }],
                },
            },
        },
    );

    Ok(ProviderWorkload {
        service_account,
        deployment,
    })
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
