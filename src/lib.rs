// Copyright 2024-2026 PkgRev-Hooks Contributors
// SPDX-License-Identifier: Apache-2.0

//! Package revision lifecycle hooks.
//!
//! Each reconciliation pass of a package revision runs a `pre` and a `post`
//! hook chosen by package kind. Provider revisions own a ServiceAccount and
//! a Deployment that exist only while the revision is active; configuration
//! revisions own nothing.

pub mod client;
pub mod config;
pub mod hooks;
pub mod k8s;
pub mod pkg;
pub mod revision;
pub mod telemetry;
pub mod templates;

pub use client::{ClientError, InMemoryClient, ManagedResource, ResourceClient, ResourceKind};
pub use config::HooksConfig;
pub use hooks::{hooks_for, ConfigurationHooks, ErrorClass, HookError, Hooks, ProviderHooks};
pub use pkg::{Package, PackageKind};
pub use revision::{DesiredState, PackageRevision};
