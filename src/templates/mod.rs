// Copyright 2024-2026 PkgRev-Hooks Contributors
// SPDX-License-Identifier: Apache-2.0

//! Resource templates for package workloads.

pub mod provider;

pub use provider::{build_provider_workload, ProviderWorkload, REVISION_LABEL};
