// Copyright 2024-2026 PkgRev-Hooks Contributors
// SPDX-License-Identifier: Apache-2.0

//! Hook configuration.
//!
//! Sources, lowest precedence first: built-in defaults, an optional TOML file
//! named by `PKGREV_HOOKS_CONFIG`, then individual environment overrides.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::k8s::validation::validate_namespace;
use crate::k8s::ValidationError;

pub const ENV_CONFIG_PATH: &str = "PKGREV_HOOKS_CONFIG";
pub const ENV_NAMESPACE: &str = "PKGREV_HOOKS_NAMESPACE";
pub const ENV_LOG_LEVEL: &str = "PKGREV_HOOKS_LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "PKGREV_HOOKS_LOG_FORMAT";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(#[from] ValidationError),
    #[error("unknown log format: {0}")]
    LogFormat(String),
}

/// Configuration for the package revision hooks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HooksConfig {
    /// Namespace provider workloads are created in.
    #[serde(default = "default_namespace")]
    pub namespace: String,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging and tracing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level used when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::LogFormat(s.to_string())),
        }
    }
}

fn default_namespace() -> String {
    "crossplane-system".to_string()
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for HooksConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

impl HooksConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// # Errors
    /// Returns `ConfigError::Invalid` if the namespace is not a valid name.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_namespace(&self.namespace, "namespace")?;
        Ok(())
    }

    fn apply_overrides<F>(&mut self, lookup: &F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(ns) = lookup(ENV_NAMESPACE) {
            self.namespace = ns;
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = level;
        }
        if let Some(format) = lookup(ENV_LOG_FORMAT) {
            self.logging.format = format.parse()?;
        }
        Ok(())
    }
}

/// Load configuration from the process environment.
pub fn load() -> Result<HooksConfig, ConfigError> {
    load_with(|key| std::env::var(key).ok())
}

/// Load configuration using `lookup` in place of the process environment.
pub fn load_with<F>(lookup: F) -> Result<HooksConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match lookup(ENV_CONFIG_PATH) {
        Some(path) => HooksConfig::from_file(Path::new(&path))?,
        None => HooksConfig::default(),
    };
    config.apply_overrides(&lookup)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
