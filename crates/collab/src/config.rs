// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Administrator configuration snapshot.
//!
//! Read-only during a compilation; a snapshot is captured once at entry
//!. Loaded from TOML so operators can keep it in the same config
//! directory as the rest of the orchestrator's settings.

use pc_core::ResourceLimits;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Administrator-configured settings applied uniformly to every
/// compilation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    /// Image references permitted to run privileged, when the
    /// repository is trusted.
    #[serde(default)]
    pub privileged: Vec<String>,
    /// Hard resource ceilings applied to every step.
    #[serde(default)]
    pub limits: ResourceLimits,
    /// Host-to-container volume mounts applied to every step
    /// unconditionally.
    #[serde(default)]
    pub volumes: Vec<String>,
    /// Networks attached to every step unconditionally.
    #[serde(default)]
    pub networks: Vec<String>,
    /// Image used for a generated clone step when the workflow omits
    /// one.
    pub default_clone_image: String,
    /// Inject netrc credentials into public-repo clones too.
    #[serde(default)]
    pub authenticate_public_repos: bool,
    /// When set, only the clone step inherits netrc; user steps do not.
    #[serde(default)]
    pub netrc_only_trusted: bool,
    /// Ceiling on matrix cartesian-product size; `MatrixTooLarge` above
    /// this.
    #[serde(default = "default_matrix_size_limit")]
    pub matrix_size_limit: usize,
}

fn default_matrix_size_limit() -> usize {
    256
}

impl ConfigSnapshot {
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn from_toml_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}
