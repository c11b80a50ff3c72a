//! Discovery configuration file.
//!
//! Hosts can keep exploration parameters in a TOML file instead of code:
//!
//! ```toml
//! search_paths = ["/opt/acme/modules"]
//! extension = "plug"
//! recursive = true
//! ignore = ["legacy_bridge"]
//! ```

use crate::error::{RuntimeError, RuntimeResult};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Parameters of a discovery run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Directories searched, in order.
    pub search_paths: Vec<PathBuf>,

    /// Module file extension, with or without leading dot.
    pub extension: String,

    /// Whether sub-directories are descended.
    pub recursive: bool,

    /// Module stems to skip, replacing the built-in ignore list when
    /// non-empty.
    pub ignore: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            search_paths: paths::default_search_paths(),
            extension: "plug".to_string(),
            recursive: true,
            ignore: Vec::new(),
        }
    }
}

impl DiscoveryConfig {
    /// Load and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> RuntimeResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: DiscoveryConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> RuntimeResult<()> {
        if self.extension.trim_start_matches('.').is_empty() {
            return Err(RuntimeError::InvalidConfig(
                "extension cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
