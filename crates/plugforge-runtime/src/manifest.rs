//! Module manifest parsing.
//!
//! A candidate module file is a TOML manifest describing the module's
//! identity, the capabilities it requests, the lifecycle operations it
//! supports, and the configurations it ships with:
//!
//! ```toml
//! [plugin]
//! id = "5f0c54f6-84a5-40c7-96ce-8df3563ee3a8"
//! name = "quotes"
//! description = "historical quote source"
//! version = "1.4.0"
//! kind = "data_source"
//! requires = "^0.1"
//!
//! capabilities = ["network"]
//!
//! [lifecycle]
//! create = true
//! edit = true
//! remove = true
//!
//! [[configurations]]
//! id = "37b0e5de-9f4b-4c57-a646-2cb33ab9e5f1"
//! name = "daily"
//! args = ["NYSE"]
//! ```

use crate::capability::CapabilitySet;
use crate::error::{RuntimeError, RuntimeResult};
use plugforge_core::{Info, PluginInfo, UniqueId, Version};
use semver::VersionReq;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Version of this runtime, matched against each module's `requires`.
pub fn runtime_version() -> Version {
    env!("CARGO_PKG_VERSION")
        .parse()
        .expect("crate version is valid semver")
}

/// Module manifest structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginManifest {
    /// Module identity.
    pub plugin: PluginMetadata,

    /// Capabilities the module requests from the host.
    #[serde(default)]
    pub capabilities: Vec<String>,

    /// Lifecycle operations the module supports.
    #[serde(default)]
    pub lifecycle: Lifecycle,

    /// Configurations the module ships with.
    #[serde(default)]
    pub configurations: Vec<ConfigSeed>,
}

/// Module identity metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginMetadata {
    /// Unique module id.
    pub id: UniqueId,

    /// Human-readable name.
    pub name: String,

    /// Module description.
    #[serde(default)]
    pub description: String,

    /// Module version.
    pub version: Version,

    /// Plugin family.
    #[serde(default = "default_kind")]
    pub kind: PluginKind,

    /// Runtime versions the module accepts.
    #[serde(default = "default_requires")]
    pub requires: VersionReq,
}

fn default_kind() -> PluginKind {
    PluginKind::Extension
}

fn default_requires() -> VersionReq {
    VersionReq::STAR
}

/// Family of plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PluginKind {
    /// Produces data-source connections.
    DataSource,
    /// Produces symbol lists.
    SymbolSource,
    /// Produces strategy definitions.
    Strategy,
    /// Anything else.
    Extension,
}

/// Lifecycle operations a module supports. All default to off; a module
/// that declares none only enumerates its shipped configurations.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Lifecycle {
    /// New configurations can be created.
    pub create: bool,
    /// Existing configurations can be edited.
    pub edit: bool,
    /// Existing configurations can be removed.
    pub remove: bool,
    /// Configurations offer an interactive editor.
    pub window: bool,
}

/// A configuration record shipped in the manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSeed {
    pub id: UniqueId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl PluginManifest {
    /// Load a manifest from a TOML file.
    pub fn from_file(path: &Path) -> RuntimeResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse a manifest from a TOML string.
    pub fn parse(content: &str) -> RuntimeResult<Self> {
        let manifest: PluginManifest = toml::from_str(content)?;
        manifest.validate()?;
        Ok(manifest)
    }

    fn validate(&self) -> RuntimeResult<()> {
        if self.plugin.name.is_empty() {
            return Err(RuntimeError::InvalidManifest(
                "module name cannot be empty".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for seed in &self.configurations {
            if seed.name.is_empty() {
                return Err(RuntimeError::InvalidManifest(format!(
                    "configuration {} has an empty name",
                    seed.id
                )));
            }
            if !seen.insert(seed.id) {
                return Err(RuntimeError::InvalidManifest(format!(
                    "configuration id {} declared twice",
                    seed.id
                )));
            }
        }

        Ok(())
    }

    /// Identity and version this module declares.
    pub fn plugin_info(&self) -> PluginInfo {
        PluginInfo::new(
            Info::new(
                self.plugin.id,
                self.plugin.name.as_str(),
                self.plugin.description.as_str(),
            ),
            self.plugin.version.clone(),
        )
    }

    /// The capability set the module requests.
    pub fn capability_set(&self) -> CapabilitySet {
        CapabilitySet::from_strings(&self.capabilities)
    }

    /// Whether the module accepts the given runtime version.
    pub fn compatible_with(&self, current: &Version) -> bool {
        self.plugin.requires.matches(current)
    }
}
