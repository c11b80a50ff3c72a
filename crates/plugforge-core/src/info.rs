//! Identity value objects shared by every pluggable entity.

use crate::id::UniqueId;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use semver::Version;

/// Identity of a plugin or of one of its configurations.
///
/// Immutable once constructed; the id in particular never changes for the
/// lifetime of the object. Two `Info` values carrying the same id but
/// different names are exactly what discovery reports as a duplicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Info {
    id: UniqueId,
    name: String,
    description: String,
}

impl Info {
    pub fn new(id: UniqueId, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
        }
    }

    pub fn id(&self) -> UniqueId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Display for Info {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// Identity plus declared version of one loaded plugin module.
///
/// Built at load time from module-supplied metadata and never mutated
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginInfo {
    info: Info,
    version: Version,
}

impl PluginInfo {
    pub fn new(info: Info, version: Version) -> Self {
        Self { info, version }
    }

    pub fn info(&self) -> &Info {
        &self.info
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn id(&self) -> UniqueId {
        self.info.id()
    }

    pub fn name(&self) -> &str {
        self.info.name()
    }

    pub fn description(&self) -> &str {
        self.info.description()
    }
}

impl fmt::Display for PluginInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} v{}", self.info, self.version)
    }
}
