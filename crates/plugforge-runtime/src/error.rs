//! Error types for the discovery runtime.

use plugforge_core::Info;
use semver::{Version, VersionReq};
use std::fmt;
use thiserror::Error;

/// Errors that can occur while loading a candidate module or reading
/// discovery configuration.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Manifest failed validation.
    #[error("invalid manifest: {0}")]
    InvalidManifest(String),

    /// Module requires a runtime version this runtime does not satisfy.
    #[error("incompatible module: requires runtime {required}, running {current}")]
    Incompatible {
        required: VersionReq,
        current: Version,
    },

    /// Discovery configuration is invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error.
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("toml error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Result type for runtime operations.
pub type RuntimeResult<T> = std::result::Result<T, RuntimeError>;

/// Every identity collision observed during one exploration, in discovery
/// order.
///
/// Raised once after all paths are processed. The first-seen module for
/// each id stays registered and usable; only the later arrivals are listed
/// here. The list is never deduplicated further; a third module colliding
/// on an already-reported id is appended again.
#[derive(Debug, Clone, Default)]
pub struct DuplicateIds {
    infos: Vec<Info>,
}

impl DuplicateIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one colliding identity.
    pub fn push(&mut self, info: Info) {
        self.infos.push(info);
    }

    /// The colliding identities, in discovery order.
    pub fn infos(&self) -> &[Info] {
        &self.infos
    }

    pub fn is_empty(&self) -> bool {
        self.infos.is_empty()
    }

    pub fn len(&self) -> usize {
        self.infos.len()
    }
}

impl From<Vec<Info>> for DuplicateIds {
    fn from(infos: Vec<Info>) -> Self {
        Self { infos }
    }
}

impl fmt::Display for DuplicateIds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "duplicate ids, the modules declaring them were ignored:")?;
        for info in &self.infos {
            write!(f, "\n  {}, name: {}", info.id(), info.name())?;
        }
        Ok(())
    }
}

impl std::error::Error for DuplicateIds {}
