//! Capabilities a module declares in its manifest.
//!
//! The runtime hands a module only the host facilities it declared; host
//! services check the set before acting.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A host facility a module can request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Network access through the host transport.
    Network,

    /// Read from the filesystem.
    FileRead,

    /// Write to the filesystem.
    FileWrite,

    /// Read system environment variables.
    Environment,

    /// Access to stored credentials.
    Credentials,

    /// Extension-defined capability.
    Custom(String),
}

impl Capability {
    /// Parse a capability from its manifest string.
    pub fn parse(s: &str) -> Self {
        match s {
            "network" => Capability::Network,
            "file_read" => Capability::FileRead,
            "file_write" => Capability::FileWrite,
            "environment" => Capability::Environment,
            "credentials" => Capability::Credentials,
            other => Capability::Custom(other.to_string()),
        }
    }

    /// String form as written in manifests.
    pub fn as_str(&self) -> &str {
        match self {
            Capability::Network => "network",
            Capability::FileRead => "file_read",
            Capability::FileWrite => "file_write",
            Capability::Environment => "environment",
            Capability::Credentials => "credentials",
            Capability::Custom(s) => s,
        }
    }
}

/// A set of declared capabilities.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CapabilitySet {
    capabilities: HashSet<Capability>,
}

impl CapabilitySet {
    /// Create an empty capability set.
    pub fn new() -> Self {
        Self {
            capabilities: HashSet::new(),
        }
    }

    /// Build a set from manifest capability strings.
    pub fn from_strings<I, S>(strings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let capabilities = strings
            .into_iter()
            .map(|s| Capability::parse(s.as_ref()))
            .collect();
        Self { capabilities }
    }

    /// Add a capability to the set.
    pub fn add(&mut self, cap: Capability) {
        self.capabilities.insert(cap);
    }

    /// Check if the set contains a capability.
    pub fn has(&self, cap: &Capability) -> bool {
        self.capabilities.contains(cap)
    }

    /// All capabilities in the set.
    pub fn iter(&self) -> impl Iterator<Item = &Capability> {
        self.capabilities.iter()
    }

    pub fn len(&self) -> usize {
        self.capabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<T: IntoIterator<Item = Capability>>(iter: T) -> Self {
        Self {
            capabilities: iter.into_iter().collect(),
        }
    }
}
