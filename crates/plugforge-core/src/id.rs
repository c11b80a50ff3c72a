//! Opaque unique identifiers for plugins and configurations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// An opaque, immutable identifier.
///
/// Ids are the sole lookup key for configurations and the basis for
/// collision detection during discovery. Uniqueness is required within one
/// plugin's enumerable set; two different plugins may hand out the same
/// configuration id without conflict.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UniqueId(Uuid);

impl UniqueId {
    /// Generate a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an id from its canonical string form.
    pub fn parse(s: &str) -> Result<Self, InvalidId> {
        s.parse()
    }
}

impl Default for UniqueId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UniqueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UniqueId {
    type Err = InvalidId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Returned when a string is not a well-formed id.
#[derive(Debug, Error)]
#[error("invalid id: {0}")]
pub struct InvalidId(#[from] uuid::Error);
