//! Error kinds surfaced by the capability contract.

use crate::id::UniqueId;
use thiserror::Error;

/// Errors a plugin can surface from configuration operations.
#[derive(Debug, Error)]
pub enum PluginError {
    /// No configuration with the given id.
    #[error("configuration not found: {0}")]
    NotFound(UniqueId),

    /// The operation is not supported by this plugin; the matching `can_*`
    /// capability is false.
    #[error("operation not supported: {operation}")]
    Unsupported { operation: &'static str },

    /// Plugin-internal failure, with plugin-supplied detail.
    #[error("{0}")]
    Internal(String),

    /// IO error from plugin-private persistence.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl PluginError {
    /// Guard failure for create/edit/remove called without the capability.
    pub fn unsupported(operation: &'static str) -> Self {
        Self::Unsupported { operation }
    }

    /// Plugin-internal failure with a diagnostic message.
    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal(detail.into())
    }
}

/// Result type for configuration operations.
pub type PluginResult<T> = std::result::Result<T, PluginError>;
