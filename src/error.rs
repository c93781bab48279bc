//! Error types for fee allocation.

use std::time::Duration;

use crate::config::ConfigError;

/// Result type for fee operations.
pub type Result<T> = std::result::Result<T, FeeError>;

/// Errors that can occur while resolving a role or computing fees.
///
/// Numeric input is never an error: blank or unparsable amounts are
/// normalized to zero before they reach the engine.
#[derive(Debug, thiserror::Error)]
pub enum FeeError {
    /// The requesting user's role has not been resolved yet.
    #[error("user role not available")]
    RoleUnavailable,

    /// The role was still unavailable when the configured wait elapsed.
    #[error("user role not resolved after {waited:?}")]
    RoleResolutionTimeout { waited: Duration },

    /// The role source failed outright (e.g. it was dropped).
    #[error("role provider error: {0}")]
    RoleProvider(String),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl FeeError {
    /// Returns true if waiting longer could resolve this error.
    pub fn is_retryable(&self) -> bool {
        matches!(self, FeeError::RoleUnavailable)
    }
}
