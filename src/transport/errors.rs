//! Transport error types

use thiserror::Error;

/// Load/save failures, reported once at the operation boundary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("load failed: {0}")]
    LoadFailed(String),

    #[error("save failed: {0}")]
    SaveFailed(String),
}

impl TransportError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            TransportError::LoadFailed(_) => "ADDONCONF_LOAD_FAILED",
            TransportError::SaveFailed(_) => "ADDONCONF_SAVE_FAILED",
        }
    }
}

/// Result type for transport operations
pub type TransportResult<T> = Result<T, TransportError>;
