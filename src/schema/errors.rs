//! Schema error types
//!
//! Error codes:
//! - ADDONCONF_DUPLICATE_ADDON (FATAL)
//! - ADDONCONF_FIELD_COLLISION (FATAL)
//! - ADDONCONF_MISSING_GATE (FATAL)
//! - ADDONCONF_GATE_NOT_BOOLEAN (FATAL)
//! - ADDONCONF_MISSING_RULE (FATAL)
//! - ADDONCONF_FOREIGN_GATE (FATAL)
//! - ADDONCONF_EMPTY_RANGE (FATAL)
//! - ADDONCONF_EMPTY_SELECTION (FATAL)
//! - ADDONCONF_INVALID_DEFAULT (FATAL)
//! - ADDONCONF_UNKNOWN_ADDON (REJECT)

use std::fmt;

use thiserror::Error;

use crate::state::Scalar;

/// Severity levels for schema errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Caller request rejected
    Reject,
    /// Addon definitions are broken; the registry cannot be built
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Errors raised while building or querying the addon registry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("addon '{0}' is registered twice")]
    DuplicateAddon(String),

    #[error("field '{field}' of addon '{addon}' is already declared by addon '{existing}'")]
    FieldCollision {
        field: String,
        addon: String,
        existing: String,
    },

    #[error("addon '{addon}' does not declare its gate field '{gate}'")]
    MissingGate { addon: String, gate: String },

    #[error("gate field '{field}' of addon '{addon}' must be boolean")]
    GateNotBoolean { addon: String, field: String },

    #[error("field '{field}' of addon '{addon}' declares no rule")]
    MissingRule { addon: String, field: String },

    #[error("field '{field}' is gated on '{gate}' but its addon's gate is '{expected}'")]
    ForeignGate {
        field: String,
        gate: String,
        expected: String,
    },

    #[error("field '{field}' has an empty range {min}..={max}")]
    EmptyRange { field: String, min: i64, max: i64 },

    #[error("field '{field}' has no selectable options")]
    EmptySelection { field: String },

    #[error("default {value} of field '{field}' violates its own rule")]
    InvalidDefault { field: String, value: Scalar },

    #[error("unknown addon '{0}'")]
    UnknownAddon(String),
}

impl SchemaError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaError::DuplicateAddon(_) => "ADDONCONF_DUPLICATE_ADDON",
            SchemaError::FieldCollision { .. } => "ADDONCONF_FIELD_COLLISION",
            SchemaError::MissingGate { .. } => "ADDONCONF_MISSING_GATE",
            SchemaError::GateNotBoolean { .. } => "ADDONCONF_GATE_NOT_BOOLEAN",
            SchemaError::MissingRule { .. } => "ADDONCONF_MISSING_RULE",
            SchemaError::ForeignGate { .. } => "ADDONCONF_FOREIGN_GATE",
            SchemaError::EmptyRange { .. } => "ADDONCONF_EMPTY_RANGE",
            SchemaError::EmptySelection { .. } => "ADDONCONF_EMPTY_SELECTION",
            SchemaError::InvalidDefault { .. } => "ADDONCONF_INVALID_DEFAULT",
            SchemaError::UnknownAddon(_) => "ADDONCONF_UNKNOWN_ADDON",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            SchemaError::UnknownAddon(_) => Severity::Reject,
            _ => Severity::Fatal,
        }
    }

    /// Returns whether this is a schema-build failure
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;
