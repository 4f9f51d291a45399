//! CLI-specific error types
//!
//! Every CLI error ends the process with a non-zero exit code.

use std::fmt;
use std::io;

use serde_json::{json, Map, Value};

use crate::profile::ProfileError;
use crate::schema::{SchemaError, ViolationReport};
use crate::session::SessionError;
use crate::transport::TransportError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Tool configuration file error
    ConfigError,
    /// I/O error (stdout)
    IoError,
    /// Device file already exists
    AlreadyInitialized,
    /// Addon definitions or lookups failed
    SchemaError,
    /// Device load/save failed
    TransportError,
    /// Configuration has violations
    ValidationFailed,
    /// Bad command argument
    InvalidArgument,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "ADDONCONF_CLI_CONFIG_ERROR",
            Self::IoError => "ADDONCONF_CLI_IO_ERROR",
            Self::AlreadyInitialized => "ADDONCONF_CLI_ALREADY_INITIALIZED",
            Self::SchemaError => "ADDONCONF_CLI_SCHEMA_ERROR",
            Self::TransportError => "ADDONCONF_CLI_TRANSPORT_ERROR",
            Self::ValidationFailed => "ADDONCONF_CLI_VALIDATION_FAILED",
            Self::InvalidArgument => "ADDONCONF_CLI_INVALID_ARGUMENT",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
    data: Option<Value>,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Attaches structured detail to the error response
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Already initialized
    pub fn already_initialized(path: impl fmt::Display) -> Self {
        Self::new(
            CliErrorCode::AlreadyInitialized,
            format!("Device configuration '{}' already exists", path),
        )
    }

    /// Validation failed
    pub fn validation_failed(count: usize) -> Self {
        Self::new(
            CliErrorCode::ValidationFailed,
            format!("{} violation(s) found", count),
        )
    }

    /// Validation failed, with every violated field in the response data
    pub fn violations(report: &ViolationReport) -> Self {
        let fields: Map<String, Value> = report
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(field, violations)| {
                let entries = violations
                    .iter()
                    .map(|v| json!({ "reason": v.code(), "message": v.to_string() }))
                    .collect();
                (field.to_string(), Value::Array(entries))
            })
            .collect();

        Self::validation_failed(report.violation_count()).with_data(Value::Object(fields))
    }

    /// Invalid argument
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InvalidArgument, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the response data, if any
    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<SchemaError> for CliError {
    fn from(e: SchemaError) -> Self {
        Self::new(CliErrorCode::SchemaError, e.to_string())
    }
}

impl From<TransportError> for CliError {
    fn from(e: TransportError) -> Self {
        Self::new(CliErrorCode::TransportError, e.to_string())
    }
}

impl From<ProfileError> for CliError {
    fn from(e: ProfileError) -> Self {
        Self::config_error(e.to_string())
    }
}

impl From<SessionError> for CliError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::Transport(e) => e.into(),
            SessionError::Schema(e) => e.into(),
            SessionError::Invalid(report) => Self::violations(&report),
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
