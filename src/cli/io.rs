//! JSON output for the CLI
//!
//! Every command writes a single JSON object to stdout:
//! `{"status": "ok", "data": ...}` or `{"status": "error", ...}`.
//! Logs go to stderr.

use std::io::{self, Write};

use serde_json::Value;

use super::errors::CliResult;

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });
    write_value(&response)
}

/// Write an error response to stdout
pub fn write_error(code: &str, message: &str, data: Option<Value>) -> CliResult<()> {
    write_value(&error_response(code, message, data))
}

/// Build the error envelope
pub fn error_response(code: &str, message: &str, data: Option<Value>) -> Value {
    let mut response = serde_json::json!({
        "status": "error",
        "code": code,
        "message": message
    });
    if let Some(data) = data {
        response["data"] = data;
    }
    response
}

fn write_value(value: &Value) -> CliResult<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}
