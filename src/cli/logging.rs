//! Log subscriber setup
//!
//! Logs go to stderr so stdout stays a single JSON document.

use std::io;

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use super::errors::{CliError, CliResult};

/// Installs the global fmt subscriber.
///
/// The level comes from `--log-level`, then `LOG_LEVEL`, defaulting to info.
pub fn init_tracing(level: Option<&str>) -> CliResult<()> {
    let level = level
        .map(str::to_string)
        .or_else(|| std::env::var("LOG_LEVEL").ok())
        .unwrap_or_else(|| "info".to_string());

    let subscriber = FmtSubscriber::builder()
        .with_max_level(parse_level(&level))
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| CliError::config_error(format!("Failed to install logger: {}", e)))
}

fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("DEBUG"), Level::DEBUG);
        assert_eq!(parse_level("warn"), Level::WARN);
        assert_eq!(parse_level("verbose"), Level::INFO);
    }
}
