//! CLI module for addonconf
//!
//! Provides command-line interface for:
//! - init: Write the initial device configuration
//! - defaults / fields: Inspect the built-in addon schema
//! - status / validate: Inspect a device configuration
//! - set / toggle: Edit a device configuration, saving only valid results
//! - maps: Check the I2C mapper action table

mod args;
mod commands;
mod config;
mod errors;
mod io;
mod logging;

pub use args::{Cli, Command};
pub use commands::{
    defaults, fields, init, maps, run, run_command, set, status, toggle, validate,
};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{error_response, write_error, write_response};
pub use logging::init_tracing;
