//! CLI argument definitions using clap
//!
//! Commands:
//! - addonconf init --config <path>
//! - addonconf defaults [--profile <path>]
//! - addonconf fields <addon>
//! - addonconf status --config <path>
//! - addonconf validate --config <path>
//! - addonconf set --config <path> <field> <value>
//! - addonconf toggle --config <path> <addon>
//! - addonconf maps --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// addonconf - addon configuration checker for gamepad controller boards
#[derive(Parser, Debug)]
#[command(name = "addonconf")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error); falls back to LOG_LEVEL
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write the default configuration (board profile applied) to the device file
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./addonconf.json")]
        config: PathBuf,
    },

    /// Print the merged default configuration
    Defaults {
        /// Board profile to apply on top of the defaults
        #[arg(long)]
        profile: Option<PathBuf>,
    },

    /// Print an addon's field descriptors and value hints
    Fields {
        /// Addon id (coin-leds, i2c-mapper, pc-control, amplifier-control)
        addon: String,
    },

    /// Print which addons are enabled on the device
    Status {
        /// Path to configuration file
        #[arg(long, default_value = "./addonconf.json")]
        config: PathBuf,
    },

    /// Validate the device configuration
    Validate {
        /// Path to configuration file
        #[arg(long, default_value = "./addonconf.json")]
        config: PathBuf,
    },

    /// Set one field and save if the result is valid
    Set {
        /// Path to configuration file
        #[arg(long, default_value = "./addonconf.json")]
        config: PathBuf,

        /// Field name
        field: String,

        /// New value (integer, true/false, or a button label for mask fields)
        value: String,
    },

    /// Enable or disable an addon and save if the result is valid
    Toggle {
        /// Path to configuration file
        #[arg(long, default_value = "./addonconf.json")]
        config: PathBuf,

        /// Addon id
        addon: String,
    },

    /// Validate the I2C mapper action table
    Maps {
        /// Path to configuration file
        #[arg(long, default_value = "./addonconf.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
