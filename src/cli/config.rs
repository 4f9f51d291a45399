//! Tool configuration file
//!
//! ```json
//! {
//!   "device_config": "device.json",
//!   "i2c_maps": "i2c_maps.json",
//!   "board_profile": "profiles/mk2cab-a.json"
//! }
//! ```
//!
//! Relative paths are resolved against the directory holding the file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::profile::BoardProfile;
use crate::schema::AddonRegistry;
use crate::state::ConfigurationObject;
use crate::transport::FileDeviceLink;

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Device configuration snapshot (required)
    pub device_config: String,

    /// I2C mapper action table (optional)
    #[serde(default)]
    pub i2c_maps: Option<String>,

    /// Board profile used by `init` (optional)
    #[serde(default)]
    pub board_profile: Option<String>,

    #[serde(skip)]
    base_dir: PathBuf,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let mut config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    fn validate(&self) -> CliResult<()> {
        if self.device_config.trim().is_empty() {
            return Err(CliError::config_error("device_config must not be empty"));
        }

        if self.i2c_maps.as_deref() == Some(self.device_config.as_str()) {
            return Err(CliError::config_error(
                "i2c_maps must not point at the device_config file",
            ));
        }

        Ok(())
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// Device configuration path
    pub fn device_path(&self) -> PathBuf {
        self.resolve(&self.device_config)
    }

    /// Builds the device link described by this configuration
    pub fn link(&self) -> FileDeviceLink {
        let link = FileDeviceLink::new(self.device_path());
        match &self.i2c_maps {
            Some(maps) => link.with_i2c_maps(self.resolve(maps)),
            None => link,
        }
    }

    /// Initial device state: merged defaults with the board profile applied
    pub fn initial_state(&self, registry: &AddonRegistry) -> CliResult<ConfigurationObject> {
        match &self.board_profile {
            Some(profile) => Ok(BoardProfile::load(&self.resolve(profile))?.apply(registry)?),
            None => Ok(registry.merged_default_state()),
        }
    }
}
