//! File-backed device link
//!
//! Stores the configuration snapshot and the I2C map table as JSON files,
//! standing in for the device's own storage.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

use super::errors::{TransportError, TransportResult};
use super::DeviceLink;
use crate::i2c_maps::I2cMapTable;
use crate::state::ConfigurationObject;

/// Device link reading and writing JSON files
#[derive(Debug, Clone)]
pub struct FileDeviceLink {
    config_path: PathBuf,
    maps_path: Option<PathBuf>,
}

impl FileDeviceLink {
    /// Creates a link for the given configuration file
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            maps_path: None,
        }
    }

    /// Also stores the I2C map table at `path`
    pub fn with_i2c_maps(mut self, path: impl Into<PathBuf>) -> Self {
        self.maps_path = Some(path.into());
        self
    }

    /// Returns the configuration file path
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Whether a snapshot has been written yet
    pub fn exists(&self) -> bool {
        self.config_path.exists()
    }
}

impl DeviceLink for FileDeviceLink {
    fn load_configuration(&self) -> TransportResult<ConfigurationObject> {
        let config: ConfigurationObject = read_json(&self.config_path)?;
        info!(path = %self.config_path.display(), fields = config.len(), "configuration loaded");
        Ok(config)
    }

    fn save_configuration(&mut self, config: &ConfigurationObject) -> TransportResult<()> {
        write_json(&self.config_path, config)?;
        info!(path = %self.config_path.display(), fields = config.len(), "configuration saved");
        Ok(())
    }

    fn load_i2c_maps(&self) -> TransportResult<I2cMapTable> {
        match &self.maps_path {
            // No table stored yet: the device starts with no bindings
            Some(path) if !path.exists() => Ok(I2cMapTable::default()),
            Some(path) => read_json(path),
            None => Err(TransportError::LoadFailed(
                "no I2C map file configured".to_string(),
            )),
        }
    }

    fn save_i2c_maps(&mut self, maps: &I2cMapTable) -> TransportResult<()> {
        let path = self.maps_path.as_ref().ok_or_else(|| {
            TransportError::SaveFailed("no I2C map file configured".to_string())
        })?;
        write_json(path, maps)?;
        info!(path = %path.display(), entries = maps.maps.len(), "i2c maps saved");
        Ok(())
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> TransportResult<T> {
    let content = fs::read_to_string(path).map_err(|e| {
        TransportError::LoadFailed(format!("{}: {}", path.display(), e))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        TransportError::LoadFailed(format!("{}: invalid JSON: {}", path.display(), e))
    })
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> TransportResult<()> {
    let content = serde_json::to_string_pretty(value).map_err(|e| {
        TransportError::SaveFailed(format!("{}: {}", path.display(), e))
    })?;

    // Write and fsync a sibling temp file, then rename over the target
    let tmp = path.with_extension("json.tmp");
    let result = write_synced(&tmp, content.as_bytes()).and_then(|_| fs::rename(&tmp, path));
    if let Err(e) = result {
        let _ = fs::remove_file(&tmp);
        return Err(TransportError::SaveFailed(format!("{}: {}", path.display(), e)));
    }
    Ok(())
}

fn write_synced(path: &Path, content: &[u8]) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    file.write_all(content)?;
    file.sync_all()
}
