//! In-memory device link
//!
//! Keeps the last saved snapshot in memory. Loads and saves can be forced to
//! fail to exercise error paths.

use super::errors::{TransportError, TransportResult};
use super::DeviceLink;
use crate::i2c_maps::I2cMapTable;
use crate::state::ConfigurationObject;

#[derive(Debug, Clone, Default)]
pub struct MemoryDeviceLink {
    config: Option<ConfigurationObject>,
    maps: I2cMapTable,
    fail_loads: bool,
    fail_saves: bool,
    saves: usize,
}

impl MemoryDeviceLink {
    /// Creates a link with nothing stored
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a link holding `config`
    pub fn with_config(config: ConfigurationObject) -> Self {
        Self {
            config: Some(config),
            ..Self::default()
        }
    }

    /// Makes every subsequent load fail
    pub fn fail_loads(&mut self, fail: bool) {
        self.fail_loads = fail;
    }

    /// Makes every subsequent save fail
    pub fn fail_saves(&mut self, fail: bool) {
        self.fail_saves = fail;
    }

    /// Last saved (or seeded) snapshot
    pub fn stored(&self) -> Option<&ConfigurationObject> {
        self.config.as_ref()
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl DeviceLink for MemoryDeviceLink {
    fn load_configuration(&self) -> TransportResult<ConfigurationObject> {
        if self.fail_loads {
            return Err(TransportError::LoadFailed("device unreachable".to_string()));
        }
        self.config
            .clone()
            .ok_or_else(|| TransportError::LoadFailed("no configuration stored".to_string()))
    }

    fn save_configuration(&mut self, config: &ConfigurationObject) -> TransportResult<()> {
        if self.fail_saves {
            return Err(TransportError::SaveFailed("device unreachable".to_string()));
        }
        self.config = Some(config.clone());
        self.saves += 1;
        Ok(())
    }

    fn load_i2c_maps(&self) -> TransportResult<I2cMapTable> {
        if self.fail_loads {
            return Err(TransportError::LoadFailed("device unreachable".to_string()));
        }
        Ok(self.maps.clone())
    }

    fn save_i2c_maps(&mut self, maps: &I2cMapTable) -> TransportResult<()> {
        if self.fail_saves {
            return Err(TransportError::SaveFailed("device unreachable".to_string()));
        }
        self.maps = maps.clone();
        Ok(())
    }
}
