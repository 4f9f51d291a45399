//! Device transport
//!
//! Loading and saving go through the `DeviceLink` trait. The core treats a
//! link as a black box: a load returns a full snapshot or fails outright, a
//! save succeeds or fails. No retries, no partial merges.

mod errors;
mod file;
mod memory;

pub use errors::{TransportError, TransportResult};
pub use file::FileDeviceLink;
pub use memory::MemoryDeviceLink;

use crate::i2c_maps::I2cMapTable;
use crate::state::ConfigurationObject;

/// Connection to a device's configuration store
pub trait DeviceLink {
    /// Fetches the current configuration snapshot
    fn load_configuration(&self) -> TransportResult<ConfigurationObject>;

    /// Writes a full configuration snapshot
    fn save_configuration(&mut self, config: &ConfigurationObject) -> TransportResult<()>;

    /// Fetches the I2C mapper action table
    fn load_i2c_maps(&self) -> TransportResult<I2cMapTable>;

    /// Writes the I2C mapper action table
    fn save_i2c_maps(&mut self, maps: &I2cMapTable) -> TransportResult<()>;
}
