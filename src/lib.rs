//! addonconf - addon configuration schema and validation
//!
//! Field descriptors and rules for the device's addons, a registry that
//! merges their defaults, a validator that reports per-field violations and
//! a reducer that produces new configuration snapshots from edits.

pub mod addons;
pub mod buttons;
pub mod cli;
pub mod i2c_maps;
pub mod profile;
pub mod schema;
pub mod session;
pub mod state;
pub mod transport;
