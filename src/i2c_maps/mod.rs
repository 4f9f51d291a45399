//! I2C mapper action table
//!
//! Each entry binds up to two buttons to a three-byte command sent to a
//! device address on the I2C bus. The table is fetched and stored as its own
//! document (`{"maps": [...]}`), separate from the flat configuration, and
//! only checked while the i2c-mapper addon is enabled.

use serde::{Deserialize, Serialize};

use crate::addons::I2C_MAPPER_GATE;
use crate::buttons::is_i2c_selectable;
use crate::schema::{Violation, ViolationReport};
use crate::state::ConfigurationObject;

/// Maximum number of entries the firmware stores
pub const I2C_MAP_COUNT: usize = 12;
/// Upper bound of addresses and command bytes
pub const I2C_BYTE_MAX: i64 = 255;

/// One button-to-command binding
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct I2cMap {
    pub address: i64,
    pub command1: i64,
    pub command2: i64,
    pub command3: i64,
    pub button_mask1: i64,
    pub button_mask2: i64,
}

impl I2cMap {
    fn bytes(&self) -> [(&'static str, i64); 4] {
        [
            ("address", self.address),
            ("command1", self.command1),
            ("command2", self.command2),
            ("command3", self.command3),
        ]
    }

    fn masks(&self) -> [(&'static str, i64); 2] {
        [("buttonMask1", self.button_mask1), ("buttonMask2", self.button_mask2)]
    }
}

/// The full action table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct I2cMapTable {
    #[serde(default)]
    pub maps: Vec<I2cMap>,
}

impl I2cMapTable {
    /// Creates a table from entries
    pub fn new(maps: Vec<I2cMap>) -> Self {
        Self { maps }
    }

    /// Returns a copy with entry `index` replaced, or `None` if out of bounds
    pub fn with_entry(&self, index: usize, entry: I2cMap) -> Option<Self> {
        let mut next = self.clone();
        *next.maps.get_mut(index)? = entry;
        Some(next)
    }

    /// Validates the table against the gate in `state`.
    ///
    /// Violations are keyed by path, e.g. `maps[2].command1`.
    pub fn validate(&self, state: &ConfigurationObject) -> ViolationReport {
        let mut report = ViolationReport::new();
        report.touch("maps");

        for (i, map) in self.maps.iter().enumerate() {
            for (name, _) in map.bytes().iter().chain(map.masks().iter()) {
                report.touch(&entry_path(i, name));
            }
        }

        if !state.is_truthy(I2C_MAPPER_GATE) {
            return report;
        }

        if self.maps.len() > I2C_MAP_COUNT {
            report.record(
                "maps",
                Violation::TooManyEntries {
                    max: I2C_MAP_COUNT,
                    actual: self.maps.len(),
                },
            );
        }

        for (i, map) in self.maps.iter().enumerate() {
            for (name, value) in map.bytes() {
                if !(0..=I2C_BYTE_MAX).contains(&value) {
                    report.record(
                        &entry_path(i, name),
                        Violation::OutOfRange {
                            min: 0,
                            max: I2C_BYTE_MAX,
                            actual: value,
                        },
                    );
                }
            }
            for (name, value) in map.masks() {
                if !is_i2c_selectable(value) {
                    report.record(&entry_path(i, name), Violation::NotSelectable { actual: value });
                }
            }
        }

        report
    }
}

fn entry_path(index: usize, field: &str) -> String {
    format!("maps[{}].{}", index, field)
}
