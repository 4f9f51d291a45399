//! I2C mapper addon
//!
//! Only the gate is a scalar setting. The action table itself is a separate
//! document, see [`crate::i2c_maps`].

use crate::schema::{Addon, FieldDescriptor};

/// Addon id
pub const I2C_MAPPER: &str = "i2c-mapper";
/// Gate field
pub const I2C_MAPPER_GATE: &str = "I2CMapperAddonEnabled";

pub fn i2c_mapper() -> Addon {
    Addon::new(
        I2C_MAPPER,
        "I2C Mapper",
        I2C_MAPPER_GATE,
        vec![FieldDescriptor::gate(I2C_MAPPER_GATE, "I2C Mapper Add-On Enabled")],
    )
}
