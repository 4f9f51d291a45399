//! PC power control addon

use crate::buttons::BUTTON_MASKS;
use crate::schema::{Addon, FieldDescriptor};

/// Addon id
pub const PC_CONTROL: &str = "pc-control";
/// Gate field
pub const PC_CONTROL_GATE: &str = "PcControlAddonEnabled";

pub fn pc_control() -> Addon {
    let gate = PC_CONTROL_GATE;
    Addon::new(
        PC_CONTROL,
        "PC Control",
        gate,
        vec![
            FieldDescriptor::gate(gate, "PC Control Enabled"),
            FieldDescriptor::pin("pcControlPowerPin", "PC Control Power Pin", gate),
            FieldDescriptor::pin("pcControlPowerSwitchPin", "PC Control Power Switch Pin", gate),
            FieldDescriptor::selection(
                "pcControlButtonMask1",
                "PC Control Button Mask 1",
                gate,
                &BUTTON_MASKS,
                0,
            ),
            FieldDescriptor::selection(
                "pcControlButtonMask2",
                "PC Control Button Mask 2",
                gate,
                &BUTTON_MASKS,
                0,
            ),
        ],
    )
}
