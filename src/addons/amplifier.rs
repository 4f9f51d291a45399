//! Home-theater amplifier control addon
//!
//! Emulates the amplifier's wired remote: power, volume and mute lines plus
//! a power-state sense input. Field names keep the `z680` prefix the device
//! firmware uses.

use crate::buttons::BUTTON_MASKS;
use crate::schema::{Addon, FieldDescriptor};

/// Addon id
pub const AMPLIFIER_CONTROL: &str = "amplifier-control";
/// Gate field
pub const AMPLIFIER_GATE: &str = "Z680AddonEnabled";

pub fn amplifier_control() -> Addon {
    let gate = AMPLIFIER_GATE;
    Addon::new(
        AMPLIFIER_CONTROL,
        "Amplifier Control",
        gate,
        vec![
            FieldDescriptor::gate(gate, "Z680 Enabled"),
            FieldDescriptor::pin("z680PowerPin", "Z680 Power Pin", gate),
            FieldDescriptor::pin("z680VolumeUpPin", "Z680 Volume Up Pin", gate),
            FieldDescriptor::pin("z680VolumeDownPin", "Z680 Volume Down Pin", gate),
            FieldDescriptor::pin("z680MutePin", "Z680 Mute Pin", gate),
            FieldDescriptor::pin("z680PowerStatePin", "Z680 Power State Pin", gate),
            FieldDescriptor::selection("z680ButtonMask", "Z680 Button Mask", gate, &BUTTON_MASKS, 0),
        ],
    )
}
