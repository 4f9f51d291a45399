//! Gamepad button masks
//!
//! Bit positions follow the firmware's gamepad state word. `0` is the
//! conventional "no button assigned" value.

use crate::schema::BitmaskOption;

/// Every bindable button, plus "None"
pub static BUTTON_MASKS: [BitmaskOption; 19] = [
    BitmaskOption::new("None", 0),
    BitmaskOption::new("B1", 1 << 0),
    BitmaskOption::new("B2", 1 << 1),
    BitmaskOption::new("B3", 1 << 2),
    BitmaskOption::new("B4", 1 << 3),
    BitmaskOption::new("L1", 1 << 4),
    BitmaskOption::new("R1", 1 << 5),
    BitmaskOption::new("L2", 1 << 6),
    BitmaskOption::new("R2", 1 << 7),
    BitmaskOption::new("S1", 1 << 8),
    BitmaskOption::new("S2", 1 << 9),
    BitmaskOption::new("L3", 1 << 10),
    BitmaskOption::new("R3", 1 << 11),
    BitmaskOption::new("A1", 1 << 12),
    BitmaskOption::new("A2", 1 << 13),
    BitmaskOption::new("Up", 1 << 16),
    BitmaskOption::new("Down", 1 << 17),
    BitmaskOption::new("Left", 1 << 18),
    BitmaskOption::new("Right", 1 << 19),
];

/// Looks up an option by its label (case-insensitive)
pub fn mask_by_label(label: &str) -> Option<&'static BitmaskOption> {
    BUTTON_MASKS.iter().find(|o| o.label.eq_ignore_ascii_case(label))
}

/// Whether the I2C mapper accepts `value` as a button binding
///
/// Only single enumerated buttons are bindable; the reserved bit `1 << 31`
/// and combined masks are not members.
pub fn is_i2c_selectable(value: i64) -> bool {
    BUTTON_MASKS.iter().any(|o| o.value == value)
}
