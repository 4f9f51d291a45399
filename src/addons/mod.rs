//! Built-in addon definitions
//!
//! One canonical field set per addon. Earlier firmware revisions shipped
//! separate start-led and credit-led addons; their settings live on in
//! coin-leds and they are not registered.

mod amplifier;
mod coin_leds;
mod i2c_mapper;
mod pc_control;

use crate::schema::Addon;

pub use amplifier::{amplifier_control, AMPLIFIER_CONTROL, AMPLIFIER_GATE};
pub use coin_leds::{coin_leds, COIN_LEDS, COIN_LEDS_GATE};
pub use i2c_mapper::{i2c_mapper, I2C_MAPPER, I2C_MAPPER_GATE};
pub use pc_control::{pc_control, PC_CONTROL, PC_CONTROL_GATE};

/// Returns every built-in addon in display order
pub fn builtin() -> Vec<Addon> {
    vec![coin_leds(), i2c_mapper(), pc_control(), amplifier_control()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::AddonRegistry;

    #[test]
    fn test_builtin_registry_builds() {
        let registry = AddonRegistry::builtin().unwrap();
        assert_eq!(registry.addon_count(), 4);
        assert_eq!(
            registry.addons().map(|a| a.id.as_str()).collect::<Vec<_>>(),
            vec![COIN_LEDS, I2C_MAPPER, PC_CONTROL, AMPLIFIER_CONTROL]
        );
    }

    #[test]
    fn test_every_builtin_gate_defaults_to_disabled() {
        let registry = AddonRegistry::builtin().unwrap();
        let state = registry.merged_default_state();
        for addon in registry.addons() {
            assert!(!addon.is_enabled(&state), "{} enabled by default", addon.id);
        }
    }

    #[test]
    fn test_builtin_field_count() {
        let registry = AddonRegistry::builtin().unwrap();
        // 15 coin-leds + 1 i2c-mapper + 5 pc-control + 7 amplifier
        assert_eq!(registry.field_count(), 28);
    }
}
