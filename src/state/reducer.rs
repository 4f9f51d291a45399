//! State reducer: folds edits into new configuration snapshots
//!
//! Every operation takes the current snapshot by reference and returns a new
//! one. Nothing here validates; disabling an addon keeps its field values so
//! they survive a later re-enable.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::schema::{AddonRegistry, SchemaError, SchemaResult};

use super::value::{ConfigurationObject, Scalar};

/// Per-addon lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AddonState {
    /// Gate falsy (initial state)
    Disabled,
    /// Gate truthy
    Enabled,
}

/// A single user edit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Edit {
    /// Set one field to a value
    SetField { name: String, value: Scalar },
    /// Flip an addon's gate
    ToggleAddon { addon: String },
}

/// Returns `state` with `name` set to `value`.
pub fn set_field(state: &ConfigurationObject, name: &str, value: impl Into<Scalar>) -> ConfigurationObject {
    let value = value.into();
    debug!(field = name, %value, "set field");
    state.with(name, value)
}

/// Flips the gate field of `addon_id`.
///
/// A missing or null gate counts as disabled and becomes `1`.
pub fn toggle_addon(
    state: &ConfigurationObject,
    registry: &AddonRegistry,
    addon_id: &str,
) -> SchemaResult<ConfigurationObject> {
    let addon = registry
        .addon(addon_id)
        .ok_or_else(|| SchemaError::UnknownAddon(addon_id.to_string()))?;

    let next = match state.get(&addon.gate) {
        Some(current) => current.flipped(),
        None => Scalar::Int(1),
    };
    debug!(addon = addon_id, gate = %addon.gate, %next, "toggle addon");

    Ok(state.with(&addon.gate, next))
}

/// Returns the lifecycle state of `addon_id` in `state`.
pub fn addon_state(
    state: &ConfigurationObject,
    registry: &AddonRegistry,
    addon_id: &str,
) -> SchemaResult<AddonState> {
    let addon = registry
        .addon(addon_id)
        .ok_or_else(|| SchemaError::UnknownAddon(addon_id.to_string()))?;

    Ok(if addon.is_enabled(state) {
        AddonState::Enabled
    } else {
        AddonState::Disabled
    })
}

/// Applies a single edit.
pub fn reduce(
    state: &ConfigurationObject,
    registry: &AddonRegistry,
    edit: &Edit,
) -> SchemaResult<ConfigurationObject> {
    match edit {
        Edit::SetField { name, value } => Ok(set_field(state, name, *value)),
        Edit::ToggleAddon { addon } => toggle_addon(state, registry, addon),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addons::{COIN_LEDS, PC_CONTROL};

    fn registry() -> AddonRegistry {
        AddonRegistry::builtin().unwrap()
    }

    #[test]
    fn test_set_field_changes_only_target() {
        let registry = registry();
        let state = registry.merged_default_state();

        let next = set_field(&state, "pcControlPowerPin", 7);

        assert_eq!(next.get("pcControlPowerPin"), Some(Scalar::Int(7)));
        for (name, value) in state.iter().filter(|(n, _)| *n != "pcControlPowerPin") {
            assert_eq!(next.entry(name), Some(value));
        }
        assert_eq!(next.len(), state.len());
    }

    #[test]
    fn test_toggle_twice_restores_gate() {
        let registry = registry();
        let state = registry.merged_default_state();

        let once = toggle_addon(&state, &registry, COIN_LEDS).unwrap();
        assert!(once.is_truthy("CoinLedsAddonEnabled"));

        let twice = toggle_addon(&once, &registry, COIN_LEDS).unwrap();
        assert_eq!(twice, state);
    }

    #[test]
    fn test_disable_keeps_dependent_values() {
        let registry = registry();
        let state = registry.merged_default_state();
        let state = toggle_addon(&state, &registry, PC_CONTROL).unwrap();
        let state = set_field(&state, "pcControlPowerPin", 12);

        let disabled = toggle_addon(&state, &registry, PC_CONTROL).unwrap();

        assert_eq!(addon_state(&disabled, &registry, PC_CONTROL).unwrap(), AddonState::Disabled);
        assert_eq!(disabled.get("pcControlPowerPin"), Some(Scalar::Int(12)));
    }

    #[test]
    fn test_toggle_unknown_addon() {
        let registry = registry();
        let state = registry.merged_default_state();

        let result = toggle_addon(&state, &registry, "fog-machine");
        assert!(matches!(result, Err(SchemaError::UnknownAddon(_))));
    }

    #[test]
    fn test_toggle_missing_gate_enables() {
        let registry = registry();
        let state = ConfigurationObject::new();

        let next = toggle_addon(&state, &registry, PC_CONTROL).unwrap();
        assert_eq!(next.get("PcControlAddonEnabled"), Some(Scalar::Int(1)));
    }

    #[test]
    fn test_initial_state_is_disabled() {
        let registry = registry();
        let state = registry.merged_default_state();
        for addon in registry.addons() {
            assert_eq!(addon_state(&state, &registry, &addon.id).unwrap(), AddonState::Disabled);
        }
    }

    #[test]
    fn test_reduce_dispatch() {
        let registry = registry();
        let state = registry.merged_default_state();

        let edits: Vec<Edit> = serde_json::from_str(
            r#"[
                {"op": "toggle_addon", "addon": "pc-control"},
                {"op": "set_field", "name": "pcControlButtonMask1", "value": 512}
            ]"#,
        )
        .unwrap();

        let mut current = state;
        for edit in &edits {
            current = reduce(&current, &registry, edit).unwrap();
        }

        assert!(current.is_truthy("PcControlAddonEnabled"));
        assert_eq!(current.get("pcControlButtonMask1"), Some(Scalar::Int(512)));
    }
}
