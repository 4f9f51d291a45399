//! Validation Property Tests
//!
//! Properties of the built-in addon registry:
//! - A disabled addon never reports violations
//! - Pins must lie in [-1, 29] and be unique across enabled addons
//! - Brightness must lie in [0, 100]
//! - Selections must be members of their option list
//! - Edits only touch the field they name
//! - Validation is deterministic

use addonconf::addons::{AMPLIFIER_CONTROL, COIN_LEDS, PC_CONTROL};
use addonconf::schema::{
    AddonRegistry, FieldDescriptor, RuleKind, Violation, BRIGHTNESS_MAX, BRIGHTNESS_MIN,
};
use addonconf::state::{set_field, toggle_addon, ConfigurationObject, Scalar};

// =============================================================================
// Helper Functions
// =============================================================================

fn registry() -> AddonRegistry {
    AddonRegistry::builtin().unwrap()
}

/// Merged defaults with every addon enabled.
fn all_enabled(registry: &AddonRegistry) -> ConfigurationObject {
    let mut state = registry.merged_default_state();
    for addon in registry.addons() {
        state = state.with(&addon.gate, Scalar::Int(1));
    }
    state
}

fn is_brightness(field: &FieldDescriptor) -> bool {
    matches!(
        field.rule,
        RuleKind::RangeWhenEnabled { min: BRIGHTNESS_MIN, max: BRIGHTNESS_MAX, .. }
    )
}

// =============================================================================
// Gate Tests
// =============================================================================

/// Defaults validate with every addon enabled and disabled.
#[test]
fn test_defaults_are_valid() {
    let registry = registry();

    assert!(registry.validate(&registry.merged_default_state()).is_clean());
    assert!(registry.validate(&all_enabled(&registry)).is_clean());
}

/// Garbage in a disabled addon is ignored, duplicates included.
#[test]
fn test_disabled_addons_are_exempt() {
    let registry = registry();
    let mut state = registry.merged_default_state();
    for addon in registry.addons() {
        for field in addon.dependent_fields() {
            state = state.with(&field.name, Scalar::Int(99));
        }
    }

    let report = registry.validate(&state);
    assert!(report.is_clean());
    assert_eq!(report.len(), registry.field_count());
}

/// Boolean gates are honored like 0/1 gates.
#[test]
fn test_boolean_gate() {
    let registry = registry();
    let state = registry
        .merged_default_state()
        .with("PcControlAddonEnabled", Scalar::Bool(true))
        .with("pcControlPowerPin", Scalar::Int(30));

    let report = registry.validate(&state);
    assert_eq!(report.invalid_fields().collect::<Vec<_>>(), vec!["pcControlPowerPin"]);

    let off = state.with("PcControlAddonEnabled", Scalar::Bool(false));
    assert!(registry.validate(&off).is_clean());
}

/// Null pins and masks on an enabled addon are required, not unassigned.
#[test]
fn test_null_fields_are_required() {
    let registry = registry();
    let snapshot: ConfigurationObject = serde_json::from_value(serde_json::json!({
        "z680PowerPin": null,
        "pcControlButtonMask1": null,
    }))
    .unwrap();
    let state = all_enabled(&registry)
        .overlay(&snapshot)
        .with("z680MutePin", Scalar::Int(5))
        .with("pcControlPowerPin", Scalar::Int(5));

    let report = registry.validate(&state);
    assert_eq!(report.violations_for("z680PowerPin"), &[Violation::Required]);
    assert_eq!(report.violations_for("pcControlButtonMask1"), &[Violation::Required]);
    assert!(matches!(
        report.violations_for("z680MutePin"),
        [Violation::DuplicatePin { pin: 5, shared_with }] if shared_with == &["pcControlPowerPin"]
    ));
    assert_eq!(report.violation_count(), 4);

    let disabled = state.with("Z680AddonEnabled", Scalar::Int(0));
    let report = registry.validate(&disabled);
    assert!(report.violations_for("z680PowerPin").is_empty());
    assert!(report.violations_for("pcControlPowerPin").is_empty());
}

/// Booleans in numeric fields are a type violation.
#[test]
fn test_boolean_in_pin_field() {
    let registry = registry();
    let state = all_enabled(&registry).with("pcControlPowerPin", Scalar::Bool(true));

    let report = registry.validate(&state);
    assert_eq!(
        report.violations_for("pcControlPowerPin"),
        &[Violation::WrongType { expected: "pin" }]
    );
}

// =============================================================================
// Range Tests
// =============================================================================

/// Every pin field rejects values outside [-1, 29].
#[test]
fn test_every_pin_field_range() {
    let registry = registry();
    let base = all_enabled(&registry);

    for addon in registry.addons() {
        for field in addon.dependent_fields().filter(|f| f.is_pin()) {
            for bad in [-2, 30] {
                let report = registry.validate(&base.with(&field.name, Scalar::Int(bad)));
                assert_eq!(
                    report.violations_for(&field.name),
                    &[Violation::OutOfRange { min: -1, max: 29, actual: bad }],
                    "{} accepted {}",
                    field.name,
                    bad
                );
                assert_eq!(report.violation_count(), 1);
            }

            let report = registry.validate(&base.with(&field.name, Scalar::Int(-1)));
            assert!(report.is_clean(), "{} rejected -1", field.name);
        }
    }
}

/// Every brightness field accepts its bounds and rejects one past them.
#[test]
fn test_every_brightness_field_range() {
    let registry = registry();
    let base = all_enabled(&registry);
    let fields: Vec<_> = registry
        .addons()
        .flat_map(|a| a.dependent_fields())
        .filter(|f| is_brightness(f))
        .collect();
    assert_eq!(fields.len(), 3);

    for field in fields {
        for ok in [0, 100] {
            assert!(registry.validate(&base.with(&field.name, Scalar::Int(ok))).is_clean());
        }
        for bad in [-1, 101] {
            let report = registry.validate(&base.with(&field.name, Scalar::Int(bad)));
            assert_eq!(report.violations_for(&field.name)[0].code(), "out_of_range");
        }
    }
}

// =============================================================================
// Selection Tests
// =============================================================================

/// Every enumerated value is accepted, anything else is not.
#[test]
fn test_every_selection_field_membership() {
    let registry = registry();
    let base = all_enabled(&registry);
    let mut checked = 0;

    for addon in registry.addons() {
        for field in addon.dependent_fields() {
            let allowed = match &field.rule {
                RuleKind::SelectionWhenEnabled { allowed, .. } => *allowed,
                _ => continue,
            };
            checked += 1;

            for option in allowed {
                let state = base.with(&field.name, Scalar::Int(option.value));
                assert!(registry.validate(&state).is_clean(), "{} rejected {}", field.name, option.label);
            }

            // 3 = B1|B2 is not a single option
            let report = registry.validate(&base.with(&field.name, Scalar::Int(3)));
            assert_eq!(
                report.violations_for(&field.name),
                &[Violation::NotSelectable { actual: 3 }]
            );
        }
    }

    assert_eq!(checked, 3);
}

// =============================================================================
// Pin Uniqueness Tests
// =============================================================================

/// Same pin on two enabled addons flags both fields until one moves.
#[test]
fn test_cross_addon_pin_uniqueness() {
    let registry = registry();
    let mut state = registry.merged_default_state();
    state = toggle_addon(&state, &registry, PC_CONTROL).unwrap();
    state = toggle_addon(&state, &registry, AMPLIFIER_CONTROL).unwrap();
    state = set_field(&state, "pcControlPowerPin", 5);
    state = set_field(&state, "z680PowerPin", 5);

    let report = registry.validate(&state);
    assert_eq!(
        report.invalid_fields().collect::<Vec<_>>(),
        vec!["pcControlPowerPin", "z680PowerPin"]
    );
    assert!(matches!(
        report.violations_for("z680PowerPin"),
        [Violation::DuplicatePin { pin: 5, .. }]
    ));

    let fixed = set_field(&state, "z680PowerPin", 6);
    assert!(registry.validate(&fixed).is_clean());
}

/// A disabled addon's pins do not collide with enabled ones.
#[test]
fn test_disabled_pins_do_not_collide() {
    let registry = registry();
    let mut state = registry.merged_default_state();
    state = toggle_addon(&state, &registry, COIN_LEDS).unwrap();
    state = set_field(&state, "coinLedsMarqueePin", 12);
    state = set_field(&state, "pcControlPowerPin", 12);

    assert!(registry.validate(&state).is_clean());

    let state = toggle_addon(&state, &registry, PC_CONTROL).unwrap();
    assert_eq!(registry.validate(&state).violation_count(), 2);
}

/// Pins inside one addon must also differ.
#[test]
fn test_pin_uniqueness_within_addon() {
    let registry = registry();
    let state = all_enabled(&registry)
        .with("coinLedsStartPin1", Scalar::Int(17))
        .with("coinLedsStartPin2", Scalar::Int(17));

    let report = registry.validate(&state);
    assert_eq!(
        report.invalid_fields().collect::<Vec<_>>(),
        vec!["coinLedsStartPin1", "coinLedsStartPin2"]
    );
}

// =============================================================================
// Reducer Tests
// =============================================================================

/// set_field changes exactly one key.
#[test]
fn test_set_field_changes_only_that_field() {
    let registry = registry();
    let before = registry.merged_default_state();
    let after = set_field(&before, "z680MutePin", 7);

    assert_eq!(after.get("z680MutePin"), Some(Scalar::Int(7)));
    for (name, value) in before.iter().filter(|(n, _)| *n != "z680MutePin") {
        assert_eq!(after.entry(name), Some(value));
    }
    assert_eq!(before.get("z680MutePin"), Some(Scalar::Int(-1)));
}

/// Toggling twice restores the gate and never touches other fields.
#[test]
fn test_toggle_twice_restores_gate() {
    let registry = registry();
    let before = set_field(&registry.merged_default_state(), "coinLedsMarqueePin", 40);

    for addon in registry.addons() {
        let once = toggle_addon(&before, &registry, &addon.id).unwrap();
        assert_ne!(once.get(&addon.gate), before.get(&addon.gate));
        assert_eq!(once.get("coinLedsMarqueePin"), Some(Scalar::Int(40)));

        let twice = toggle_addon(&once, &registry, &addon.id).unwrap();
        assert_eq!(twice, before);
    }
}

/// Unknown addon ids are rejected without producing a state.
#[test]
fn test_toggle_unknown_addon() {
    let registry = registry();
    let err = toggle_addon(&registry.merged_default_state(), &registry, "fog-machine").unwrap_err();
    assert_eq!(err.code(), "ADDONCONF_UNKNOWN_ADDON");
}

// =============================================================================
// Determinism Tests
// =============================================================================

/// Repeated validation of the same state yields the same report.
#[test]
fn test_validation_is_deterministic() {
    let registry = registry();
    let state = all_enabled(&registry)
        .with("pcControlPowerPin", Scalar::Int(3))
        .with("z680MutePin", Scalar::Int(3))
        .with("coinLedsCoinBrightness", Scalar::Int(120))
        .with("z680ButtonMask", Scalar::Int(6));

    let first = registry.validate(&state);
    for _ in 0..100 {
        assert_eq!(registry.validate(&state), first);
    }
    assert_eq!(first.violation_count(), 4);
}
