//! Schema type definitions for addon settings
//!
//! Supported value types:
//! - boolean: the 0/1 gate of an addon
//! - integer: bounded numeric setting (brightness)
//! - pin: hardware GPIO index, -1 meaning unassigned
//! - enum: button-mask binding chosen from a closed option list

use serde::Serialize;

use crate::state::{ConfigurationObject, Scalar};

/// Sentinel for "no pin assigned"
pub const PIN_UNASSIGNED: i64 = -1;
/// Lowest accepted pin value (the unassigned sentinel)
pub const PIN_MIN: i64 = PIN_UNASSIGNED;
/// Highest hardware pin index
pub const PIN_MAX: i64 = 29;
/// Lowest LED brightness percentage
pub const BRIGHTNESS_MIN: i64 = 0;
/// Highest LED brightness percentage
pub const BRIGHTNESS_MAX: i64 = 100;

/// Value types a field may hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// 0/1 flag
    Boolean,
    /// Plain integer
    Integer,
    /// GPIO pin index
    Pin,
    /// Member of a closed bitmask enumeration
    Enum,
}

impl ValueType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            ValueType::Boolean => "boolean",
            ValueType::Integer => "integer",
            ValueType::Pin => "pin",
            ValueType::Enum => "enum",
        }
    }
}

/// One entry of a closed button-mask enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BitmaskOption {
    /// Display label
    pub label: &'static str,
    /// Power-of-two bit, or 0 for "no button"
    pub value: i64,
}

impl BitmaskOption {
    /// Creates an option
    pub const fn new(label: &'static str, value: i64) -> Self {
        Self { label, value }
    }
}

/// Conditional rule attached to a field.
///
/// Every rule except `None` is gated: it only applies while the named
/// gate field is truthy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleKind {
    /// No constraint (gate fields)
    None,
    /// Value must be present and non-null
    RequiredWhenEnabled { gate: String },
    /// Value must lie in `min..=max`
    RangeWhenEnabled { gate: String, min: i64, max: i64 },
    /// Value must equal one of the listed options
    SelectionWhenEnabled {
        gate: String,
        allowed: &'static [BitmaskOption],
    },
    /// Value must lie in `PIN_MIN..=PIN_MAX` and not be shared with any
    /// other enabled pin field on the device
    PinUniqueWhenEnabled { gate: String },
}

impl RuleKind {
    /// Returns the gate field this rule depends on
    pub fn gate(&self) -> Option<&str> {
        match self {
            RuleKind::None => None,
            RuleKind::RequiredWhenEnabled { gate }
            | RuleKind::RangeWhenEnabled { gate, .. }
            | RuleKind::SelectionWhenEnabled { gate, .. }
            | RuleKind::PinUniqueWhenEnabled { gate } => Some(gate.as_str()),
        }
    }

    /// Returns the rule name for error messages
    pub fn rule_name(&self) -> &'static str {
        match self {
            RuleKind::None => "none",
            RuleKind::RequiredWhenEnabled { .. } => "required_when_enabled",
            RuleKind::RangeWhenEnabled { .. } => "range_when_enabled",
            RuleKind::SelectionWhenEnabled { .. } => "selection_when_enabled",
            RuleKind::PinUniqueWhenEnabled { .. } => "pin_unique_when_enabled",
        }
    }
}

/// Value-domain hint advertised to renderers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldHint {
    /// On/off switch
    Toggle,
    /// Numeric input with optional bounds
    Number {
        #[serde(skip_serializing_if = "Option::is_none")]
        min: Option<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max: Option<i64>,
    },
    /// Closed choice list
    Choice { options: &'static [BitmaskOption] },
}

/// Field descriptor: name, type, default and rule of a single setting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    /// Field name, unique across the whole device
    pub name: String,
    /// Value type
    pub value_type: ValueType,
    /// Human-readable label
    pub label: String,
    /// Default value
    pub default: Scalar,
    /// Conditional rule
    pub rule: RuleKind,
}

impl FieldDescriptor {
    /// Create an addon gate field (boolean, default disabled)
    pub fn gate(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value_type: ValueType::Boolean,
            label: label.into(),
            default: Scalar::Int(0),
            rule: RuleKind::None,
        }
    }

    /// Create a pin field, unassigned by default
    pub fn pin(name: impl Into<String>, label: impl Into<String>, gate: &str) -> Self {
        Self {
            name: name.into(),
            value_type: ValueType::Pin,
            label: label.into(),
            default: Scalar::Int(PIN_UNASSIGNED),
            rule: RuleKind::PinUniqueWhenEnabled { gate: gate.into() },
        }
    }

    /// Create a bounded integer field
    pub fn range(
        name: impl Into<String>,
        label: impl Into<String>,
        gate: &str,
        min: i64,
        max: i64,
        default: i64,
    ) -> Self {
        Self {
            name: name.into(),
            value_type: ValueType::Integer,
            label: label.into(),
            default: Scalar::Int(default),
            rule: RuleKind::RangeWhenEnabled {
                gate: gate.into(),
                min,
                max,
            },
        }
    }

    /// Create an LED brightness field (0..=100, full brightness by default)
    pub fn brightness(name: impl Into<String>, label: impl Into<String>, gate: &str) -> Self {
        Self::range(name, label, gate, BRIGHTNESS_MIN, BRIGHTNESS_MAX, BRIGHTNESS_MAX)
    }

    /// Create a selection field over a closed option list
    pub fn selection(
        name: impl Into<String>,
        label: impl Into<String>,
        gate: &str,
        allowed: &'static [BitmaskOption],
        default: i64,
    ) -> Self {
        Self {
            name: name.into(),
            value_type: ValueType::Enum,
            label: label.into(),
            default: Scalar::Int(default),
            rule: RuleKind::SelectionWhenEnabled {
                gate: gate.into(),
                allowed,
            },
        }
    }

    /// Create a field that only has to be present while enabled
    pub fn required(
        name: impl Into<String>,
        label: impl Into<String>,
        gate: &str,
        value_type: ValueType,
        default: Scalar,
    ) -> Self {
        Self {
            name: name.into(),
            value_type,
            label: label.into(),
            default,
            rule: RuleKind::RequiredWhenEnabled { gate: gate.into() },
        }
    }

    /// Returns true for fields taking part in device-wide pin uniqueness
    pub fn is_pin(&self) -> bool {
        matches!(self.rule, RuleKind::PinUniqueWhenEnabled { .. })
    }

    /// Returns the value-domain hint for renderers
    pub fn hint(&self) -> FieldHint {
        match &self.rule {
            RuleKind::PinUniqueWhenEnabled { .. } => FieldHint::Number {
                min: Some(PIN_MIN),
                max: Some(PIN_MAX),
            },
            RuleKind::RangeWhenEnabled { min, max, .. } => FieldHint::Number {
                min: Some(*min),
                max: Some(*max),
            },
            RuleKind::SelectionWhenEnabled { allowed, .. } => FieldHint::Choice { options: *allowed },
            RuleKind::None | RuleKind::RequiredWhenEnabled { .. } => match self.value_type {
                ValueType::Boolean => FieldHint::Toggle,
                _ => FieldHint::Number { min: None, max: None },
            },
        }
    }
}

/// Addon definition: an independently toggleable peripheral feature
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Addon {
    /// Stable identifier (e.g. "coin-leds")
    pub id: String,
    /// Human-readable name
    pub label: String,
    /// Name of the 0/1 field enabling this addon
    pub gate: String,
    /// Ordered field descriptors, gate included
    pub fields: Vec<FieldDescriptor>,
}

impl Addon {
    /// Create a new addon definition
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        gate: impl Into<String>,
        fields: Vec<FieldDescriptor>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            gate: gate.into(),
            fields,
        }
    }

    /// Looks up one of this addon's fields by name
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns the descriptor of the gate field
    pub fn gate_field(&self) -> Option<&FieldDescriptor> {
        self.field(&self.gate)
    }

    /// Returns every field except the gate
    pub fn dependent_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(move |f| f.name != self.gate)
    }

    /// Returns the default value of every field
    pub fn default_state(&self) -> ConfigurationObject {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.default))
            .collect()
    }

    /// Whether the addon's gate is truthy in the given state
    pub fn is_enabled(&self, state: &ConfigurationObject) -> bool {
        state.is_truthy(&self.gate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static OPTIONS: [BitmaskOption; 2] = [BitmaskOption::new("None", 0), BitmaskOption::new("B1", 1)];

    fn sample_addon() -> Addon {
        Addon::new(
            "lamp",
            "Lamp",
            "LampEnabled",
            vec![
                FieldDescriptor::gate("LampEnabled", "Lamp Enabled"),
                FieldDescriptor::pin("lampPin", "Lamp Pin", "LampEnabled"),
                FieldDescriptor::brightness("lampBrightness", "Lamp Brightness", "LampEnabled"),
                FieldDescriptor::selection("lampMask", "Lamp Button", "LampEnabled", &OPTIONS, 0),
            ],
        )
    }

    #[test]
    fn test_constructor_defaults() {
        let addon = sample_addon();
        assert_eq!(addon.field("LampEnabled").unwrap().default, Scalar::Int(0));
        assert_eq!(addon.field("lampPin").unwrap().default, Scalar::Int(-1));
        assert_eq!(addon.field("lampBrightness").unwrap().default, Scalar::Int(100));
        assert_eq!(addon.field("lampMask").unwrap().default, Scalar::Int(0));
    }

    #[test]
    fn test_rule_gate() {
        let addon = sample_addon();
        assert_eq!(addon.field("LampEnabled").unwrap().rule.gate(), None);
        assert_eq!(addon.field("lampPin").unwrap().rule.gate(), Some("LampEnabled"));
    }

    #[test]
    fn test_hints() {
        let addon = sample_addon();
        assert_eq!(addon.field("LampEnabled").unwrap().hint(), FieldHint::Toggle);
        assert_eq!(
            addon.field("lampPin").unwrap().hint(),
            FieldHint::Number { min: Some(-1), max: Some(29) }
        );
        assert_eq!(
            addon.field("lampBrightness").unwrap().hint(),
            FieldHint::Number { min: Some(0), max: Some(100) }
        );
        match addon.field("lampMask").unwrap().hint() {
            FieldHint::Choice { options } => assert_eq!(options.len(), 2),
            other => panic!("unexpected hint {:?}", other),
        }
    }

    #[test]
    fn test_dependent_fields_skip_gate() {
        let addon = sample_addon();
        let names: Vec<_> = addon.dependent_fields().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["lampPin", "lampBrightness", "lampMask"]);
    }

    #[test]
    fn test_default_state_is_disabled() {
        let addon = sample_addon();
        let state = addon.default_state();
        assert_eq!(state.len(), 4);
        assert!(!addon.is_enabled(&state));
    }

    #[test]
    fn test_hint_serializes_tagged() {
        let hint = FieldDescriptor::pin("p", "P", "G").hint();
        let json = serde_json::to_value(&hint).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "number", "min": -1, "max": 29}));
    }

    #[test]
    fn test_rule_names() {
        let pin = FieldDescriptor::pin("p", "P", "G");
        assert_eq!(pin.rule.rule_name(), "pin_unique_when_enabled");
        assert_eq!(FieldDescriptor::gate("G", "G").rule.rule_name(), "none");
        assert_eq!(
            FieldDescriptor::brightness("b", "B", "G").rule.rule_name(),
            "range_when_enabled"
        );
    }

    #[test]
    fn test_type_names() {
        assert_eq!(ValueType::Boolean.type_name(), "boolean");
        assert_eq!(ValueType::Pin.type_name(), "pin");
        assert_eq!(ValueType::Enum.type_name(), "enum");
    }
}
