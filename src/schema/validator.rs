//! Rule engine that checks a configuration snapshot against the registry
//!
//! Validation semantics:
//! - A field is only checked while its addon's gate is truthy
//! - Gated rules imply presence: a missing or null value is `Required`
//! - Booleans are only accepted in boolean fields
//! - Pin fields must lie in `PIN_MIN..=PIN_MAX` and be unique device-wide
//! - Every registered field appears in the report, valid or not
//!
//! Validator does not mutate the snapshot.
//! Validation is deterministic.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::registry::AddonRegistry;
use super::types::{FieldDescriptor, RuleKind, ValueType, PIN_MAX, PIN_MIN, PIN_UNASSIGNED};
use super::violations::{Violation, ViolationReport};
use crate::state::{ConfigurationObject, Scalar};

/// Evaluates every field rule of a registry against a snapshot.
pub struct Validator<'a> {
    registry: &'a AddonRegistry,
}

impl<'a> Validator<'a> {
    /// Creates a new validator backed by the given registry.
    pub fn new(registry: &'a AddonRegistry) -> Self {
        Self { registry }
    }

    /// Validates a snapshot.
    ///
    /// Returns one entry per registered field. Disabled addons contribute
    /// empty entries whatever their stored values.
    pub fn validate(&self, state: &ConfigurationObject) -> ViolationReport {
        let mut report = ViolationReport::new();
        let mut pins: BTreeMap<i64, Vec<&str>> = BTreeMap::new();

        for addon in self.registry.addons() {
            for field in &addon.fields {
                report.touch(&field.name);
            }

            if !addon.is_enabled(state) {
                continue;
            }

            for field in addon.dependent_fields() {
                let value = state.get(&field.name);
                for violation in check_field(field, value) {
                    report.record(&field.name, violation);
                }

                if field.is_pin() {
                    if let Some(Scalar::Int(pin)) = value {
                        if pin != PIN_UNASSIGNED {
                            pins.entry(pin).or_default().push(&field.name);
                        }
                    }
                }
            }
        }

        for (pin, fields) in pins.iter().filter(|(_, f)| f.len() > 1) {
            for field in fields {
                let shared_with = fields
                    .iter()
                    .filter(|other| *other != field)
                    .map(|other| other.to_string())
                    .collect();
                report.record(
                    field,
                    Violation::DuplicatePin {
                        pin: *pin,
                        shared_with,
                    },
                );
            }
        }

        if report.is_clean() {
            debug!(fields = report.len(), "configuration valid");
        } else {
            warn!(
                violations = report.violation_count(),
                "configuration has violations"
            );
        }

        report
    }
}

/// Checks a single field value against its own rule, as if enabled.
///
/// Cross-field pin uniqueness is not part of this check.
pub(crate) fn check_field(field: &FieldDescriptor, value: Option<Scalar>) -> Vec<Violation> {
    if matches!(field.rule, RuleKind::None) {
        return Vec::new();
    }

    let actual = match value {
        Some(Scalar::Int(n)) => n,
        Some(Scalar::Bool(b)) if field.value_type == ValueType::Boolean => i64::from(b),
        Some(Scalar::Bool(_)) => {
            return vec![Violation::WrongType {
                expected: field.value_type.type_name(),
            }]
        }
        None => return vec![Violation::Required],
    };

    match &field.rule {
        RuleKind::None | RuleKind::RequiredWhenEnabled { .. } => Vec::new(),
        RuleKind::RangeWhenEnabled { min, max, .. } => check_range(*min, *max, actual),
        RuleKind::PinUniqueWhenEnabled { .. } => check_range(PIN_MIN, PIN_MAX, actual),
        RuleKind::SelectionWhenEnabled { allowed, .. } => {
            if allowed.iter().any(|o| o.value == actual) {
                Vec::new()
            } else {
                vec![Violation::NotSelectable { actual }]
            }
        }
    }
}

fn check_range(min: i64, max: i64, actual: i64) -> Vec<Violation> {
    if (min..=max).contains(&actual) {
        Vec::new()
    } else {
        vec![Violation::OutOfRange { min, max, actual }]
    }
}
