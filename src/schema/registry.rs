//! Addon registry
//!
//! Holds the closed set of addon definitions. Registration happens once at
//! startup and checks every definition; any inconsistency is a fatal
//! `SchemaError`. The registry is read-only afterwards.

use std::collections::{HashMap, HashSet};

use tracing::info;

use super::errors::{SchemaError, SchemaResult};
use super::types::{Addon, FieldDescriptor, RuleKind, ValueType};
use super::validator::{check_field, Validator};
use super::violations::ViolationReport;
use crate::state::ConfigurationObject;

/// Registry of addon definitions with a device-wide field index.
#[derive(Debug, Clone)]
pub struct AddonRegistry {
    /// Addons in registration order
    addons: Vec<Addon>,
    /// Field name -> index of the owning addon
    owners: HashMap<String, usize>,
}

impl AddonRegistry {
    /// Builds a registry from addon definitions.
    ///
    /// # Errors
    ///
    /// Returns a fatal `SchemaError` if any definition is inconsistent or
    /// if two addons declare the same id or field name.
    pub fn new(addons: Vec<Addon>) -> SchemaResult<Self> {
        let mut registry = Self {
            addons: Vec::with_capacity(addons.len()),
            owners: HashMap::new(),
        };

        for addon in addons {
            registry.register(addon)?;
        }

        info!(
            addons = registry.addons.len(),
            fields = registry.owners.len(),
            "addon registry built"
        );
        Ok(registry)
    }

    /// Builds the registry of the built-in device addons.
    pub fn builtin() -> SchemaResult<Self> {
        Self::new(crate::addons::builtin())
    }

    fn register(&mut self, addon: Addon) -> SchemaResult<()> {
        if self.addons.iter().any(|a| a.id == addon.id) {
            return Err(SchemaError::DuplicateAddon(addon.id));
        }

        check_structure(&addon)?;

        let index = self.addons.len();
        let mut declared: HashSet<&str> = HashSet::new();
        for field in &addon.fields {
            if let Some(&owner) = self.owners.get(&field.name) {
                return Err(SchemaError::FieldCollision {
                    field: field.name.clone(),
                    addon: addon.id.clone(),
                    existing: self.addons[owner].id.clone(),
                });
            }
            if !declared.insert(field.name.as_str()) {
                return Err(SchemaError::FieldCollision {
                    field: field.name.clone(),
                    addon: addon.id.clone(),
                    existing: addon.id.clone(),
                });
            }
        }

        for field in &addon.fields {
            self.owners.insert(field.name.clone(), index);
        }
        self.addons.push(addon);
        Ok(())
    }

    /// Returns all addons in registration order.
    pub fn addons(&self) -> impl Iterator<Item = &Addon> {
        self.addons.iter()
    }

    /// Gets an addon by id.
    pub fn addon(&self, addon_id: &str) -> Option<&Addon> {
        self.addons.iter().find(|a| a.id == addon_id)
    }

    /// Returns the ordered field descriptors of an addon.
    pub fn fields_for(&self, addon_id: &str) -> Option<&[FieldDescriptor]> {
        self.addon(addon_id).map(|a| a.fields.as_slice())
    }

    /// Returns the addon declaring a field.
    pub fn addon_for_field(&self, field: &str) -> Option<&Addon> {
        self.owners.get(field).map(|&i| &self.addons[i])
    }

    /// Returns the descriptor of a field.
    pub fn descriptor(&self, field: &str) -> Option<&FieldDescriptor> {
        self.addon_for_field(field).and_then(|a| a.field(field))
    }

    /// Union of every addon's default state.
    ///
    /// Keys never collide: collisions are rejected at registration.
    pub fn merged_default_state(&self) -> ConfigurationObject {
        let mut merged = ConfigurationObject::new();
        for addon in &self.addons {
            merged = merged.overlay(&addon.default_state());
        }
        merged
    }

    /// Validates a snapshot against every registered rule.
    pub fn validate(&self, state: &ConfigurationObject) -> ViolationReport {
        Validator::new(self).validate(state)
    }

    /// Returns the number of registered addons.
    pub fn addon_count(&self) -> usize {
        self.addons.len()
    }

    /// Returns the number of registered fields.
    pub fn field_count(&self) -> usize {
        self.owners.len()
    }
}

/// Checks a single addon definition in isolation.
fn check_structure(addon: &Addon) -> SchemaResult<()> {
    let gate = addon.gate_field().ok_or_else(|| SchemaError::MissingGate {
        addon: addon.id.clone(),
        gate: addon.gate.clone(),
    })?;

    if gate.value_type != ValueType::Boolean {
        return Err(SchemaError::GateNotBoolean {
            addon: addon.id.clone(),
            field: gate.name.clone(),
        });
    }

    for field in addon.dependent_fields() {
        match &field.rule {
            RuleKind::None => {
                return Err(SchemaError::MissingRule {
                    addon: addon.id.clone(),
                    field: field.name.clone(),
                });
            }
            RuleKind::RangeWhenEnabled { min, max, .. } if min > max => {
                return Err(SchemaError::EmptyRange {
                    field: field.name.clone(),
                    min: *min,
                    max: *max,
                });
            }
            RuleKind::SelectionWhenEnabled { allowed, .. } if allowed.is_empty() => {
                return Err(SchemaError::EmptySelection {
                    field: field.name.clone(),
                });
            }
            _ => {}
        }

        if let Some(rule_gate) = field.rule.gate() {
            if rule_gate != addon.gate {
                return Err(SchemaError::ForeignGate {
                    field: field.name.clone(),
                    gate: rule_gate.to_string(),
                    expected: addon.gate.clone(),
                });
            }
        }

        if !check_field(field, Some(field.default)).is_empty() {
            return Err(SchemaError::InvalidDefault {
                field: field.name.clone(),
                value: field.default,
            });
        }
    }

    Ok(())
}
