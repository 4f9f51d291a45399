//! Field violation reports
//!
//! Validation never fails: it always returns a report keyed by field name,
//! with an empty list for every field that passed.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Reason a field's value fails its rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Violation {
    /// Value absent or null while the addon is enabled
    Required,
    /// Boolean stored in a numeric field
    WrongType { expected: &'static str },
    /// Value outside the inclusive bounds
    OutOfRange { min: i64, max: i64, actual: i64 },
    /// Value is not a member of the option list
    NotSelectable { actual: i64 },
    /// Pin also assigned to other enabled fields
    DuplicatePin { pin: i64, shared_with: Vec<String> },
    /// List longer than the device accepts
    TooManyEntries { max: usize, actual: usize },
}

impl Violation {
    /// Short machine-readable reason
    pub fn code(&self) -> &'static str {
        match self {
            Violation::Required => "required",
            Violation::WrongType { .. } => "wrong_type",
            Violation::OutOfRange { .. } => "out_of_range",
            Violation::NotSelectable { .. } => "not_selectable",
            Violation::DuplicatePin { .. } => "duplicate_pin",
            Violation::TooManyEntries { .. } => "too_many_entries",
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Required => write!(f, "value is required"),
            Violation::WrongType { expected } => write!(f, "expected a {} value", expected),
            Violation::OutOfRange { min, max, actual } => {
                write!(f, "value {} is outside {}..={}", actual, min, max)
            }
            Violation::NotSelectable { actual } => {
                write!(f, "value {} is not one of the allowed options", actual)
            }
            Violation::DuplicatePin { pin, shared_with } => {
                write!(f, "duplicate pin {} (also used by {})", pin, shared_with.join(", "))
            }
            Violation::TooManyEntries { max, actual } => {
                write!(f, "{} entries exceed the limit of {}", actual, max)
            }
        }
    }
}

/// Per-field validation outcome
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ViolationReport {
    fields: BTreeMap<String, Vec<Violation>>,
}

impl ViolationReport {
    /// Creates an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a field as checked, with no violations yet
    pub(crate) fn touch(&mut self, field: &str) {
        self.fields.entry(field.to_string()).or_default();
    }

    /// Appends a violation to a field
    pub(crate) fn record(&mut self, field: &str, violation: Violation) {
        self.fields.entry(field.to_string()).or_default().push(violation);
    }

    /// True when no field has a violation
    pub fn is_clean(&self) -> bool {
        self.fields.values().all(Vec::is_empty)
    }

    /// Total number of violations
    pub fn violation_count(&self) -> usize {
        self.fields.values().map(Vec::len).sum()
    }

    /// Violations of one field (empty if valid or unknown)
    pub fn violations_for(&self, field: &str) -> &[Violation] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether the field was checked
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Names of fields with at least one violation, in key order
    pub fn invalid_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, _)| k.as_str())
    }

    /// All entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Violation])> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of checked fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no field was checked
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for ViolationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (field, violations) in self.iter().filter(|(_, v)| !v.is_empty()) {
            for violation in violations {
                writeln!(f, "{}: {}", field, violation)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touched_fields_are_clean() {
        let mut report = ViolationReport::new();
        report.touch("a");
        report.touch("b");
        assert!(report.is_clean());
        assert_eq!(report.len(), 2);
        assert!(report.violations_for("a").is_empty());
    }

    #[test]
    fn test_record_marks_dirty() {
        let mut report = ViolationReport::new();
        report.touch("a");
        report.record("b", Violation::Required);
        assert!(!report.is_clean());
        assert_eq!(report.violation_count(), 1);
        assert_eq!(report.invalid_fields().collect::<Vec<_>>(), vec!["b"]);
    }

    #[test]
    fn test_display() {
        let mut report = ViolationReport::new();
        report.record(
            "pin",
            Violation::DuplicatePin {
                pin: 5,
                shared_with: vec!["otherPin".into()],
            },
        );
        let text = report.to_string();
        assert!(text.contains("pin: duplicate pin 5"));
        assert!(text.contains("otherPin"));
    }

    #[test]
    fn test_serializes_reason_tag() {
        let v = Violation::OutOfRange {
            min: 0,
            max: 100,
            actual: 101,
        };
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"reason": "out_of_range", "min": 0, "max": 100, "actual": 101})
        );
    }
}
