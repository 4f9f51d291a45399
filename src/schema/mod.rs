//! Addon configuration schema
//!
//! Every addon declares its fields up front: a value type, a default and a
//! single conditional rule. Rules are data, evaluated by one validator.
//!
//! # Design Principles
//!
//! - Field names are unique across the whole device
//! - Rules only apply while the owning addon's gate is truthy
//! - Defaults satisfy their own rule
//! - Validation reports, it never fails and never mutates

mod errors;
mod registry;
mod types;
mod validator;
mod violations;

pub use errors::{SchemaError, SchemaResult, Severity};
pub use registry::AddonRegistry;
pub use types::{
    Addon, BitmaskOption, FieldDescriptor, FieldHint, RuleKind, ValueType, BRIGHTNESS_MAX,
    BRIGHTNESS_MIN, PIN_MAX, PIN_MIN, PIN_UNASSIGNED,
};
pub use validator::Validator;
pub use violations::{Violation, ViolationReport};
