//! Configuration state and the reducer that edits it
//!
//! Snapshots are immutable by convention: edits return a new
//! `ConfigurationObject` instead of mutating in place.

mod reducer;
mod value;

pub use reducer::{addon_state, reduce, set_field, toggle_addon, AddonState, Edit};
pub use value::{ConfigurationObject, Scalar};
