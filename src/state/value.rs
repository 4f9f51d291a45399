//! Flat device configuration object
//!
//! The configuration exchanged with the device is a single flat JSON object
//! mapping field names to scalars. Booleans and integers are both accepted on
//! the wire; a gate is truthy when it is `true` or non-zero.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A single configuration value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Boolean as sent by some firmware revisions
    Bool(bool),
    /// Integer (pins, brightness, bitmasks, 0/1 flags)
    Int(i64),
}

impl Scalar {
    /// Returns the integer view (`true` = 1, `false` = 0)
    pub fn as_i64(self) -> i64 {
        match self {
            Scalar::Bool(b) => i64::from(b),
            Scalar::Int(n) => n,
        }
    }

    /// Non-zero / true
    pub fn is_truthy(self) -> bool {
        self.as_i64() != 0
    }

    /// Returns the opposite flag, keeping the wire representation
    pub fn flipped(self) -> Scalar {
        match self {
            Scalar::Bool(b) => Scalar::Bool(!b),
            Scalar::Int(n) => Scalar::Int(if n != 0 { 0 } else { 1 }),
        }
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Int(n)
    }
}

impl From<i32> for Scalar {
    fn from(n: i32) -> Self {
        Scalar::Int(i64::from(n))
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Int(n) => write!(f, "{}", n),
        }
    }
}

impl FromStr for Scalar {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "true" => Ok(Scalar::Bool(true)),
            "false" => Ok(Scalar::Bool(false)),
            other => other
                .parse::<i64>()
                .map(Scalar::Int)
                .map_err(|_| format!("'{}' is neither an integer nor a boolean", other)),
        }
    }
}

/// Merged configuration of every addon.
///
/// Values are `Option` because a snapshot from the device may carry explicit
/// nulls. Keys are kept sorted so serialization is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigurationObject {
    values: BTreeMap<String, Option<Scalar>>,
}

impl ConfigurationObject {
    /// Creates an empty object
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of a field; `None` if absent or null
    pub fn get(&self, name: &str) -> Option<Scalar> {
        self.values.get(name).copied().flatten()
    }

    /// Returns the raw entry: `None` if absent, `Some(None)` if null
    pub fn entry(&self, name: &str) -> Option<Option<Scalar>> {
        self.values.get(name).copied()
    }

    /// Whether the key exists (even if null)
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Whether the field holds a truthy value
    pub fn is_truthy(&self, name: &str) -> bool {
        self.get(name).is_some_and(Scalar::is_truthy)
    }

    /// Returns a copy with `name` set to `value`
    pub fn with(&self, name: &str, value: Scalar) -> Self {
        let mut next = self.clone();
        next.values.insert(name.to_string(), Some(value));
        next
    }

    /// Returns a copy with every entry of `other` written over this one
    pub fn overlay(&self, other: &ConfigurationObject) -> Self {
        let mut next = self.clone();
        for (name, value) in &other.values {
            next.values.insert(name.clone(), *value);
        }
        next
    }

    /// Iterates entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<Scalar>)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Iterates field names in key order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the object is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, value: Option<Scalar>) -> Option<Option<Scalar>> {
        self.values.insert(name.into(), value)
    }
}

impl FromIterator<(String, Scalar)> for ConfigurationObject {
    fn from_iter<I: IntoIterator<Item = (String, Scalar)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k, Some(v))).collect(),
        }
    }
}
