//! Board profiles
//!
//! A board profile carries the compiled-in settings of a particular board
//! (which addons it enables and which pins it wires) as field overrides on
//! top of the registry's merged defaults.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::schema::AddonRegistry;
use crate::state::{ConfigurationObject, Scalar};

/// Board profile errors
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("failed to read profile '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid profile JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("profile sets unknown field '{0}'")]
    UnknownField(String),
}

/// Result type for profile operations
pub type ProfileResult<T> = Result<T, ProfileError>;

/// Field overrides for a specific board
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BoardProfile {
    /// Board name
    #[serde(default)]
    pub name: Option<String>,
    /// Field -> value overrides
    #[serde(default)]
    pub values: BTreeMap<String, Scalar>,
}

impl BoardProfile {
    /// Loads a profile from a JSON file
    pub fn load(path: &Path) -> ProfileResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ProfileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let profile = Self::from_json(&content)?;
        info!(
            path = %path.display(),
            board = profile.name.as_deref().unwrap_or("<unnamed>"),
            overrides = profile.values.len(),
            "board profile loaded"
        );
        Ok(profile)
    }

    /// Parses a profile from JSON text
    pub fn from_json(content: &str) -> ProfileResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Returns the registry's merged defaults with this profile applied.
    ///
    /// # Errors
    ///
    /// Returns `UnknownField` if the profile names a field no addon declares.
    pub fn apply(&self, registry: &AddonRegistry) -> ProfileResult<ConfigurationObject> {
        if let Some(unknown) = self
            .values
            .keys()
            .find(|name| registry.descriptor(name).is_none())
        {
            return Err(ProfileError::UnknownField(unknown.clone()));
        }

        let overrides: ConfigurationObject = self
            .values
            .iter()
            .map(|(name, value)| (name.clone(), *value))
            .collect();

        Ok(registry.merged_default_state().overlay(&overrides))
    }
}
