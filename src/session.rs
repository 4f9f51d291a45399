//! Editing session
//!
//! Holds the single configuration snapshot of one editing session, folds
//! edits into it through the reducer and only writes it back to the device
//! when validation reports no violations.

use thiserror::Error;
use tracing::{info, warn};

use crate::i2c_maps::I2cMapTable;
use crate::schema::{AddonRegistry, SchemaError, ViolationReport};
use crate::state::{self, ConfigurationObject, Edit, Scalar};
use crate::transport::{DeviceLink, TransportError};

/// Session errors
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("refusing to save: {count} violation(s)", count = .0.violation_count())]
    Invalid(ViolationReport),
}

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;

/// One editing session against one device.
pub struct EditSession<'r, L: DeviceLink> {
    registry: &'r AddonRegistry,
    link: L,
    state: ConfigurationObject,
}

impl<'r, L: DeviceLink> EditSession<'r, L> {
    /// Starts a session from the registry's merged defaults.
    pub fn new(registry: &'r AddonRegistry, link: L) -> Self {
        Self {
            registry,
            link,
            state: registry.merged_default_state(),
        }
    }

    /// Starts a session from the device's current snapshot.
    pub fn open(registry: &'r AddonRegistry, link: L) -> SessionResult<Self> {
        let mut session = Self::new(registry, link);
        session.reload()?;
        Ok(session)
    }

    /// Replaces the in-memory snapshot with the device's.
    ///
    /// The loaded snapshot is laid over the merged defaults so every
    /// registered field is present, and gates are normalised to 0/1. On
    /// failure the current snapshot is kept.
    pub fn reload(&mut self) -> SessionResult<()> {
        let loaded = self.link.load_configuration()?;
        let merged = self.registry.merged_default_state().overlay(&loaded);
        self.state = normalize_gates(self.registry, merged);
        info!(fields = self.state.len(), "session reloaded from device");
        Ok(())
    }

    /// Current snapshot
    pub fn state(&self) -> &ConfigurationObject {
        &self.state
    }

    /// Applies one edit.
    pub fn apply(&mut self, edit: &Edit) -> SessionResult<()> {
        self.state = state::reduce(&self.state, self.registry, edit)?;
        Ok(())
    }

    /// Sets a field.
    pub fn set_field(&mut self, name: &str, value: impl Into<Scalar>) {
        self.state = state::set_field(&self.state, name, value);
    }

    /// Flips an addon's gate.
    pub fn toggle_addon(&mut self, addon_id: &str) -> SessionResult<()> {
        self.state = state::toggle_addon(&self.state, self.registry, addon_id)?;
        Ok(())
    }

    /// Validates the current snapshot.
    pub fn validate(&self) -> ViolationReport {
        self.registry.validate(&self.state)
    }

    /// Writes the snapshot to the device.
    ///
    /// # Errors
    ///
    /// `Invalid` if any field has a violation (nothing is sent), or the
    /// transport error if the write fails.
    pub fn save(&mut self) -> SessionResult<()> {
        let report = self.validate();
        if !report.is_clean() {
            warn!(violations = report.violation_count(), "save refused");
            return Err(SessionError::Invalid(report));
        }
        self.link.save_configuration(&self.state)?;
        Ok(())
    }

    /// Loads the I2C map table from the device.
    pub fn load_i2c_maps(&self) -> SessionResult<I2cMapTable> {
        Ok(self.link.load_i2c_maps()?)
    }

    /// Validates and writes an I2C map table.
    pub fn save_i2c_maps(&mut self, maps: &I2cMapTable) -> SessionResult<()> {
        let report = maps.validate(&self.state);
        if !report.is_clean() {
            warn!(violations = report.violation_count(), "i2c map save refused");
            return Err(SessionError::Invalid(report));
        }
        self.link.save_i2c_maps(maps)?;
        Ok(())
    }

    /// Device link
    pub fn link(&self) -> &L {
        &self.link
    }

    /// Ends the session, returning the link
    pub fn into_link(self) -> L {
        self.link
    }
}

/// Replaces null gates with their default and any other non-zero
/// integer gate with `1`. Boolean gates are kept as sent.
fn normalize_gates(registry: &AddonRegistry, mut state: ConfigurationObject) -> ConfigurationObject {
    for addon in registry.addons() {
        let normalized = match state.entry(&addon.gate) {
            Some(Some(Scalar::Int(n))) if n != 0 && n != 1 => Scalar::Int(1),
            Some(Some(_)) => continue,
            Some(None) | None => match addon.gate_field() {
                Some(field) => field.default,
                None => continue,
            },
        };
        warn!(gate = %addon.gate, value = %normalized, "normalized gate from device");
        state.insert(addon.gate.clone(), Some(normalized));
    }
    state
}
