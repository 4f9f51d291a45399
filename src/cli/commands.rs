//! CLI command implementations
//!
//! Every command builds the built-in registry, talks to the device through a
//! `FileDeviceLink` and prints one JSON object. Commands that change the
//! configuration only write it back when it validates.

use std::path::Path;

use serde_json::{json, Value};
use tracing::info;

use crate::buttons::mask_by_label;
use crate::schema::{AddonRegistry, SchemaError, ValueType};
use crate::session::EditSession;
use crate::state::{addon_state, Scalar};
use crate::transport::DeviceLink;

use super::args::Command;
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{write_error, write_response};

/// Main CLI entry point
///
/// Parses arguments, installs logging and dispatches to the command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    super::logging::init_tracing(cli.log_level.as_deref())?;
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
///
/// Failures are written to stdout as an error response before being
/// returned, so every command prints exactly one JSON object.
pub fn run_command(cmd: Command) -> CliResult<()> {
    let result = dispatch(cmd);
    if let Err(e) = &result {
        write_error(e.code_str(), e.message(), e.data().cloned())?;
    }
    result
}

fn dispatch(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Defaults { profile } => defaults(profile.as_deref()),
        Command::Fields { addon } => fields(&addon),
        Command::Status { config } => status(&config),
        Command::Validate { config } => validate(&config),
        Command::Set {
            config,
            field,
            value,
        } => set(&config, &field, &value),
        Command::Toggle { config, addon } => toggle(&config, &addon),
        Command::Maps { config } => maps(&config),
    }
}

/// Write the initial device configuration
///
/// Refuses to overwrite an existing device file.
pub fn init(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let registry = AddonRegistry::builtin()?;
    let mut link = config.link();

    if link.exists() {
        return Err(CliError::already_initialized(link.config_path().display()));
    }

    let state = config.initial_state(&registry)?;
    let report = registry.validate(&state);
    if !report.is_clean() {
        return Err(CliError::violations(&report));
    }

    link.save_configuration(&state)?;
    info!(path = %link.config_path().display(), "device configuration initialized");

    write_response(json!({
        "path": link.config_path().display().to_string(),
        "fields": state.len(),
    }))
}

/// Print the merged default configuration
pub fn defaults(profile: Option<&Path>) -> CliResult<()> {
    let registry = AddonRegistry::builtin()?;
    let state = match profile {
        Some(path) => crate::profile::BoardProfile::load(path)?.apply(&registry)?,
        None => registry.merged_default_state(),
    };
    write_response(serde_json::to_value(&state)?)
}

/// Print an addon's field descriptors
pub fn fields(addon_id: &str) -> CliResult<()> {
    let registry = AddonRegistry::builtin()?;
    let fields = registry
        .fields_for(addon_id)
        .ok_or_else(|| SchemaError::UnknownAddon(addon_id.to_string()))?;

    let data: Vec<Value> = fields
        .iter()
        .map(|f| {
            json!({
                "name": f.name,
                "label": f.label,
                "type": f.value_type.type_name(),
                "default": f.default,
                "rule": f.rule.rule_name(),
                "gate": f.rule.gate(),
                "hint": f.hint(),
            })
        })
        .collect();

    write_response(Value::Array(data))
}

/// Print the enabled/disabled state of every addon
pub fn status(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let registry = AddonRegistry::builtin()?;
    let session = EditSession::open(&registry, config.link())?;

    let mut data = Vec::new();
    for addon in registry.addons() {
        data.push(json!({
            "id": addon.id,
            "label": addon.label,
            "state": addon_state(session.state(), &registry, &addon.id)?,
        }));
    }

    write_response(Value::Array(data))
}

/// Validate the device configuration
pub fn validate(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let registry = AddonRegistry::builtin()?;
    let session = EditSession::open(&registry, config.link())?;

    let report = session.validate();
    if !report.is_clean() {
        return Err(CliError::violations(&report));
    }
    write_response(json!({ "valid": true, "fields": report.len() }))
}

/// Set a field and save
pub fn set(config_path: &Path, field: &str, raw: &str) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let registry = AddonRegistry::builtin()?;

    let descriptor = registry
        .descriptor(field)
        .ok_or_else(|| CliError::invalid_argument(format!("Unknown field '{}'", field)))?;
    let value = parse_value(raw, descriptor.value_type)?;

    let mut session = EditSession::open(&registry, config.link())?;
    session.set_field(field, value);
    session.save()?;

    write_response(json!({ "field": field, "value": value }))
}

/// Toggle an addon and save
pub fn toggle(config_path: &Path, addon_id: &str) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let registry = AddonRegistry::builtin()?;

    let mut session = EditSession::open(&registry, config.link())?;
    session.toggle_addon(addon_id)?;
    session.save()?;

    write_response(json!({
        "addon": addon_id,
        "state": addon_state(session.state(), &registry, addon_id)?,
    }))
}

/// Validate the I2C mapper action table
pub fn maps(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let registry = AddonRegistry::builtin()?;
    let session = EditSession::open(&registry, config.link())?;

    let table = session.load_i2c_maps()?;
    let report = table.validate(session.state());
    if !report.is_clean() {
        return Err(CliError::violations(&report));
    }
    write_response(json!({ "valid": true, "entries": table.maps.len() }))
}

/// Parses a command-line value; mask fields also accept button labels
fn parse_value(raw: &str, value_type: ValueType) -> CliResult<Scalar> {
    match raw.parse::<Scalar>() {
        Ok(value) => Ok(value),
        Err(_) if value_type == ValueType::Enum => mask_by_label(raw)
            .map(|o| Scalar::Int(o.value))
            .ok_or_else(|| CliError::invalid_argument(format!("Unknown button '{}'", raw))),
        Err(e) => Err(CliError::invalid_argument(e)),
    }
}
