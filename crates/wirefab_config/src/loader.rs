//! Device description loading and validation.

use crate::error::ConfigError;
use crate::types::{DeviceConfig, SiteConfig, TileConfig};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Loads and validates a device description from a TOML file.
pub fn load_device_config(path: &Path) -> Result<DeviceConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_device_config_from_str(&content)
}

/// Parses and validates a device description from a string.
pub fn load_device_config_from_str(content: &str) -> Result<DeviceConfig, ConfigError> {
    let config: DeviceConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &DeviceConfig) -> Result<(), ConfigError> {
    let meta = &config.device;
    if meta.part.is_empty() {
        return Err(ConfigError::MissingField("device.part".to_string()));
    }
    if meta.rows == 0 || meta.columns == 0 {
        return Err(ConfigError::ValidationError(format!(
            "grid must not be empty (rows = {}, columns = {})",
            meta.rows, meta.columns
        )));
    }

    let mut wires = HashSet::new();
    for wire in &meta.wires {
        if !wires.insert(wire.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "wire '{wire}' declared twice"
            )));
        }
    }
    let known_wire = |name: &str, context: &str| {
        if wires.contains(name) {
            Ok(())
        } else {
            Err(ConfigError::ValidationError(format!(
                "{context} references undeclared wire '{name}'"
            )))
        }
    };

    for (site_type, template) in &config.site_templates {
        for (pin, pin_cfg) in &template.pins {
            known_wire(&pin_cfg.internal_wire, &format!("pin {site_type}.{pin}"))?;
        }
    }

    let mut positions = HashMap::new();
    let mut tile_names = HashSet::new();
    let mut site_names = HashSet::new();
    for tile in &config.tiles {
        validate_tile_position(config, tile, &mut positions)?;
        if !tile_names.insert(tile.name.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "tile '{}' declared twice",
                tile.name
            )));
        }
        for conn in &tile.connections {
            let context = format!("tile '{}' connection", tile.name);
            known_wire(&conn.source, &context)?;
            known_wire(&conn.sink, &context)?;
        }
        for site in &tile.sites {
            if !site_names.insert(site.name.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "site '{}' declared twice",
                    site.name
                )));
            }
            validate_site(config, site)?;
            for wire in site.external_wires.values() {
                known_wire(wire, &format!("site '{}'", site.name))?;
            }
        }
    }
    Ok(())
}

fn validate_tile_position<'a>(
    config: &DeviceConfig,
    tile: &'a TileConfig,
    positions: &mut HashMap<(u32, u32), &'a str>,
) -> Result<(), ConfigError> {
    if tile.row >= config.device.rows || tile.column >= config.device.columns {
        return Err(ConfigError::ValidationError(format!(
            "tile '{}' at ({}, {}) lies outside the {}x{} grid",
            tile.name, tile.row, tile.column, config.device.rows, config.device.columns
        )));
    }
    if let Some(other) = positions.insert((tile.row, tile.column), &tile.name) {
        return Err(ConfigError::ValidationError(format!(
            "tiles '{other}' and '{}' share position ({}, {})",
            tile.name, tile.row, tile.column
        )));
    }
    Ok(())
}

fn validate_site(config: &DeviceConfig, site: &SiteConfig) -> Result<(), ConfigError> {
    for ty in std::iter::once(&site.site_type).chain(&site.possible_types) {
        if !config.site_templates.contains_key(ty) {
            return Err(ConfigError::ValidationError(format!(
                "site '{}' uses unknown site type '{ty}'",
                site.name
            )));
        }
    }
    let template = &config.site_templates[&site.site_type];
    for pin in site.external_wires.keys() {
        if !template.pins.contains_key(pin) {
            return Err(ConfigError::ValidationError(format!(
                "site '{}' binds unknown pin '{pin}' of type '{}'",
                site.name, site.site_type
            )));
        }
    }
    Ok(())
}
