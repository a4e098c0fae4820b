//! Parsing and validation of `device.toml` device descriptions.
//!
//! A device description lists the wire names of a part, its site templates
//! (with directional pins) and its tile grid (with sites, external wire
//! bindings and tile-local wire connections). It is the input from which
//! `wirefab_device` builds an in-memory device.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_device_config, load_device_config_from_str};
pub use types::*;
