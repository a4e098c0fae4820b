//! Device description types deserialized from `device.toml`.

use serde::Deserialize;
use std::collections::BTreeMap;

/// The top-level device description.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceConfig {
    /// Part-level metadata and the wire name table.
    pub device: DeviceMeta,
    /// Site templates keyed by site type name.
    #[serde(default)]
    pub site_templates: BTreeMap<String, SiteTemplateConfig>,
    /// All tiles of the grid.
    #[serde(default)]
    pub tiles: Vec<TileConfig>,
}

/// Part-level metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceMeta {
    /// Part name (e.g. `xc5vlx20tff323`).
    pub part: String,
    /// Family name.
    #[serde(default)]
    pub family: String,
    /// Number of tile rows.
    pub rows: u32,
    /// Number of tile columns.
    pub columns: u32,
    /// Wire names; the position of a name is its wire enumeration value.
    #[serde(default)]
    pub wires: Vec<String>,
}

/// The pins of one site type.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SiteTemplateConfig {
    /// Pins keyed by pin name.
    #[serde(default)]
    pub pins: BTreeMap<String, SitePinConfig>,
}

/// A pin on the boundary of a site.
#[derive(Debug, Clone, Deserialize)]
pub struct SitePinConfig {
    /// Whether the pin carries signals into or out of the site.
    pub direction: PinDirectionConfig,
    /// The site-internal wire the pin drives or is driven by.
    pub internal_wire: String,
}

/// Site pin direction.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PinDirectionConfig {
    /// Into the site.
    In,
    /// Out of the site.
    Out,
}

/// A tile and its contents.
#[derive(Debug, Clone, Deserialize)]
pub struct TileConfig {
    /// Tile name.
    pub name: String,
    /// Tile type name.
    #[serde(rename = "type")]
    pub tile_type: String,
    /// Row in the grid.
    pub row: u32,
    /// Column in the grid.
    pub column: u32,
    /// Sites hosted by the tile, in index order.
    #[serde(default)]
    pub sites: Vec<SiteConfig>,
    /// Wire connections starting in this tile.
    #[serde(default)]
    pub connections: Vec<WireConnectionConfig>,
}

/// A site within a tile.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Site name.
    pub name: String,
    /// The site's current type.
    #[serde(rename = "type")]
    pub site_type: String,
    /// Other types the site can be configured as.
    #[serde(default)]
    pub possible_types: Vec<String>,
    /// Pin name to external (tile) wire name, for the current type.
    #[serde(default)]
    pub external_wires: BTreeMap<String, String>,
}

/// A tile-local wire step; the sink lives in the tile at
/// `(row - row_offset, column - column_offset)`.
#[derive(Debug, Clone, Deserialize)]
pub struct WireConnectionConfig {
    /// Source wire name.
    pub source: String,
    /// Sink wire name.
    pub sink: String,
    /// Whether the step is a programmable interconnect point.
    #[serde(default)]
    pub pip: bool,
    /// Row offset to the sink tile.
    #[serde(default)]
    pub row_offset: i32,
    /// Column offset to the sink tile.
    #[serde(default)]
    pub column_offset: i32,
}
