//! Tiles and their wire connections.

use crate::ids::{SiteId, TileId, WireEnum};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The type of a tile (e.g. `INT`, `CLBLL`).
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct TileType(String);

impl TileType {
    /// Creates a tile type from its name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the type name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A wire step recorded on its source tile.
///
/// The sink wire lives in the tile at `(row - row_offset, column - column_offset)`
/// relative to the source tile.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct WireConnection {
    /// Sink wire value.
    pub sink: WireEnum,
    /// Row offset to the sink tile.
    pub row_offset: i32,
    /// Column offset to the sink tile.
    pub column_offset: i32,
    /// Whether the step is a programmable interconnect point.
    pub pip: bool,
}

impl WireConnection {
    /// A step that stays inside the source tile.
    pub fn local(sink: WireEnum, pip: bool) -> Self {
        Self {
            sink,
            row_offset: 0,
            column_offset: 0,
            pip,
        }
    }
}

/// A cell of the device grid.
#[derive(Clone, Debug)]
pub struct Tile {
    pub(crate) id: TileId,
    pub(crate) name: String,
    pub(crate) tile_type: TileType,
    pub(crate) row: u32,
    pub(crate) column: u32,
    pub(crate) sites: Vec<SiteId>,
    pub(crate) wire_connections: HashMap<WireEnum, Vec<WireConnection>>,
}

impl Tile {
    /// This tile's ID.
    pub fn id(&self) -> TileId {
        self.id
    }

    /// Tile name (e.g. `INT_X3Y12`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tile type.
    pub fn tile_type(&self) -> &TileType {
        &self.tile_type
    }

    /// Grid row.
    pub fn row(&self) -> u32 {
        self.row
    }

    /// Grid column.
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Sites hosted by this tile, in index order.
    pub fn sites(&self) -> &[SiteId] {
        &self.sites
    }

    /// Wire steps leaving `wire` in this tile.
    pub fn wire_connections(&self, wire: WireEnum) -> &[WireConnection] {
        self.wire_connections
            .get(&wire)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
