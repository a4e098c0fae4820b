//! Wire handles.
//!
//! A wire is identified by its locator (a tile or a site) and its
//! enumeration value. Wires are small `Copy` values; the names behind them
//! are resolved through the [`Device`](crate::Device).

use crate::ids::{SiteId, TileId, WireEnum};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A routing wire inside a tile.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct TileWire {
    /// The tile the wire belongs to.
    pub tile: TileId,
    /// The wire's enumeration value.
    pub wire: WireEnum,
}

impl TileWire {
    /// Creates a tile wire handle.
    pub fn new(tile: TileId, wire: WireEnum) -> Self {
        Self { tile, wire }
    }
}

/// A wire inside a site.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct SiteWire {
    /// The site the wire belongs to.
    pub site: SiteId,
    /// The wire's enumeration value.
    pub wire: WireEnum,
}

impl SiteWire {
    /// Creates a site wire handle.
    pub fn new(site: SiteId, wire: WireEnum) -> Self {
        Self { site, wire }
    }
}

/// Either kind of wire.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Wire {
    /// A wire in the interconnect fabric.
    Tile(TileWire),
    /// A wire inside a site.
    Site(SiteWire),
}

impl Wire {
    /// Returns the enumeration value regardless of locator.
    pub fn wire_enum(&self) -> WireEnum {
        match self {
            Wire::Tile(tw) => tw.wire,
            Wire::Site(sw) => sw.wire,
        }
    }

    /// Returns the tile wire, if this is one.
    pub fn as_tile_wire(&self) -> Option<TileWire> {
        match self {
            Wire::Tile(tw) => Some(*tw),
            Wire::Site(_) => None,
        }
    }

    /// Returns the site wire, if this is one.
    pub fn as_site_wire(&self) -> Option<SiteWire> {
        match self {
            Wire::Site(sw) => Some(*sw),
            Wire::Tile(_) => None,
        }
    }
}

impl From<TileWire> for Wire {
    fn from(tw: TileWire) -> Self {
        Wire::Tile(tw)
    }
}

impl From<SiteWire> for Wire {
    fn from(sw: SiteWire) -> Self {
        Wire::Site(sw)
    }
}

impl fmt::Display for Wire {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Wire::Tile(tw) => write!(f, "tile{}:{}", tw.tile, tw.wire),
            Wire::Site(sw) => write!(f, "site{}:{}", sw.site, sw.wire),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn tw(tile: u32, wire: u32) -> TileWire {
        TileWire::new(TileId::from_raw(tile), WireEnum::from_raw(wire))
    }

    #[test]
    fn equality_uses_locator_and_value() {
        assert_eq!(Wire::from(tw(0, 4)), Wire::from(tw(0, 4)));
        assert_ne!(Wire::from(tw(0, 4)), Wire::from(tw(1, 4)));
        assert_ne!(Wire::from(tw(0, 4)), Wire::from(tw(0, 5)));
        let site = Wire::from(SiteWire::new(SiteId::from_raw(0), WireEnum::from_raw(4)));
        assert_ne!(Wire::from(tw(0, 4)), site);
    }

    #[test]
    fn hashable() {
        let set: HashSet<Wire> = [tw(0, 1), tw(0, 1), tw(0, 2)]
            .into_iter()
            .map(Wire::from)
            .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn accessors() {
        let w = Wire::from(tw(3, 9));
        assert_eq!(w.wire_enum(), WireEnum::from_raw(9));
        assert_eq!(w.as_tile_wire(), Some(tw(3, 9)));
        assert!(w.as_site_wire().is_none());
        assert_eq!(w.to_string(), "tile3:9");
    }

    #[test]
    fn serde_roundtrip() {
        let w = Wire::from(SiteWire::new(SiteId::from_raw(2), WireEnum::from_raw(7)));
        let json = serde_json::to_string(&w).unwrap();
        let back: Wire = serde_json::from_str(&json).unwrap();
        assert_eq!(w, back);
    }
}
