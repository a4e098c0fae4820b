//! Connections between wires.
//!
//! A [`Connection`] is one directed step from a source wire to a sink wire.
//! The common case joins two tile wires, optionally through a PIP; the other
//! variants cross a site boundary through a site pin or stay inside a site.

use crate::ids::{TileId, WireEnum};
use crate::wire::{SiteWire, TileWire, Wire};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A programmable interconnect point: a switch between two wires of one tile.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Pip {
    /// The tile containing the switch.
    pub tile: TileId,
    /// Driving wire.
    pub source: WireEnum,
    /// Driven wire.
    pub sink: WireEnum,
}

impl fmt::Display for Pip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pip tile{} {} -> {}", self.tile, self.source, self.sink)
    }
}

/// A unidirectional step from one wire to another.
///
/// Two connections with the same endpoints are still different steps when
/// their variant or PIP flag differ.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Connection {
    /// Tile wire to tile wire, through a PIP or a fixed wire segment.
    TileWire {
        /// Source wire.
        source: TileWire,
        /// Sink wire.
        sink: TileWire,
        /// Whether the step is a PIP.
        pip: bool,
    },
    /// From the fabric into a site, through an input site pin.
    TileToSite {
        /// The tile wire on the outside of the pin.
        source: TileWire,
        /// The site wire on the inside of the pin.
        sink: SiteWire,
    },
    /// From a site into the fabric, through an output site pin.
    SiteToTile {
        /// The site wire on the inside of the pin.
        source: SiteWire,
        /// The tile wire on the outside of the pin.
        sink: TileWire,
    },
    /// Between two wires of the same site.
    SiteWire {
        /// Source wire.
        source: SiteWire,
        /// Sink wire.
        sink: SiteWire,
    },
}

impl Connection {
    /// A step between two tile wires.
    pub fn tile_wire(source: TileWire, sink: TileWire, pip: bool) -> Self {
        Connection::TileWire { source, sink, pip }
    }

    /// The wire this step starts at.
    pub fn source(&self) -> Wire {
        match *self {
            Connection::TileWire { source, .. } | Connection::TileToSite { source, .. } => {
                Wire::Tile(source)
            }
            Connection::SiteToTile { source, .. } | Connection::SiteWire { source, .. } => {
                Wire::Site(source)
            }
        }
    }

    /// The wire this step ends at.
    pub fn sink(&self) -> Wire {
        match *self {
            Connection::TileWire { sink, .. } | Connection::SiteToTile { sink, .. } => {
                Wire::Tile(sink)
            }
            Connection::TileToSite { sink, .. } | Connection::SiteWire { sink, .. } => {
                Wire::Site(sink)
            }
        }
    }

    /// Returns `true` if this step is a PIP.
    pub fn is_pip(&self) -> bool {
        matches!(self, Connection::TileWire { pip: true, .. })
    }

    /// The PIP this step uses; `Some` exactly when [`is_pip`](Self::is_pip).
    pub fn pip(&self) -> Option<Pip> {
        match *self {
            Connection::TileWire {
                source,
                sink,
                pip: true,
            } => Some(Pip {
                tile: source.tile,
                source: source.wire,
                sink: sink.wire,
            }),
            _ => None,
        }
    }

    /// Returns `true` if the step crosses a site boundary.
    pub fn is_pin_crossing(&self) -> bool {
        matches!(
            self,
            Connection::TileToSite { .. } | Connection::SiteToTile { .. }
        )
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = if self.is_pip() { "->" } else { "=>" };
        write!(f, "{} {arrow} {}", self.source(), self.sink())
    }
}
