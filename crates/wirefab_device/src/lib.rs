//! Device model consumed by route trees and designs.
//!
//! Provides the tile grid, sites, site templates and wire names of a device,
//! the [`Wire`] and [`Connection`] handles route trees are built from, and
//! the site-pin resolver ([`Device::connected_site_pin`]) used to classify
//! route terminals.
//!
//! # Usage
//!
//! ```ignore
//! use wirefab_device::Device;
//!
//! let device = Device::load(Path::new("device.toml"))?;
//! let wire = device.tile_wire("INT_X0Y0", "EE2BEG0")?;
//! for conn in device.connections_from(&wire.into())? {
//!     println!("{}", device.wire_name(&conn.sink()));
//! }
//! ```

#![warn(missing_docs)]

pub mod connection;
pub mod device;
pub mod enumerator;
pub mod error;
pub mod ids;
pub mod site;
pub mod tile;
pub mod wire;

pub use connection::{Connection, Pip};
pub use device::Device;
pub use enumerator::WireEnumerator;
pub use error::DeviceError;
pub use ids::{SiteId, TileId, WireEnum};
pub use site::{PinDirection, Site, SitePin, SitePinTemplate, SiteTemplate, SiteType};
pub use tile::{Tile, TileType, WireConnection};
pub use wire::{SiteWire, TileWire, Wire};
