//! Errors raised while building or querying a device.

use crate::ids::{SiteId, TileId};
use wirefab_config::ConfigError;

/// Errors from the device model.
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    /// A grid coordinate lies outside the device.
    #[error("tile position ({row}, {column}) is outside the device grid")]
    TileOutOfRange {
        /// Requested row.
        row: i64,
        /// Requested column.
        column: i64,
    },

    /// A tile ID that does not belong to this device.
    #[error("unknown tile {0}")]
    UnknownTile(TileId),

    /// A site ID that does not belong to this device.
    #[error("unknown site {0}")]
    UnknownSite(SiteId),

    /// A wire name missing from the wire enumerator.
    #[error("unknown wire '{0}'")]
    UnknownWire(String),

    /// A site type without a template.
    #[error("unknown site type '{0}'")]
    UnknownSiteType(String),

    /// A pin name missing from a site template.
    #[error("site type '{site_type}' has no pin '{pin}'")]
    UnknownPin {
        /// The site type searched.
        site_type: String,
        /// The pin name requested.
        pin: String,
    },

    /// The device description could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
