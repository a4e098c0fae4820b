//! Opaque ID newtypes for device entities.
//!
//! Each ID is a thin `u32` wrapper that is `Copy`, `Hash`, and
//! `Serialize`/`Deserialize`. Tile and site IDs index into a [`Device`](crate::Device);
//! a [`WireEnum`] is a wire enumeration value assigned by the
//! [`WireEnumerator`](crate::WireEnumerator).

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
        pub struct $name(u32);

        impl $name {
            /// Creates an ID from a raw `u32` index.
            pub fn from_raw(index: u32) -> Self {
                Self(index)
            }

            /// Returns the raw `u32` index.
            pub fn as_raw(self) -> u32 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Opaque, copyable ID for a tile in the device grid.
    TileId
);

define_id!(
    /// Opaque, copyable ID for a site (placement location).
    SiteId
);

define_id!(
    /// A wire enumeration value. The same value names the same wire in every
    /// tile (or site) of the device.
    WireEnum
);

// SAFETY: `WireEnum` wraps a `u32`, which always fits in a `usize` on the
// supported platforms; `try_from_usize` rejects values that don't fit.
unsafe impl lasso::Key for WireEnum {
    fn into_usize(self) -> usize {
        self.0 as usize
    }

    fn try_from_usize(int: usize) -> Option<Self> {
        u32::try_from(int).ok().map(WireEnum)
    }
}
