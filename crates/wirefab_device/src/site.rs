//! Sites, site types, and site pins.

use crate::ids::{SiteId, TileId, WireEnum};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// The type a site is configured as (e.g. `SLICEL`, `IOB`).
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct SiteType(String);

impl SiteType {
    /// Creates a site type from its name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the type name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SiteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Direction of a site pin, seen from the site.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum PinDirection {
    /// Signals flow from the fabric into the site.
    In,
    /// Signals flow from the site into the fabric.
    Out,
}

/// A pin shared by every site of one type.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SitePinTemplate {
    /// Pin name.
    pub name: String,
    /// Pin direction.
    pub direction: PinDirection,
    /// The site-internal wire on the inside of the pin.
    pub internal_wire: WireEnum,
}

/// The pin set of a site type.
#[derive(Clone, Debug)]
pub struct SiteTemplate {
    pub(crate) site_type: SiteType,
    pub(crate) pins: BTreeMap<String, SitePinTemplate>,
}

impl SiteTemplate {
    /// Creates an empty template.
    pub fn new(site_type: SiteType) -> Self {
        Self {
            site_type,
            pins: BTreeMap::new(),
        }
    }

    /// Adds (or replaces) a pin.
    pub fn add_pin(&mut self, pin: SitePinTemplate) {
        self.pins.insert(pin.name.clone(), pin);
    }

    /// The site type this template describes.
    pub fn site_type(&self) -> &SiteType {
        &self.site_type
    }

    /// Looks up a pin by name.
    pub fn pin(&self, name: &str) -> Option<&SitePinTemplate> {
        self.pins.get(name)
    }

    /// Input pins, in name order.
    pub fn sinks(&self) -> impl Iterator<Item = &SitePinTemplate> {
        self.pins
            .values()
            .filter(|p| p.direction == PinDirection::In)
    }

    /// Output pins, in name order.
    pub fn sources(&self) -> impl Iterator<Item = &SitePinTemplate> {
        self.pins
            .values()
            .filter(|p| p.direction == PinDirection::Out)
    }
}

/// A placement location inside a tile.
///
/// The external-wire tables are kept per site type because a site that can be
/// reconfigured exposes different pins depending on its current type.
#[derive(Clone, Debug)]
pub struct Site {
    pub(crate) id: SiteId,
    pub(crate) name: String,
    pub(crate) index: u32,
    pub(crate) tile: TileId,
    pub(crate) site_type: SiteType,
    pub(crate) possible_types: Vec<SiteType>,
    pub(crate) external_wires: HashMap<SiteType, HashMap<String, WireEnum>>,
    pub(crate) external_wire_to_pin: HashMap<SiteType, HashMap<WireEnum, String>>,
}

impl Site {
    /// This site's ID.
    pub fn id(&self) -> SiteId {
        self.id
    }

    /// Site name (e.g. `SLICE_X3Y12`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Index of the site within its tile.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// The tile hosting the site.
    pub fn tile(&self) -> TileId {
        self.tile
    }

    /// The current site type.
    pub fn site_type(&self) -> &SiteType {
        &self.site_type
    }

    /// Every type the site may be configured as, current type first.
    pub fn possible_types(&self) -> &[SiteType] {
        &self.possible_types
    }

    /// The tile wire bound to `pin` under the current site type.
    pub fn external_wire(&self, pin: &str) -> Option<WireEnum> {
        self.external_wires
            .get(&self.site_type)
            .and_then(|m| m.get(pin))
            .copied()
    }

    /// The pin bound to tile wire `wire` under the current site type.
    pub fn pin_for_external_wire(&self, wire: WireEnum) -> Option<&str> {
        self.external_wire_to_pin
            .get(&self.site_type)
            .and_then(|m| m.get(&wire))
            .map(String::as_str)
    }

    /// Records that `pin` is bound to tile wire `wire` when the site has
    /// type `site_type`.
    pub(crate) fn bind_external_wire(&mut self, site_type: SiteType, pin: &str, wire: WireEnum) {
        self.external_wires
            .entry(site_type.clone())
            .or_default()
            .insert(pin.to_string(), wire);
        self.external_wire_to_pin
            .entry(site_type)
            .or_default()
            .insert(wire, pin.to_string());
    }

    /// Parses the `X<n>Y<m>` suffix of the site name.
    ///
    /// Returns `None` for names without coordinates (e.g. `dummy_site`).
    pub fn instance_xy(&self) -> Option<(u32, u32)> {
        let suffix = &self.name[self.name.rfind("_X")? + 2..];
        let (x, y) = suffix.split_once('Y')?;
        Some((x.parse().ok()?, y.parse().ok()?))
    }
}

/// A concrete pin on a concrete site.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct SitePin {
    /// The site.
    pub site: SiteId,
    /// Pin name.
    pub name: String,
    /// Pin direction.
    pub direction: PinDirection,
    /// The tile wire on the outside of the pin.
    pub external_wire: WireEnum,
    /// The site wire on the inside of the pin.
    pub internal_wire: WireEnum,
}

impl SitePin {
    /// Returns `true` for pins that carry signals into the site.
    pub fn is_input(&self) -> bool {
        self.direction == PinDirection::In
    }
}
