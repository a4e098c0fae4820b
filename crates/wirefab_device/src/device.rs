//! The in-memory device database.

use crate::connection::Connection;
use crate::enumerator::WireEnumerator;
use crate::error::DeviceError;
use crate::ids::{SiteId, TileId, WireEnum};
use crate::site::{PinDirection, Site, SitePin, SitePinTemplate, SiteTemplate, SiteType};
use crate::tile::{Tile, TileType, WireConnection};
use crate::wire::{SiteWire, TileWire, Wire};
use std::collections::HashMap;
use std::path::Path;
use wirefab_config::{DeviceConfig, PinDirectionConfig};

/// A device: its tile grid, sites, site templates and wire names.
///
/// A `Device` is immutable once built and is meant to be shared (typically
/// behind an `Arc`) by every design and route tree that refers to it.
#[derive(Debug)]
pub struct Device {
    part_name: String,
    family: String,
    rows: u32,
    columns: u32,
    grid: Vec<Option<TileId>>,
    tiles: Vec<Tile>,
    sites: Vec<Site>,
    site_templates: HashMap<SiteType, SiteTemplate>,
    wire_enumerator: WireEnumerator,
}

impl Device {
    /// Loads a device from a `device.toml` description.
    pub fn load(path: &Path) -> Result<Self, DeviceError> {
        let config = wirefab_config::load_device_config(path)?;
        Self::from_config(&config)
    }

    /// Builds a device from a validated description.
    pub fn from_config(config: &DeviceConfig) -> Result<Self, DeviceError> {
        let meta = &config.device;
        let wire_enumerator = WireEnumerator::from_names(meta.wires.iter().map(String::as_str));

        let mut site_templates = HashMap::new();
        for (type_name, template_cfg) in &config.site_templates {
            let site_type = SiteType::new(type_name.as_str());
            let mut template = SiteTemplate::new(site_type.clone());
            for (pin_name, pin_cfg) in &template_cfg.pins {
                template.add_pin(SitePinTemplate {
                    name: pin_name.clone(),
                    direction: match pin_cfg.direction {
                        PinDirectionConfig::In => PinDirection::In,
                        PinDirectionConfig::Out => PinDirection::Out,
                    },
                    internal_wire: wire_enumerator.require(&pin_cfg.internal_wire)?,
                });
            }
            site_templates.insert(site_type, template);
        }

        let mut device = Device {
            part_name: meta.part.clone(),
            family: meta.family.clone(),
            rows: meta.rows,
            columns: meta.columns,
            grid: vec![None; meta.rows as usize * meta.columns as usize],
            tiles: Vec::with_capacity(config.tiles.len()),
            sites: Vec::new(),
            site_templates,
            wire_enumerator,
        };

        for tile_cfg in &config.tiles {
            let tile_id = TileId::from_raw(device.tiles.len() as u32);
            let slot = device.grid_index(i64::from(tile_cfg.row), i64::from(tile_cfg.column))?;
            device.grid[slot] = Some(tile_id);

            let mut wire_connections: HashMap<WireEnum, Vec<WireConnection>> = HashMap::new();
            for conn in &tile_cfg.connections {
                let source = device.wire_enumerator.require(&conn.source)?;
                wire_connections
                    .entry(source)
                    .or_default()
                    .push(WireConnection {
                        sink: device.wire_enumerator.require(&conn.sink)?,
                        row_offset: conn.row_offset,
                        column_offset: conn.column_offset,
                        pip: conn.pip,
                    });
            }

            let mut site_ids = Vec::with_capacity(tile_cfg.sites.len());
            for (index, site_cfg) in tile_cfg.sites.iter().enumerate() {
                let site_id = SiteId::from_raw(device.sites.len() as u32);
                let site_type = SiteType::new(site_cfg.site_type.as_str());
                let template = device.site_template(&site_type)?;
                let mut possible_types = vec![site_type.clone()];
                possible_types.extend(
                    site_cfg
                        .possible_types
                        .iter()
                        .map(|t| SiteType::new(t.as_str()))
                        .filter(|t| *t != site_type),
                );
                let mut site = Site {
                    id: site_id,
                    name: site_cfg.name.clone(),
                    index: index as u32,
                    tile: tile_id,
                    site_type: site_type.clone(),
                    possible_types,
                    external_wires: HashMap::new(),
                    external_wire_to_pin: HashMap::new(),
                };
                for (pin, wire_name) in &site_cfg.external_wires {
                    if template.pin(pin).is_none() {
                        return Err(DeviceError::UnknownPin {
                            site_type: site_type.name().to_string(),
                            pin: pin.clone(),
                        });
                    }
                    let wire = device.wire_enumerator.require(wire_name)?;
                    site.bind_external_wire(site_type.clone(), pin, wire);
                }
                device.sites.push(site);
                site_ids.push(site_id);
            }

            device.tiles.push(Tile {
                id: tile_id,
                name: tile_cfg.name.clone(),
                tile_type: TileType::new(tile_cfg.tile_type.as_str()),
                row: tile_cfg.row,
                column: tile_cfg.column,
                sites: site_ids,
                wire_connections,
            });
        }
        Ok(device)
    }

    fn grid_index(&self, row: i64, column: i64) -> Result<usize, DeviceError> {
        if row < 0 || column < 0 || row >= i64::from(self.rows) || column >= i64::from(self.columns)
        {
            return Err(DeviceError::TileOutOfRange { row, column });
        }
        Ok(row as usize * self.columns as usize + column as usize)
    }

    /// Part name.
    pub fn part_name(&self) -> &str {
        &self.part_name
    }

    /// Family name.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Grid size as `(rows, columns)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.rows, self.columns)
    }

    /// The wire name table.
    pub fn wire_enumerator(&self) -> &WireEnumerator {
        &self.wire_enumerator
    }

    /// All tiles, in ID order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// All sites, in ID order.
    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    /// Looks up a tile by ID.
    pub fn tile(&self, id: TileId) -> Result<&Tile, DeviceError> {
        self.tiles
            .get(id.as_raw() as usize)
            .ok_or(DeviceError::UnknownTile(id))
    }

    /// Looks up the tile at a grid position; empty grid cells yield `Ok(None)`.
    pub fn tile_at(&self, row: i64, column: i64) -> Result<Option<&Tile>, DeviceError> {
        let slot = self.grid_index(row, column)?;
        Ok(self.grid[slot].map(|id| &self.tiles[id.as_raw() as usize]))
    }

    /// Looks up a tile by name.
    pub fn tile_by_name(&self, name: &str) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.name == name)
    }

    /// Looks up a site by ID.
    pub fn site(&self, id: SiteId) -> Result<&Site, DeviceError> {
        self.sites
            .get(id.as_raw() as usize)
            .ok_or(DeviceError::UnknownSite(id))
    }

    /// Looks up a site by name.
    pub fn site_by_name(&self, name: &str) -> Option<&Site> {
        self.sites.iter().find(|s| s.name == name)
    }

    /// Looks up the template of a site type.
    pub fn site_template(&self, site_type: &SiteType) -> Result<&SiteTemplate, DeviceError> {
        self.site_templates
            .get(site_type)
            .ok_or_else(|| DeviceError::UnknownSiteType(site_type.name().to_string()))
    }

    /// Human-readable name of a wire, e.g. `INT_X0Y0/EE2BEG0`.
    pub fn wire_name(&self, wire: &Wire) -> String {
        let (locator, value) = match wire {
            Wire::Tile(tw) => (self.tile(tw.tile).map(|t| t.name.as_str()).ok(), tw.wire),
            Wire::Site(sw) => (self.site(sw.site).map(|s| s.name.as_str()).ok(), sw.wire),
        };
        match (locator, self.wire_enumerator.wire_name(value)) {
            (Some(l), Some(n)) => format!("{l}/{n}"),
            _ => wire.to_string(),
        }
    }

    /// Creates a tile wire handle from names.
    pub fn tile_wire(&self, tile: &str, wire: &str) -> Result<TileWire, DeviceError> {
        let tile = self
            .tile_by_name(tile)
            .ok_or_else(|| DeviceError::UnknownWire(format!("{tile}/{wire}")))?;
        Ok(TileWire::new(tile.id, self.wire_enumerator.require(wire)?))
    }

    fn site_pin(&self, site: &Site, template: &SitePinTemplate) -> Option<SitePin> {
        Some(SitePin {
            site: site.id,
            name: template.name.clone(),
            direction: template.direction,
            external_wire: site.external_wire(&template.name)?,
            internal_wire: template.internal_wire,
        })
    }

    fn pin_with_direction(
        &self,
        site: SiteId,
        name: &str,
        direction: PinDirection,
    ) -> Result<Option<SitePin>, DeviceError> {
        let site = self.site(site)?;
        let template = self.site_template(&site.site_type)?;
        Ok(template
            .pin(name)
            .filter(|p| p.direction == direction)
            .and_then(|p| self.site_pin(site, p)))
    }

    /// The input pin `name` of a site, if the site's current type has one
    /// bound to a tile wire.
    pub fn sink_pin(&self, site: SiteId, name: &str) -> Result<Option<SitePin>, DeviceError> {
        self.pin_with_direction(site, name, PinDirection::In)
    }

    /// The output pin `name` of a site, if the site's current type has one
    /// bound to a tile wire.
    pub fn source_pin(&self, site: SiteId, name: &str) -> Result<Option<SitePin>, DeviceError> {
        self.pin_with_direction(site, name, PinDirection::Out)
    }

    /// The site input pin a wire drives, if any.
    ///
    /// Only tile wires bound to an *input* pin of a site in the same tile
    /// resolve. Wires bound to output pins drive into the fabric, not into the
    /// site, so they never match; neither do site wires.
    pub fn connected_site_pin(&self, wire: &Wire) -> Option<SitePin> {
        let tw = wire.as_tile_wire()?;
        let tile = self.tile(tw.tile).ok()?;
        tile.sites.iter().find_map(|&site_id| {
            let site = self.site(site_id).ok()?;
            let pin = site.pin_for_external_wire(tw.wire)?;
            let template = self.site_template(&site.site_type).ok()?.pin(pin)?;
            if template.direction != PinDirection::In {
                return None;
            }
            self.site_pin(site, template)
        })
    }

    /// The connection stepping across a site pin, in the pin's direction.
    pub fn pin_connection(&self, pin: &SitePin) -> Result<Connection, DeviceError> {
        let site = self.site(pin.site)?;
        let outside = TileWire::new(site.tile, pin.external_wire);
        let inside = SiteWire::new(site.id, pin.internal_wire);
        Ok(match pin.direction {
            PinDirection::In => Connection::TileToSite {
                source: outside,
                sink: inside,
            },
            PinDirection::Out => Connection::SiteToTile {
                source: inside,
                sink: outside,
            },
        })
    }

    /// Resolves a tile-local wire step into a connection, locating the sink
    /// tile through the step's offsets.
    pub fn wire_connection(
        &self,
        source: TileWire,
        wc: &WireConnection,
    ) -> Result<Connection, DeviceError> {
        let tile = self.tile(source.tile)?;
        let row = i64::from(tile.row) - i64::from(wc.row_offset);
        let column = i64::from(tile.column) - i64::from(wc.column_offset);
        let sink_tile = self
            .tile_at(row, column)?
            .ok_or(DeviceError::TileOutOfRange { row, column })?;
        Ok(Connection::tile_wire(
            source,
            TileWire::new(sink_tile.id, wc.sink),
            wc.pip,
        ))
    }

    /// Every connection leaving a wire: tile wire steps and, where the wire
    /// feeds a site input pin, the step into the site; for a site wire, the
    /// step out through the output pin it drives.
    pub fn connections_from(&self, wire: &Wire) -> Result<Vec<Connection>, DeviceError> {
        match wire {
            Wire::Tile(tw) => {
                let tile = self.tile(tw.tile)?;
                let mut out = tile
                    .wire_connections(tw.wire)
                    .iter()
                    .map(|wc| self.wire_connection(*tw, wc))
                    .collect::<Result<Vec<_>, _>>()?;
                if let Some(pin) = self.connected_site_pin(wire) {
                    out.push(self.pin_connection(&pin)?);
                }
                Ok(out)
            }
            Wire::Site(sw) => {
                let site = self.site(sw.site)?;
                let template = self.site_template(&site.site_type)?;
                template
                    .sources()
                    .filter(|p| p.internal_wire == sw.wire)
                    .filter_map(|p| self.site_pin(site, p))
                    .map(|pin| self.pin_connection(&pin))
                    .collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wirefab_config::load_device_config_from_str;

    const TWO_TILES: &str = r#"
[device]
part = "rstest02"
family = "TEST"
rows = 2
columns = 1
wires = ["w0", "w1", "w2", "w3", "w4", "w5", "site_in", "site_out"]

[site_templates.SLICE.pins.IN0]
direction = "in"
internal_wire = "site_in"

[site_templates.SLICE.pins.OUT0]
direction = "out"
internal_wire = "site_out"

[[tiles]]
name = "T_X0Y0"
type = "CLB"
row = 0
column = 0
connections = [
    { source = "w0", sink = "w1", pip = true },
    { source = "w1", sink = "w2", row_offset = -1 },
    { source = "w1", sink = "w3", row_offset = 1 },
]

[[tiles.sites]]
name = "SLICE_X0Y0"
type = "SLICE"
external_wires = { IN0 = "w4", OUT0 = "w5" }

[[tiles]]
name = "T_X0Y1"
type = "CLB"
row = 1
column = 0
"#;

    fn device() -> Device {
        Device::from_config(&load_device_config_from_str(TWO_TILES).unwrap()).unwrap()
    }

    fn w(d: &Device, name: &str) -> WireEnum {
        d.wire_enumerator().wire_enum(name).unwrap()
    }

    #[test]
    fn builds_grid_and_sites() {
        let d = device();
        assert_eq!(d.dimensions(), (2, 1));
        assert_eq!(d.tiles().len(), 2);
        assert_eq!(d.tile_at(1, 0).unwrap().unwrap().name(), "T_X0Y1");
        assert!(d.tile_at(2, 0).is_err());
        let site = d.site_by_name("SLICE_X0Y0").unwrap();
        assert_eq!(site.tile(), TileId::from_raw(0));
        assert_eq!(site.external_wire("IN0"), Some(w(&d, "w4")));
    }

    #[test]
    fn sink_pin_resolves_only_inputs() {
        let d = device();
        let tile = TileId::from_raw(0);
        let sink = d
            .connected_site_pin(&TileWire::new(tile, w(&d, "w4")).into())
            .unwrap();
        assert_eq!(sink.name, "IN0");
        assert!(sink.is_input());
        assert!(d
            .connected_site_pin(&TileWire::new(tile, w(&d, "w5")).into())
            .is_none());
        assert!(d
            .connected_site_pin(&TileWire::new(tile, w(&d, "w0")).into())
            .is_none());
    }

    #[test]
    fn named_pin_lookup_checks_direction() {
        let d = device();
        let site = SiteId::from_raw(0);
        assert!(d.sink_pin(site, "IN0").unwrap().is_some());
        assert!(d.sink_pin(site, "OUT0").unwrap().is_none());
        assert!(d.source_pin(site, "OUT0").unwrap().is_some());
        assert!(d.sink_pin(SiteId::from_raw(5), "IN0").is_err());
    }

    #[test]
    fn wire_connections_follow_offsets() {
        let d = device();
        let source = TileWire::new(TileId::from_raw(0), w(&d, "w1"));
        let wcs = d
            .tile(source.tile)
            .unwrap()
            .wire_connections(source.wire)
            .to_vec();
        let down = d.wire_connection(source, &wcs[0]).unwrap();
        assert_eq!(
            down.sink(),
            Wire::Tile(TileWire::new(TileId::from_raw(1), w(&d, "w2")))
        );
        assert!(matches!(
            d.wire_connection(source, &wcs[1]),
            Err(DeviceError::TileOutOfRange { row: -1, column: 0 })
        ));
    }

    #[test]
    fn connections_from_tile_wire_include_site_entry() {
        let d = device();
        let tile = TileId::from_raw(0);
        let pip = d
            .connections_from(&TileWire::new(tile, w(&d, "w0")).into())
            .unwrap();
        assert_eq!(pip.len(), 1);
        assert!(pip[0].is_pip());

        let into_site = d
            .connections_from(&TileWire::new(tile, w(&d, "w4")).into())
            .unwrap();
        assert_eq!(into_site.len(), 1);
        assert_eq!(
            into_site[0].sink(),
            Wire::Site(SiteWire::new(SiteId::from_raw(0), w(&d, "site_in")))
        );
    }

    #[test]
    fn connections_from_site_wire_leave_through_output() {
        let d = device();
        let out = d
            .connections_from(&SiteWire::new(SiteId::from_raw(0), w(&d, "site_out")).into())
            .unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(
            out[0].sink(),
            Wire::Tile(TileWire::new(TileId::from_raw(0), w(&d, "w5")))
        );
    }

    #[test]
    fn wire_names() {
        let d = device();
        let tw = d.tile_wire("T_X0Y0", "w3").unwrap();
        assert_eq!(d.wire_name(&tw.into()), "T_X0Y0/w3");
        assert!(d.tile_wire("T_X0Y0", "nope").is_err());
    }
}
