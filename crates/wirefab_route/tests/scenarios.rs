//! Route trees built over a device loaded from a TOML description.

use std::collections::HashSet;
use wirefab_config::load_device_config_from_str;
use wirefab_device::{Connection, Device, PinDirection, TileWire, Wire};
use wirefab_diagnostics::DiagnosticSink;
use wirefab_route::{RouteForest, RouteTreeError};

const DUMMY_DEVICE: &str = r#"
[device]
part = "rsdummy01"
family = "DUMMY_FAMILY"
rows = 1
columns = 2
wires = [
    "dummy_wire_0", "dummy_wire_1", "dummy_wire_2",
    "dummy_wire_3", "dummy_wire_4", "dummy_wire_5",
    "dummy_site_in", "dummy_site_out",
]

[site_templates.DUMMY_SITE.pins.DUMMY_SITE_PIN]
direction = "in"
internal_wire = "dummy_site_in"

[site_templates.DUMMY_SITE.pins.DUMMY_SOURCE_PIN]
direction = "out"
internal_wire = "dummy_site_out"

[[tiles]]
name = "dummy_tile"
type = "DUMMY_TILE"
row = 0
column = 0
connections = [
    { source = "dummy_wire_0", sink = "dummy_wire_1" },
    { source = "dummy_wire_1", sink = "dummy_wire_2", pip = true },
    { source = "dummy_wire_0", sink = "dummy_wire_4", pip = true },
    { source = "dummy_wire_1", sink = "dummy_wire_3", column_offset = -1 },
]

[[tiles.sites]]
name = "dummy_site"
type = "DUMMY_SITE"
external_wires = { DUMMY_SITE_PIN = "dummy_wire_4", DUMMY_SOURCE_PIN = "dummy_wire_5" }

[[tiles]]
name = "dummy_tile_east"
type = "DUMMY_TILE"
row = 0
column = 1
"#;

fn device() -> Device {
    let config = load_device_config_from_str(DUMMY_DEVICE).unwrap();
    Device::from_config(&config).unwrap()
}

fn wire(device: &Device, name: &str) -> TileWire {
    device.tile_wire("dummy_tile", name).unwrap()
}

/// The step from `from` to `to` recorded on the device.
fn step(device: &Device, from: TileWire, to: &str) -> Connection {
    let sink = device.wire_enumerator().wire_enum(to).unwrap();
    device
        .connections_from(&from.into())
        .unwrap()
        .into_iter()
        .find(|c| c.sink().wire_enum() == sink)
        .unwrap()
}

#[test]
fn site_pin_resolution_follows_pin_direction() {
    let device = device();
    let mut forest = RouteForest::new();

    let on_sink = forest.new_tree(wire(&device, "dummy_wire_4"));
    let pin = forest.connected_site_pin(on_sink, &device).unwrap();
    assert_eq!(pin.name, "DUMMY_SITE_PIN");
    assert_eq!(pin.direction, PinDirection::In);
    assert_eq!(device.site(pin.site).unwrap().name(), "dummy_site");

    let on_source = forest.new_tree(wire(&device, "dummy_wire_5"));
    assert!(forest.connected_site_pin(on_source, &device).is_none());

    let unbound = forest.new_tree(wire(&device, "dummy_wire_0"));
    assert!(forest.connected_site_pin(unbound, &device).is_none());
}

#[test]
fn route_from_device_steps_into_a_site() {
    let device = device();
    let mut forest = RouteForest::new();

    let w0 = wire(&device, "dummy_wire_0");
    let root = forest.new_tree(w0);
    let w1 = forest
        .connect(root, step(&device, w0, "dummy_wire_1"))
        .unwrap();
    let w2 = forest
        .connect(w1, step(&device, wire(&device, "dummy_wire_1"), "dummy_wire_2"))
        .unwrap();
    let east = forest
        .connect(w1, step(&device, wire(&device, "dummy_wire_1"), "dummy_wire_3"))
        .unwrap();
    let w4 = forest.connect(root, step(&device, w0, "dummy_wire_4")).unwrap();

    let sink_pin = forest.connected_site_pin(w4, &device).unwrap();
    let into_site = device.pin_connection(&sink_pin).unwrap();
    assert!(into_site.is_pin_crossing());
    let inside = forest.connect(w4, into_site).unwrap();
    assert!(matches!(forest.wire(inside), Wire::Site(_)));

    let east_tile = device.tile_by_name("dummy_tile_east").unwrap();
    assert_eq!(
        forest.wire(east).as_tile_wire().unwrap().tile,
        east_tile.id()
    );

    let pips = forest.all_pips(root);
    assert_eq!(pips.len(), 2);
    assert!(pips.iter().all(|p| p.tile == w0.tile));

    let sink = DiagnosticSink::new();
    assert!(forest.check(root, &sink));
    assert!(!sink.has_errors());

    // Keep only the branch into the site.
    assert!(forest.prune(root, &HashSet::from([inside])).unwrap());
    assert_eq!(forest.children(root), &[w4]);
    assert!(!forest.is_sourced(w1));
    assert_eq!(forest.root(w2), w1);
    assert_eq!(forest.all_pips(root).len(), 1);
}

#[test]
fn copies_survive_release_of_the_original() {
    let device = device();
    let mut forest = RouteForest::new();

    let w0 = wire(&device, "dummy_wire_0");
    let root = forest.new_tree(w0);
    let w1 = forest.connect(root, step(&device, w0, "dummy_wire_1")).unwrap();
    forest
        .connect(w1, step(&device, wire(&device, "dummy_wire_1"), "dummy_wire_2"))
        .unwrap();

    let copy = forest.deep_copy(root).unwrap();
    assert_eq!(forest.release(root).unwrap(), 3);
    assert!(!forest.contains(w1));
    assert_eq!(forest.len(), 3);
    assert_eq!(forest.subtree_size(copy), 3);
    assert_eq!(forest.all_pips(copy).len(), 1);
    assert_eq!(
        forest.connect(w1, step(&device, wire(&device, "dummy_wire_1"), "dummy_wire_2")),
        Err(RouteTreeError::InvalidArgument(w1))
    );
}

#[test]
fn adopt_joins_trees_built_separately() {
    let device = device();
    let mut forest = RouteForest::new();

    let w0 = wire(&device, "dummy_wire_0");
    let w1 = wire(&device, "dummy_wire_1");
    let head = forest.new_tree(w0);
    let tail = forest.new_tree(w1);
    forest
        .connect(tail, step(&device, w1, "dummy_wire_2"))
        .unwrap();

    let joint = step(&device, w0, "dummy_wire_1");
    forest.adopt(head, joint, tail).unwrap();
    assert_eq!(forest.root(tail), head);
    assert_eq!(forest.subtree_size(head), 3);

    let again = forest.adopt(head, joint, tail).unwrap_err();
    assert_eq!(again, RouteTreeError::AlreadySourced(tail));

    let detached = forest.disconnect(head, &joint).unwrap();
    assert_eq!(detached, tail);
    assert!(forest.is_leaf(head));
    forest.adopt(head, joint, tail).unwrap();
    assert_eq!(forest.inbound_connection(tail), Some(joint));
}
