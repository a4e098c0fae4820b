//! A small design placed and routed on a device loaded from TOML.

use std::collections::HashSet;
use std::sync::Arc;
use wirefab_config::load_device_config_from_str;
use wirefab_device::{Device, SiteType};
use wirefab_diagnostics::{DiagnosticSink, TerminalRenderer};
use wirefab_route::RouteForest;
use wirefab_xdl::{DesignError, XdlAttribute, XdlDesign, XdlInstance, XdlNet, XdlPin};

const DEVICE: &str = r#"
[device]
part = "rsdummy02"
family = "DUMMY_FAMILY"
rows = 1
columns = 2
wires = ["OUT", "E0", "E1", "IN", "site_in", "site_out"]

[site_templates.SLICEL.pins.A1]
direction = "in"
internal_wire = "site_in"

[site_templates.SLICEL.pins.A]
direction = "out"
internal_wire = "site_out"

[[tiles]]
name = "CLB_X0Y0"
type = "CLB"
row = 0
column = 0
connections = [
    { source = "OUT", sink = "E0", pip = true },
    { source = "E0", sink = "E1", column_offset = -1 },
]

[[tiles.sites]]
name = "SLICE_X0Y0"
type = "SLICEL"
external_wires = { A = "OUT" }

[[tiles]]
name = "CLB_X1Y0"
type = "CLB"
row = 0
column = 1
connections = [{ source = "E1", sink = "IN", pip = true }]

[[tiles.sites]]
name = "SLICE_X1Y0"
type = "SLICEL"
external_wires = { A1 = "IN" }
"#;

fn device() -> Arc<Device> {
    let config = load_device_config_from_str(DEVICE).unwrap();
    Arc::new(Device::from_config(&config).unwrap())
}

fn design() -> XdlDesign {
    let mut design = XdlDesign::new("top", device());
    let mut driver = XdlInstance::new("driver", SiteType::new("SLICEL"));
    driver.add_attribute(XdlAttribute::new("AUSED", "", "0"));
    let mut load = XdlInstance::new("load", SiteType::new("SLICEL"));
    load.add_attribute(XdlAttribute::new("_INST_PROP", "KEEP", "TRUE"));
    load.add_attribute(XdlAttribute::new("_INST_PROP", "LOC", "SLICE_X1Y0"));
    design.add_instance(driver).unwrap();
    design.add_instance(load).unwrap();
    design.place_instance_at("driver", "SLICE_X0Y0").unwrap();
    design.place_instance_at("load", "SLICE_X1Y0").unwrap();
    design
}

#[test]
fn route_tree_feeds_net_pips() {
    let mut design = design();
    let device = Arc::clone(design.device());

    // Grow a tree from the driver pin, following every step until a wire
    // feeds a site input.
    let mut forest = RouteForest::new();
    let start = device.tile_wire("CLB_X0Y0", "OUT").unwrap();
    let root = forest.new_tree(start);
    let mut frontier = vec![root];
    let mut terminals = HashSet::new();
    while let Some(node) = frontier.pop() {
        if forest.connected_site_pin(node, &device).is_some() {
            terminals.insert(node);
            continue;
        }
        for conn in device.connections_from(&forest.wire(node)).unwrap() {
            frontier.push(forest.connect(node, conn).unwrap());
        }
    }
    assert_eq!(terminals.len(), 1);
    assert!(forest.prune(root, &terminals).unwrap());

    let terminal = *terminals.iter().next().unwrap();
    let pin = forest.connected_site_pin(terminal, &device).unwrap();
    assert_eq!(pin.name, "A1");
    assert_eq!(design.site_occupant(pin.site).unwrap().name(), "load");

    let mut net = XdlNet::new("sig");
    net.add_pin(XdlPin::outpin("driver", "A"));
    net.add_pin(XdlPin::inpin("load", "A1"));
    design.add_net(net).unwrap();
    let routed = design.net_mut("sig").unwrap().set_route(&forest, root);
    assert_eq!(routed, 2);

    let text = design.render().unwrap();
    assert!(text.contains("inst \"load\" \"SLICEL\", placed CLB_X1Y0 SLICE_X1Y0 ,"));
    assert!(text.contains("cfg \" _INST_PROP:KEEP::#LOC:TRUE::#SLICE_X1Y0 \""));
    assert!(text.contains("  outpin \"driver\" A ,\n  inpin \"load\" A1 ,\n"));
    assert!(text.contains("  pip CLB_X0Y0 OUT -> E0 ,\n  pip CLB_X1Y0 E1 -> IN ,\n"));

    let sink = DiagnosticSink::new();
    assert!(design.validate(&sink));
    assert!(forest.check(root, &sink));
    assert!(sink.diagnostics().is_empty());
}

#[test]
fn swapping_two_placed_instances() {
    let mut design = design();
    let s0 = design.instance("driver").unwrap().site().unwrap();
    let s1 = design.instance("load").unwrap().site().unwrap();

    assert!(matches!(
        design.place_instance("driver", s1),
        Err(DesignError::DoubleOccupancy { .. })
    ));

    design.unplace_instance("load").unwrap();
    design.place_instance("driver", s1).unwrap();
    design.place_instance("load", s0).unwrap();
    assert_eq!(design.site_occupant(s0).unwrap().name(), "load");
    assert_eq!(design.site_occupant(s1).unwrap().name(), "driver");
    assert_eq!(design.used_site_count(), 2);
    assert!(design.validate(&DiagnosticSink::new()));
}

#[test]
fn validation_findings_render() {
    let mut design = design();
    let mut net = XdlNet::new("floating");
    net.add_pin(XdlPin::inpin("load", "A1"));
    design.add_net(net).unwrap();

    let sink = DiagnosticSink::new();
    assert!(design.validate(&sink));
    let text = TerminalRenderer::new().render_all(&sink.take_all());
    assert_eq!(
        text,
        "warning[W202]: net 'floating' has no output pin\n  --> floating\n"
    );
}
