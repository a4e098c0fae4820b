//! Nets: the pins a signal joins and the PIPs routing it.

use crate::error::{DesignError, DesignResult};
use crate::pin::XdlPin;
use serde::{Deserialize, Serialize};
use wirefab_device::{Device, DeviceError, Pip, WireEnum};
use wirefab_route::{NodeId, RouteForest};

/// A net of the design.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct XdlNet {
    name: String,
    pins: Vec<XdlPin>,
    pips: Vec<Pip>,
}

impl XdlNet {
    /// Creates an empty, unrouted net.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pins: Vec::new(),
            pips: Vec::new(),
        }
    }

    /// Net name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds a pin to the net and records the net on the pin.
    pub fn add_pin(&mut self, mut pin: XdlPin) {
        pin.set_net(Some(self.name.clone()));
        self.pins.push(pin);
    }

    /// All pins, in the order they were added.
    pub fn pins(&self) -> &[XdlPin] {
        &self.pins
    }

    /// Drops every pin of `instance`. Returns how many were dropped.
    pub fn remove_pins_of(&mut self, instance: &str) -> usize {
        let before = self.pins.len();
        self.pins.retain(|p| p.instance() != instance);
        before - self.pins.len()
    }

    /// The first output pin, which drives the net.
    pub fn source(&self) -> Option<&XdlPin> {
        self.pins.iter().find(|p| p.is_output())
    }

    /// The input pins.
    pub fn sinks(&self) -> impl Iterator<Item = &XdlPin> {
        self.pins.iter().filter(|p| !p.is_output())
    }

    /// Adds a PIP unless the net already uses it.
    pub fn add_pip(&mut self, pip: Pip) {
        if !self.pips.contains(&pip) {
            self.pips.push(pip);
        }
    }

    /// PIPs used by the net.
    pub fn pips(&self) -> &[Pip] {
        &self.pips
    }

    /// Returns `true` if the net has at least one PIP.
    pub fn is_routed(&self) -> bool {
        !self.pips.is_empty()
    }

    /// Replaces the net's PIPs with those of the route tree at `root`, in
    /// pre-order. Returns how many PIPs the net now uses.
    pub fn set_route(&mut self, forest: &RouteForest, root: NodeId) -> usize {
        self.pips.clear();
        for node in forest.preorder(root).skip(1) {
            if let Some(pip) = forest.inbound_connection(node).and_then(|c| c.pip()) {
                self.add_pip(pip);
            }
        }
        self.pips.len()
    }

    /// Renders the net as an XDL `net` statement.
    pub fn render(&self, device: &Device) -> DesignResult<String> {
        let mut out = format!("net \"{}\" ,\n", self.name);
        for pin in &self.pins {
            out.push_str(&format!("  {pin} ,\n"));
        }
        for pip in &self.pips {
            out.push_str(&format!(
                "  pip {} {} -> {} ,\n",
                device.tile(pip.tile)?.name(),
                wire_name(device, pip.source)?,
                wire_name(device, pip.sink)?
            ));
        }
        out.push_str("  ;\n");
        Ok(out)
    }
}

fn wire_name(device: &Device, wire: WireEnum) -> DesignResult<&str> {
    device
        .wire_enumerator()
        .wire_name(wire)
        .ok_or_else(|| DesignError::Device(DeviceError::UnknownWire(wire.to_string())))
}
