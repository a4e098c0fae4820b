//! Instance pins as referenced from nets.

use serde::{Deserialize, Serialize};
use std::fmt;
use wirefab_device::PinDirection;

/// A named pin of an instance.
///
/// `outpin` pins drive a net and `inpin` pins are driven by one.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct XdlPin {
    name: String,
    direction: PinDirection,
    instance: String,
    net: Option<String>,
}

impl XdlPin {
    /// Creates an unconnected pin of `instance`.
    pub fn new(
        instance: impl Into<String>,
        name: impl Into<String>,
        direction: PinDirection,
    ) -> Self {
        Self {
            name: name.into(),
            direction,
            instance: instance.into(),
            net: None,
        }
    }

    /// Shorthand for an input pin.
    pub fn inpin(instance: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(instance, name, PinDirection::In)
    }

    /// Shorthand for an output pin.
    pub fn outpin(instance: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(instance, name, PinDirection::Out)
    }

    /// Pin name on the site (e.g. `A1`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pin direction.
    pub fn direction(&self) -> PinDirection {
        self.direction
    }

    /// Returns `true` for output pins.
    pub fn is_output(&self) -> bool {
        self.direction == PinDirection::Out
    }

    /// Name of the instance owning the pin.
    pub fn instance(&self) -> &str {
        &self.instance
    }

    /// Name of the net the pin is on, if any.
    pub fn net(&self) -> Option<&str> {
        self.net.as_deref()
    }

    pub(crate) fn set_net(&mut self, net: Option<String>) {
        self.net = net;
    }
}

impl fmt::Display for XdlPin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self.direction {
            PinDirection::In => "inpin",
            PinDirection::Out => "outpin",
        };
        write!(f, "{keyword} \"{}\" {}", self.instance, self.name)
    }
}
