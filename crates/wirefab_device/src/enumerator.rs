//! Wire name <-> enumeration value mapping.

use crate::error::DeviceError;
use crate::ids::WireEnum;
use lasso::Rodeo;

/// Maps wire names to [`WireEnum`] values and back.
///
/// Enumeration values are assigned densely from zero in registration order,
/// so a device description's wire list position is the wire's value.
#[derive(Debug)]
pub struct WireEnumerator {
    rodeo: Rodeo<WireEnum>,
}

impl WireEnumerator {
    /// Creates an empty enumerator.
    pub fn new() -> Self {
        Self {
            rodeo: Rodeo::new(),
        }
    }

    /// Builds an enumerator from an ordered list of wire names.
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut we = Self::new();
        for name in names {
            we.register(name);
        }
        we
    }

    /// Returns the value for `name`, assigning the next free value if the
    /// name is new.
    pub fn register(&mut self, name: &str) -> WireEnum {
        self.rodeo.get_or_intern(name)
    }

    /// Looks up the value of a wire name.
    pub fn wire_enum(&self, name: &str) -> Option<WireEnum> {
        self.rodeo.get(name)
    }

    /// Looks up the value of a wire name, failing if it is unknown.
    pub fn require(&self, name: &str) -> Result<WireEnum, DeviceError> {
        self.wire_enum(name)
            .ok_or_else(|| DeviceError::UnknownWire(name.to_string()))
    }

    /// Returns the name of a wire value.
    pub fn wire_name(&self, wire: WireEnum) -> Option<&str> {
        self.rodeo.try_resolve(&wire)
    }

    /// Number of registered wires.
    pub fn len(&self) -> usize {
        self.rodeo.len()
    }

    /// Returns `true` if no wire is registered.
    pub fn is_empty(&self) -> bool {
        self.rodeo.is_empty()
    }
}

impl Default for WireEnumerator {
    fn default() -> Self {
        Self::new()
    }
}
