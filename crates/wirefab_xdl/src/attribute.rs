//! Instance configuration attributes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Joins the logical names and values of a multi-valued attribute.
pub const MULTI_VALUE_SEPARATOR: &str = "::#";

/// One `cfg` entry of an instance: `physical:logical:value`.
///
/// The physical name identifies the configurable resource of the site; the
/// logical name usually names the BEL or signal that configured it.
///
/// Attributes whose physical name starts with `_` are multi-valued: adding
/// the same physical name again merges into the existing attribute instead of
/// replacing it (see [`merge`](Self::merge)).
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct XdlAttribute {
    physical_name: String,
    logical_name: String,
    value: String,
}

impl XdlAttribute {
    /// Creates an attribute.
    pub fn new(
        physical_name: impl Into<String>,
        logical_name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            physical_name: physical_name.into(),
            logical_name: logical_name.into(),
            value: value.into(),
        }
    }

    /// Returns `true` if attributes with this physical name merge on
    /// repeated addition.
    pub fn is_multi_valued_name(physical_name: &str) -> bool {
        physical_name.starts_with('_')
    }

    /// Returns `true` if this attribute merges on repeated addition.
    pub fn is_multi_valued(&self) -> bool {
        Self::is_multi_valued_name(&self.physical_name)
    }

    /// The physical (resource) name.
    pub fn physical_name(&self) -> &str {
        &self.physical_name
    }

    /// The logical name; joined with [`MULTI_VALUE_SEPARATOR`] when merged.
    pub fn logical_name(&self) -> &str {
        &self.logical_name
    }

    /// The value; joined with [`MULTI_VALUE_SEPARATOR`] when merged.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replaces the logical name.
    pub fn set_logical_name(&mut self, logical_name: impl Into<String>) {
        self.logical_name = logical_name.into();
    }

    /// Replaces the value.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Appends another logical name and value to this attribute.
    pub fn merge(&mut self, logical_name: &str, value: &str) {
        self.logical_name.push_str(MULTI_VALUE_SEPARATOR);
        self.logical_name.push_str(logical_name);
        self.value.push_str(MULTI_VALUE_SEPARATOR);
        self.value.push_str(value);
    }

    /// The `(logical name, value)` pairs merged into this attribute, in the
    /// order they were added. Single-valued attributes yield one pair.
    pub fn values(&self) -> impl Iterator<Item = (&str, &str)> {
        self.logical_name
            .split(MULTI_VALUE_SEPARATOR)
            .zip(self.value.split(MULTI_VALUE_SEPARATOR))
    }
}

impl fmt::Display for XdlAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.physical_name, self.logical_name, self.value
        )
    }
}
