//! Site occupants: XDL instances.

use crate::attribute::XdlAttribute;
use crate::error::{DesignError, DesignResult};
use crate::module::XdlModule;
use crate::pin::XdlPin;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use wirefab_device::{Device, SiteId, SiteType};

/// Whether an unplaced IO instance must land on a bonded pad.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Bonded {
    /// Must be placed on a site bonded to a package pin.
    Bonded,
    /// Must be placed on an unbonded site.
    Unbonded,
}

impl fmt::Display for Bonded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bonded::Bonded => f.write_str("bonded"),
            Bonded::Unbonded => f.write_str("unbonded"),
        }
    }
}

/// A logic instance: the occupant of one site, or of none while unplaced.
///
/// Placement is owned by the [`XdlDesign`](crate::XdlDesign) holding the
/// instance; see [`XdlDesign::place_instance`](crate::XdlDesign::place_instance).
/// Attributes are keyed by physical name and kept in name order.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct XdlInstance {
    name: String,
    site_type: SiteType,
    site: Option<SiteId>,
    bonded: Option<Bonded>,
    attributes: BTreeMap<String, XdlAttribute>,
    pins: BTreeMap<String, XdlPin>,
    nets: BTreeSet<String>,
    module_instance: Option<String>,
    module_template: Option<String>,
    module_template_instance: Option<String>,
}

impl XdlInstance {
    /// Creates an unplaced instance of the given site type.
    pub fn new(name: impl Into<String>, site_type: SiteType) -> Self {
        Self {
            name: name.into(),
            site_type,
            site: None,
            bonded: None,
            attributes: BTreeMap::new(),
            pins: BTreeMap::new(),
            nets: BTreeSet::new(),
            module_instance: None,
            module_template: None,
            module_template_instance: None,
        }
    }

    /// Instance name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The site type the instance needs.
    pub fn site_type(&self) -> &SiteType {
        &self.site_type
    }

    /// The bonded requirement; only meaningful while unplaced.
    pub fn bonded(&self) -> Option<Bonded> {
        self.bonded
    }

    /// Sets the bonded requirement.
    pub fn set_bonded(&mut self, bonded: Option<Bonded>) {
        self.bonded = bonded;
    }

    /// The site the instance occupies.
    pub fn site(&self) -> Option<SiteId> {
        self.site
    }

    /// Returns `true` if the instance occupies a site.
    pub fn is_placed(&self) -> bool {
        self.site.is_some()
    }

    /// Records the placement. Placing clears the bonded requirement.
    pub(crate) fn set_site(&mut self, site: Option<SiteId>) {
        if site.is_some() {
            self.bonded = None;
        }
        self.site = site;
    }

    /// Places the instance before it is added to a design. The design checks
    /// the site when the instance is added.
    pub fn with_site(mut self, site: SiteId) -> Self {
        self.set_site(Some(site));
        self
    }

    /// The `X` coordinate in the name of the occupied site (`SLICE_X5Y10`
    /// gives 5).
    pub fn instance_x(&self, device: &Device) -> Option<u32> {
        self.site_xy(device).map(|(x, _)| x)
    }

    /// The `Y` coordinate in the name of the occupied site (`SLICE_X5Y10`
    /// gives 10).
    pub fn instance_y(&self, device: &Device) -> Option<u32> {
        self.site_xy(device).map(|(_, y)| y)
    }

    fn site_xy(&self, device: &Device) -> Option<(u32, u32)> {
        device.site(self.site?).ok()?.instance_xy()
    }

    // --- attributes ---

    /// All attributes, in physical-name order.
    pub fn attributes(&self) -> impl Iterator<Item = &XdlAttribute> {
        self.attributes.values()
    }

    /// The attribute with the given physical name.
    pub fn attribute(&self, physical_name: &str) -> Option<&XdlAttribute> {
        self.attributes.get(physical_name)
    }

    /// The value of the attribute with the given physical name.
    pub fn attribute_value(&self, physical_name: &str) -> Option<&str> {
        self.attribute(physical_name).map(XdlAttribute::value)
    }

    /// Returns `true` if the instance has the attribute.
    pub fn has_attribute(&self, physical_name: &str) -> bool {
        self.attributes.contains_key(physical_name)
    }

    /// Returns `true` if the attribute exists and has exactly `value`.
    pub fn test_attribute_value(&self, physical_name: &str, value: &str) -> bool {
        self.attribute_value(physical_name) == Some(value)
    }

    /// Adds an attribute.
    ///
    /// A multi-valued attribute merges into an existing one of the same
    /// physical name; any other attribute replaces it.
    pub fn add_attribute(&mut self, attribute: XdlAttribute) {
        if attribute.is_multi_valued() {
            if let Some(existing) = self.attributes.get_mut(attribute.physical_name()) {
                existing.merge(attribute.logical_name(), attribute.value());
                return;
            }
        }
        self.attributes
            .insert(attribute.physical_name().to_string(), attribute);
    }

    /// Removes and returns an attribute.
    pub fn remove_attribute(&mut self, physical_name: &str) -> DesignResult<XdlAttribute> {
        self.attributes
            .remove(physical_name)
            .ok_or_else(|| DesignError::AttributeNotFound {
                instance: self.name.clone(),
                attribute: physical_name.to_string(),
            })
    }

    // --- pins and nets ---

    /// Adds a pin, replacing a pin of the same name. Returns the replaced pin.
    pub fn add_pin(&mut self, pin: XdlPin) -> Option<XdlPin> {
        self.pins.insert(pin.name().to_string(), pin)
    }

    /// Removes a pin by name.
    pub fn remove_pin(&mut self, name: &str) -> Option<XdlPin> {
        self.pins.remove(name)
    }

    /// The pin with the given name.
    pub fn pin(&self, name: &str) -> Option<&XdlPin> {
        self.pins.get(name)
    }

    /// All pins, in name order.
    pub fn pins(&self) -> impl Iterator<Item = &XdlPin> {
        self.pins.values()
    }

    /// Pin names, in order.
    pub fn pin_names(&self) -> impl Iterator<Item = &str> {
        self.pins.keys().map(String::as_str)
    }

    /// Records that the instance is on a net.
    pub fn add_to_net(&mut self, net: impl Into<String>) {
        self.nets.insert(net.into());
    }

    /// Names of the nets the instance is on.
    pub fn nets(&self) -> impl Iterator<Item = &str> {
        self.nets.iter().map(String::as_str)
    }

    // --- modules ---

    /// Name of the module instance this instance belongs to.
    pub fn module_instance_name(&self) -> Option<&str> {
        self.module_instance.as_deref()
    }

    /// Name of the module template this instance implements part of.
    pub fn module_template_name(&self) -> Option<&str> {
        self.module_template.as_deref()
    }

    /// Name of the template instance this instance implements.
    pub fn module_template_instance_name(&self) -> Option<&str> {
        self.module_template_instance.as_deref()
    }

    pub(crate) fn set_module_template(&mut self, module: &str) {
        self.module_template = Some(module.to_string());
    }

    pub(crate) fn link_module_instance(
        &mut self,
        module_instance: &str,
        module: &str,
        template_instance: &str,
    ) {
        self.module_instance = Some(module_instance.to_string());
        self.module_template = Some(module.to_string());
        self.module_template_instance = Some(template_instance.to_string());
    }

    /// Returns `true` if both instances belong to the same module instance.
    pub fn is_member_of_same_module_instance(&self, other: &XdlInstance) -> bool {
        self.module_instance.is_some() && self.module_instance == other.module_instance
    }

    /// Clears every module link.
    pub fn detach_from_module(&mut self) {
        self.module_instance = None;
        self.module_template = None;
        self.module_template_instance = None;
    }

    /// Returns `true` if this instance is the anchor of `module`, either as a
    /// member of the template itself or as the implementation of the
    /// template's anchor in a module instance.
    pub fn is_anchor(&self, module: &XdlModule) -> bool {
        if self.module_template.as_deref() != Some(module.name()) {
            return false;
        }
        let anchor_of_template = self
            .module_template_instance
            .as_deref()
            .unwrap_or(self.name.as_str());
        module.anchor() == Some(anchor_of_template)
    }

    // --- textual form ---

    /// Renders the instance as an XDL `inst` statement.
    ///
    /// ```text
    /// inst "ff" "SLICEL", placed CLB_X1Y1 SLICE_X1Y1 ,
    ///   cfg " CLKINV::CLK DFF:ff:#FF "
    ///   ;
    /// ```
    pub fn render(&self, device: &Device) -> DesignResult<String> {
        let mut out = format!("inst \"{}\" \"{}\", ", self.name, self.site_type);
        match self.site {
            Some(id) => {
                let site = device.site(id)?;
                let tile = device.tile(site.tile())?;
                out.push_str(&format!("placed {} {}", tile.name(), site.name()));
            }
            None => {
                out.push_str("unplaced");
                if let Some(bonded) = self.bonded {
                    out.push_str(&format!(" {bonded}"));
                }
            }
        }
        if let (Some(mi), Some(mt), Some(mti)) = (
            &self.module_instance,
            &self.module_template,
            &self.module_template_instance,
        ) {
            out.push_str(&format!(" module \"{mi}\" \"{mt}\" \"{mti}\""));
        }
        out.push_str(" ,\n  cfg \"");
        for attr in self.attributes.values() {
            out.push_str(&format!(" {attr}"));
        }
        out.push_str(" \"\n  ;\n");
        Ok(out)
    }
}
