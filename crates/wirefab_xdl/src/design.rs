//! The design registry.
//!
//! An [`XdlDesign`] owns its instances, nets and modules, and is the only
//! place where site occupancy is recorded. Every placed instance occupies
//! exactly one site and every used site names exactly one instance; all
//! placement edits go through the design so the two views cannot drift.

use crate::attribute::XdlAttribute;
use crate::error::{DesignError, DesignResult};
use crate::instance::{Bonded, XdlInstance};
use crate::module::{XdlModule, XdlModuleInstance};
use crate::net::XdlNet;
use crate::pin::XdlPin;
use std::collections::{BTreeMap, HashMap};
use std::ops::Deref;
use std::sync::Arc;
use wirefab_device::{Device, SiteId};
use wirefab_diagnostics::{Category, Diagnostic, DiagnosticCode, DiagnosticSink};

/// A used site whose recorded occupant does not occupy it.
pub const STALE_OCCUPANCY: DiagnosticCode = DiagnosticCode::new(Category::Error, 201);
/// A placed instance whose site is not recorded as used by it.
pub const UNRECORDED_PLACEMENT: DiagnosticCode = DiagnosticCode::new(Category::Error, 202);
/// A module link naming a module or module instance the design lacks.
pub const DANGLING_MODULE_LINK: DiagnosticCode = DiagnosticCode::new(Category::Error, 203);
/// A net pin on an instance the design lacks.
pub const DANGLING_NET_PIN: DiagnosticCode = DiagnosticCode::new(Category::Warning, 201);
/// A net with pins but no output pin.
pub const UNDRIVEN_NET: DiagnosticCode = DiagnosticCode::new(Category::Warning, 202);
/// A module instance member that is no longer linked back to it.
pub const DETACHED_MEMBER: DiagnosticCode = DiagnosticCode::new(Category::Warning, 203);

/// A design: instances placed on a device, the nets joining them, and the
/// modules they were instantiated from.
#[derive(Debug, Clone)]
pub struct XdlDesign {
    name: String,
    device: Arc<Device>,
    instances: BTreeMap<String, XdlInstance>,
    nets: BTreeMap<String, XdlNet>,
    modules: BTreeMap<String, XdlModule>,
    module_instances: BTreeMap<String, XdlModuleInstance>,
    used_sites: HashMap<SiteId, String>,
}

impl XdlDesign {
    /// Creates an empty design on `device`.
    pub fn new(name: impl Into<String>, device: Arc<Device>) -> Self {
        Self {
            name: name.into(),
            device,
            instances: BTreeMap::new(),
            nets: BTreeMap::new(),
            modules: BTreeMap::new(),
            module_instances: BTreeMap::new(),
            used_sites: HashMap::new(),
        }
    }

    /// Design name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The device the design targets.
    pub fn device(&self) -> &Arc<Device> {
        &self.device
    }

    // --- instances and placement ---

    /// Adds an instance. A pre-placed instance claims its site.
    pub fn add_instance(&mut self, instance: XdlInstance) -> DesignResult<()> {
        if self.instances.contains_key(instance.name()) {
            return Err(DesignError::DuplicateInstance(instance.name().to_string()));
        }
        if let Some(site) = instance.site() {
            self.check_site_free(site, instance.name())?;
            self.used_sites.insert(site, instance.name().to_string());
        }
        self.instances.insert(instance.name().to_string(), instance);
        Ok(())
    }

    /// Removes an instance, releasing its site and its module membership.
    /// Its pins are dropped from every net that lists them.
    pub fn remove_instance(&mut self, name: &str) -> DesignResult<XdlInstance> {
        let instance = self
            .instances
            .remove(name)
            .ok_or_else(|| DesignError::InstanceNotFound(name.to_string()))?;
        if let Some(site) = instance.site() {
            self.used_sites.remove(&site);
        }
        if let Some(mi) = instance.module_instance_name() {
            if let Some(mi) = self.module_instances.get_mut(mi) {
                mi.remove_member(name);
            }
        }
        for net in self.nets.values_mut() {
            net.remove_pins_of(name);
        }
        Ok(instance)
    }

    /// The instance with the given name.
    pub fn instance(&self, name: &str) -> Option<&XdlInstance> {
        self.instances.get(name)
    }

    /// Edit access to an instance's attributes, pins and nets. Placement
    /// can only change through [`place_instance`](Self::place_instance) and
    /// [`unplace_instance`](Self::unplace_instance).
    pub fn instance_mut(&mut self, name: &str) -> Option<InstanceEdit<'_>> {
        self.instances
            .get_mut(name)
            .map(|instance| InstanceEdit { instance })
    }

    /// All instances, in name order.
    pub fn instances(&self) -> impl Iterator<Item = &XdlInstance> {
        self.instances.values()
    }

    /// Number of instances.
    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    fn check_site_free(&self, site: SiteId, instance: &str) -> DesignResult<()> {
        let site_name = self.device.site(site)?.name();
        match self.used_sites.get(&site) {
            Some(occupant) if occupant != instance => Err(DesignError::DoubleOccupancy {
                site: site_name.to_string(),
                occupant: occupant.clone(),
                instance: instance.to_string(),
            }),
            _ => Ok(()),
        }
    }

    /// Places an instance on `site`, releasing the site it occupied before.
    ///
    /// Fails without changing anything if the site holds another instance.
    /// Placing clears the instance's bonded requirement.
    pub fn place_instance(&mut self, name: &str, site: SiteId) -> DesignResult<()> {
        let previous = self
            .instances
            .get(name)
            .ok_or_else(|| DesignError::InstanceNotFound(name.to_string()))?
            .site();
        self.check_site_free(site, name)?;

        if let Some(previous) = previous {
            self.used_sites.remove(&previous);
        }
        self.used_sites.insert(site, name.to_string());
        if let Some(instance) = self.instances.get_mut(name) {
            instance.set_site(Some(site));
        }
        Ok(())
    }

    /// Places an instance on the site with the given name.
    pub fn place_instance_at(&mut self, name: &str, site_name: &str) -> DesignResult<()> {
        let site = self
            .device
            .site_by_name(site_name)
            .ok_or_else(|| DesignError::DesignAssembly(format!("no site named '{site_name}'")))?
            .id();
        self.place_instance(name, site)
    }

    /// Unplaces an instance, releasing its site. Returns the released site.
    pub fn unplace_instance(&mut self, name: &str) -> DesignResult<Option<SiteId>> {
        let instance = self
            .instances
            .get_mut(name)
            .ok_or_else(|| DesignError::InstanceNotFound(name.to_string()))?;
        let previous = instance.site();
        instance.set_site(None);
        if let Some(site) = previous {
            self.used_sites.remove(&site);
        }
        Ok(previous)
    }

    /// The instance occupying `site`.
    pub fn site_occupant(&self, site: SiteId) -> Option<&XdlInstance> {
        self.instances.get(self.used_sites.get(&site)?)
    }

    /// Returns `true` if an instance occupies `site`.
    pub fn is_site_used(&self, site: SiteId) -> bool {
        self.used_sites.contains_key(&site)
    }

    /// Number of occupied sites.
    pub fn used_site_count(&self) -> usize {
        self.used_sites.len()
    }

    // --- nets ---

    /// Adds a net. Every pin must belong to an instance of the design; those
    /// instances gain the pin and record the net.
    pub fn add_net(&mut self, net: XdlNet) -> DesignResult<()> {
        if self.nets.contains_key(net.name()) {
            return Err(DesignError::DesignAssembly(format!(
                "net '{}' already exists",
                net.name()
            )));
        }
        if let Some(pin) = net
            .pins()
            .iter()
            .find(|p| !self.instances.contains_key(p.instance()))
        {
            return Err(DesignError::InstanceNotFound(pin.instance().to_string()));
        }
        for pin in net.pins() {
            if let Some(instance) = self.instances.get_mut(pin.instance()) {
                instance.add_pin(pin.clone());
                instance.add_to_net(net.name());
            }
        }
        self.nets.insert(net.name().to_string(), net);
        Ok(())
    }

    /// The net with the given name.
    pub fn net(&self, name: &str) -> Option<&XdlNet> {
        self.nets.get(name)
    }

    /// Mutable access to a net, e.g. to record its route.
    pub fn net_mut(&mut self, name: &str) -> Option<&mut XdlNet> {
        self.nets.get_mut(name)
    }

    /// All nets, in name order.
    pub fn nets(&self) -> impl Iterator<Item = &XdlNet> {
        self.nets.values()
    }

    // --- modules ---

    /// Adds a module template.
    pub fn add_module(&mut self, module: XdlModule) -> DesignResult<()> {
        if self.modules.contains_key(module.name()) {
            return Err(DesignError::DesignAssembly(format!(
                "module '{}' already exists",
                module.name()
            )));
        }
        self.modules.insert(module.name().to_string(), module);
        Ok(())
    }

    /// The module template with the given name.
    pub fn module(&self, name: &str) -> Option<&XdlModule> {
        self.modules.get(name)
    }

    /// Instantiates `module` as `name`. Each member pairs a design instance
    /// with the template instance it implements; the member implementing the
    /// template's anchor becomes the module instance's anchor.
    pub fn add_module_instance(
        &mut self,
        name: &str,
        module: &str,
        members: &[(&str, &str)],
    ) -> DesignResult<()> {
        if self.module_instances.contains_key(name) {
            return Err(DesignError::DesignAssembly(format!(
                "module instance '{name}' already exists"
            )));
        }
        let template = self
            .modules
            .get(module)
            .ok_or_else(|| DesignError::DesignAssembly(format!("no module named '{module}'")))?;
        for &(instance, template_instance) in members {
            let member = self
                .instances
                .get(instance)
                .ok_or_else(|| DesignError::InstanceNotFound(instance.to_string()))?;
            if template.instance(template_instance).is_none() {
                return Err(DesignError::DesignAssembly(format!(
                    "module '{module}' has no instance '{template_instance}'"
                )));
            }
            if let Some(other) = member.module_instance_name() {
                return Err(DesignError::DesignAssembly(format!(
                    "instance '{instance}' already belongs to module instance '{other}'"
                )));
            }
        }

        let anchor = template.anchor().map(str::to_string);
        let mut module_instance = XdlModuleInstance::new(name, module);
        for &(instance, template_instance) in members {
            module_instance.add_member(instance, anchor.as_deref() == Some(template_instance));
            if let Some(member) = self.instances.get_mut(instance) {
                member.link_module_instance(name, module, template_instance);
            }
        }
        self.module_instances
            .insert(name.to_string(), module_instance);
        Ok(())
    }

    /// The module instance with the given name.
    pub fn module_instance(&self, name: &str) -> Option<&XdlModuleInstance> {
        self.module_instances.get(name)
    }

    /// All module instances, in name order.
    pub fn module_instances(&self) -> impl Iterator<Item = &XdlModuleInstance> {
        self.module_instances.values()
    }

    // --- checks and output ---

    /// Checks site occupancy, module links and nets, emitting one diagnostic
    /// per finding. Returns `true` if no error was found.
    pub fn validate(&self, sink: &DiagnosticSink) -> bool {
        let before = sink.error_count();

        for (&site, occupant) in &self.used_sites {
            let site_name = self.site_label(site);
            match self.instances.get(occupant) {
                Some(instance) if instance.site() == Some(site) => {}
                _ => sink.emit(
                    Diagnostic::error(
                        STALE_OCCUPANCY,
                        format!("site {site_name} is recorded as used by '{occupant}'"),
                    )
                    .with_subject(site_name)
                    .with_note(format!("'{occupant}' does not occupy it")),
                ),
            }
        }

        for instance in self.instances.values() {
            if let Some(site) = instance.site() {
                if self.used_sites.get(&site).map(String::as_str) != Some(instance.name()) {
                    sink.emit(
                        Diagnostic::error(
                            UNRECORDED_PLACEMENT,
                            format!(
                                "'{}' is placed on {} but the site is not recorded for it",
                                instance.name(),
                                self.site_label(site)
                            ),
                        )
                        .with_subject(instance.name()),
                    );
                }
            }
            self.validate_module_links(instance, sink);
        }

        for module_instance in self.module_instances.values() {
            for member in module_instance.instances() {
                let linked = self
                    .instances
                    .get(member)
                    .and_then(XdlInstance::module_instance_name);
                if linked != Some(module_instance.name()) {
                    sink.emit(
                        Diagnostic::warning(
                            DETACHED_MEMBER,
                            format!(
                                "module instance '{}' lists '{member}', which is not linked to it",
                                module_instance.name()
                            ),
                        )
                        .with_subject(member.clone()),
                    );
                }
            }
        }

        for net in self.nets.values() {
            for pin in net.pins() {
                if !self.instances.contains_key(pin.instance()) {
                    sink.emit(
                        Diagnostic::warning(
                            DANGLING_NET_PIN,
                            format!("net '{}' has a pin on missing instance", net.name()),
                        )
                        .with_subject(net.name())
                        .with_note(pin.to_string()),
                    );
                }
            }
            if !net.pins().is_empty() && net.source().is_none() {
                sink.emit(
                    Diagnostic::warning(
                        UNDRIVEN_NET,
                        format!("net '{}' has no output pin", net.name()),
                    )
                    .with_subject(net.name()),
                );
            }
        }

        sink.error_count() == before
    }

    fn validate_module_links(&self, instance: &XdlInstance, sink: &DiagnosticSink) {
        if let Some(mi) = instance.module_instance_name() {
            if !self.module_instances.contains_key(mi) {
                sink.emit(
                    Diagnostic::error(
                        DANGLING_MODULE_LINK,
                        format!("'{}' names unknown module instance '{mi}'", instance.name()),
                    )
                    .with_subject(instance.name()),
                );
            }
        }
        if let Some(module) = instance.module_template_name() {
            let template = self.modules.get(module);
            if template.is_none() {
                sink.emit(
                    Diagnostic::error(
                        DANGLING_MODULE_LINK,
                        format!("'{}' names unknown module '{module}'", instance.name()),
                    )
                    .with_subject(instance.name()),
                );
            }
            if let (Some(template), Some(ti)) =
                (template, instance.module_template_instance_name())
            {
                if template.instance(ti).is_none() {
                    sink.emit(
                        Diagnostic::error(
                            DANGLING_MODULE_LINK,
                            format!(
                                "'{}' implements '{ti}', which module '{module}' lacks",
                                instance.name()
                            ),
                        )
                        .with_subject(instance.name()),
                    );
                }
            }
        }
    }

    fn site_label(&self, site: SiteId) -> String {
        self.device
            .site(site)
            .map(|s| s.name().to_string())
            .unwrap_or_else(|_| format!("site{site}"))
    }

    /// Renders the design as XDL: a header, every instance, then every net.
    pub fn render(&self) -> DesignResult<String> {
        let mut out = format!(
            "design \"{}\" {} ;\n\n",
            self.name,
            self.device.part_name()
        );
        for instance in self.instances.values() {
            out.push_str(&instance.render(&self.device)?);
        }
        for net in self.nets.values() {
            out.push('\n');
            out.push_str(&net.render(&self.device)?);
        }
        Ok(out)
    }
}

/// Edit handle for an instance held by an [`XdlDesign`].
///
/// Reads go through to the instance. Name and site stay with the design, so
/// the handle can neither rename the instance nor swap it for another value:
///
/// ```compile_fail
/// use wirefab_device::SiteType;
/// use wirefab_xdl::{XdlDesign, XdlInstance};
///
/// fn rename(design: &mut XdlDesign) {
///     if let Some(mut a) = design.instance_mut("a") {
///         *a = XdlInstance::new("zzz", SiteType::new("SLICEL"));
///     }
/// }
/// ```
#[derive(Debug)]
pub struct InstanceEdit<'a> {
    instance: &'a mut XdlInstance,
}

impl Deref for InstanceEdit<'_> {
    type Target = XdlInstance;

    fn deref(&self) -> &XdlInstance {
        self.instance
    }
}

impl InstanceEdit<'_> {
    /// Sets the bonded requirement.
    pub fn set_bonded(&mut self, bonded: Option<Bonded>) {
        self.instance.set_bonded(bonded);
    }

    /// Adds an attribute; see [`XdlInstance::add_attribute`].
    pub fn add_attribute(&mut self, attribute: XdlAttribute) {
        self.instance.add_attribute(attribute);
    }

    /// Removes and returns an attribute.
    pub fn remove_attribute(&mut self, physical_name: &str) -> DesignResult<XdlAttribute> {
        self.instance.remove_attribute(physical_name)
    }

    /// Adds a pin, replacing a pin of the same name. The pin must name this
    /// instance.
    pub fn add_pin(&mut self, pin: XdlPin) -> DesignResult<Option<XdlPin>> {
        if pin.instance() != self.instance.name() {
            return Err(DesignError::DesignAssembly(format!(
                "pin {} cannot be added to '{}'",
                pin,
                self.instance.name()
            )));
        }
        Ok(self.instance.add_pin(pin))
    }

    /// Removes a pin by name.
    pub fn remove_pin(&mut self, name: &str) -> Option<XdlPin> {
        self.instance.remove_pin(name)
    }

    /// Records that the instance is on a net.
    pub fn add_to_net(&mut self, net: impl Into<String>) {
        self.instance.add_to_net(net);
    }

    /// Clears every module link. The module instance keeps listing the
    /// instance until it is removed from the design.
    pub fn detach_from_module(&mut self) {
        self.instance.detach_from_module();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wirefab_config::load_device_config_from_str;
    use wirefab_device::SiteType;
    use wirefab_diagnostics::Severity;

    const DEVICE: &str = r#"
[device]
part = "rstest01"
family = "TEST"
rows = 1
columns = 2
wires = ["a", "b", "site_in", "site_out"]

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
connections = [{ source = "a", sink = "b", pip = true }]

[[tiles.sites]]
name = "SLICE_X0Y0"
type = "SLICEL"
external_wires = { A1 = "a", A = "b" }

[[tiles]]
name = "CLB_X1Y0"
type = "CLB"
row = 0
column = 1

[[tiles.sites]]
name = "SLICE_X1Y0"
type = "SLICEL"
"#;

    fn design() -> XdlDesign {
        let config = load_device_config_from_str(DEVICE).unwrap();
        XdlDesign::new("top", Arc::new(Device::from_config(&config).unwrap()))
    }

    fn site(design: &XdlDesign, name: &str) -> SiteId {
        design.device().site_by_name(name).unwrap().id()
    }

    fn slice(name: &str) -> XdlInstance {
        XdlInstance::new(name, SiteType::new("SLICEL"))
    }

    /// Every used site has exactly one occupant and every placed instance is
    /// recorded on its site.
    fn assert_occupancy_consistent(design: &XdlDesign) {
        let placed: Vec<_> = design.instances().filter(|i| i.is_placed()).collect();
        assert_eq!(placed.len(), design.used_site_count());
        for instance in placed {
            let site = instance.site().unwrap();
            assert_eq!(design.site_occupant(site).unwrap().name(), instance.name());
        }
        assert!(design.validate(&DiagnosticSink::new()));
    }

    #[test]
    fn place_move_unplace() {
        let mut d = design();
        let s0 = site(&d, "SLICE_X0Y0");
        let s1 = site(&d, "SLICE_X1Y0");
        d.add_instance(slice("a")).unwrap();

        d.place_instance("a", s0).unwrap();
        assert!(d.is_site_used(s0));
        assert_occupancy_consistent(&d);

        d.place_instance("a", s1).unwrap();
        assert!(!d.is_site_used(s0));
        assert_eq!(d.site_occupant(s1).unwrap().name(), "a");
        assert_eq!(d.instance("a").unwrap().instance_x(d.device()), Some(1));
        assert_eq!(d.instance("a").unwrap().instance_y(d.device()), Some(0));
        assert_occupancy_consistent(&d);

        assert_eq!(d.unplace_instance("a").unwrap(), Some(s1));
        assert!(!d.is_site_used(s1));
        assert!(!d.instance("a").unwrap().is_placed());
        assert_eq!(d.instance("a").unwrap().instance_x(d.device()), None);
        assert_occupancy_consistent(&d);
    }

    #[test]
    fn double_occupancy_is_rejected_atomically() {
        let mut d = design();
        let s0 = site(&d, "SLICE_X0Y0");
        let s1 = site(&d, "SLICE_X1Y0");
        d.add_instance(slice("a")).unwrap();
        d.add_instance(slice("b")).unwrap();
        d.place_instance("a", s0).unwrap();
        d.place_instance("b", s1).unwrap();

        let err = d.place_instance("b", s0).unwrap_err();
        assert!(matches!(
            err,
            DesignError::DoubleOccupancy { ref occupant, ref instance, .. }
                if occupant == "a" && instance == "b"
        ));
        assert_eq!(d.instance("b").unwrap().site(), Some(s1));
        assert_eq!(d.site_occupant(s1).unwrap().name(), "b");
        assert_occupancy_consistent(&d);
    }

    #[test]
    fn replacing_on_the_same_site_is_allowed() {
        let mut d = design();
        let s0 = site(&d, "SLICE_X0Y0");
        d.add_instance(slice("a")).unwrap();
        d.place_instance("a", s0).unwrap();
        d.place_instance("a", s0).unwrap();
        assert_eq!(d.used_site_count(), 1);
        assert_occupancy_consistent(&d);
    }

    #[test]
    fn preplaced_instances_claim_their_site() {
        let mut d = design();
        let s0 = site(&d, "SLICE_X0Y0");
        d.add_instance(slice("a").with_site(s0)).unwrap();
        assert!(matches!(
            d.add_instance(slice("b").with_site(s0)),
            Err(DesignError::DoubleOccupancy { .. })
        ));
        assert!(d.instance("b").is_none());
        assert!(matches!(
            d.add_instance(slice("a")),
            Err(DesignError::DuplicateInstance(_))
        ));
        assert_occupancy_consistent(&d);
    }

    #[test]
    fn remove_releases_site() {
        let mut d = design();
        let s0 = site(&d, "SLICE_X0Y0");
        d.add_instance(slice("a")).unwrap();
        d.place_instance_at("a", "SLICE_X0Y0").unwrap();
        let removed = d.remove_instance("a").unwrap();
        assert_eq!(removed.site(), Some(s0));
        assert!(!d.is_site_used(s0));
        assert!(matches!(
            d.remove_instance("a"),
            Err(DesignError::InstanceNotFound(_))
        ));
    }

    #[test]
    fn edits_keep_name_and_site() {
        let mut d = design();
        let s0 = site(&d, "SLICE_X0Y0");
        d.add_instance(slice("a")).unwrap();
        d.add_instance(slice("b")).unwrap();
        d.place_instance("a", s0).unwrap();

        let mut b = d.instance_mut("b").unwrap();
        b.add_attribute(XdlAttribute::new("CLKINV", "", "CLK"));
        assert!(b.add_pin(XdlPin::inpin("b", "A1")).unwrap().is_none());
        assert!(b.add_pin(XdlPin::inpin("a", "A2")).is_err());
        let copy = XdlInstance::clone(&b).with_site(s0);
        assert_eq!(copy.site(), Some(s0));

        let b = d.instance("b").unwrap();
        assert_eq!(b.name(), "b");
        assert!(!b.is_placed());
        assert!(b.has_attribute("CLKINV"));
        assert!(b.pin("A2").is_none());
        assert_eq!(d.site_occupant(s0).unwrap().name(), "a");
        assert!(d.instance_mut("ghost").is_none());
        assert_occupancy_consistent(&d);
    }

    #[test]
    fn remove_drops_net_pins() {
        let mut d = design();
        d.add_instance(slice("a")).unwrap();
        d.add_instance(slice("b")).unwrap();
        let mut net = XdlNet::new("n0");
        net.add_pin(XdlPin::outpin("a", "A"));
        net.add_pin(XdlPin::inpin("b", "A1"));
        d.add_net(net).unwrap();

        d.remove_instance("b").unwrap();
        let pins = d.net("n0").unwrap().pins();
        assert_eq!(pins.len(), 1);
        assert_eq!(pins[0].instance(), "a");
        let sink = DiagnosticSink::new();
        assert!(d.validate(&sink));
        assert!(!sink.contains_code(DANGLING_NET_PIN));
    }

    #[test]
    fn unknown_instances_and_sites() {
        let mut d = design();
        let s0 = site(&d, "SLICE_X0Y0");
        assert!(matches!(
            d.place_instance("ghost", s0),
            Err(DesignError::InstanceNotFound(_))
        ));
        d.add_instance(slice("a")).unwrap();
        assert!(matches!(
            d.place_instance("a", SiteId::from_raw(99)),
            Err(DesignError::Device(_))
        ));
        assert!(d.place_instance_at("a", "SLICE_X9Y9").is_err());
        assert!(!d.instance("a").unwrap().is_placed());
    }

    #[test]
    fn placement_clears_bonded() {
        let mut d = design();
        let mut pad = slice("pad");
        pad.set_bonded(Some(Bonded::Bonded));
        d.add_instance(pad).unwrap();
        d.place_instance_at("pad", "SLICE_X0Y0").unwrap();
        assert_eq!(d.instance("pad").unwrap().bonded(), None);
    }

    #[test]
    fn nets_update_their_instances() {
        let mut d = design();
        d.add_instance(slice("a")).unwrap();
        d.add_instance(slice("b")).unwrap();
        let mut net = XdlNet::new("n0");
        net.add_pin(XdlPin::outpin("a", "A"));
        net.add_pin(XdlPin::inpin("b", "A1"));
        d.add_net(net).unwrap();
        assert_eq!(d.instance("a").unwrap().nets().collect::<Vec<_>>(), vec!["n0"]);
        assert_eq!(d.instance("b").unwrap().pin("A1").unwrap().net(), Some("n0"));

        let mut bad = XdlNet::new("n1");
        bad.add_pin(XdlPin::inpin("ghost", "A1"));
        assert!(matches!(d.add_net(bad), Err(DesignError::InstanceNotFound(_))));
        assert!(d.net("n1").is_none());
        assert!(d.add_net(XdlNet::new("n0")).is_err());
    }

    #[test]
    fn module_instances_link_members() {
        let mut d = design();
        let mut module = XdlModule::new("pair");
        module.add_instance(slice("t0")).unwrap();
        module.add_instance(slice("t1")).unwrap();
        module.set_anchor("t0").unwrap();
        d.add_module(module).unwrap();
        d.add_instance(slice("a")).unwrap();
        d.add_instance(slice("b")).unwrap();

        d.add_module_instance("p0", "pair", &[("a", "t0"), ("b", "t1")])
            .unwrap();
        let p0 = d.module_instance("p0").unwrap();
        assert_eq!(p0.anchor(), Some("a"));
        assert_eq!(p0.module_name(), "pair");
        let a = d.instance("a").unwrap();
        assert!(a.is_member_of_same_module_instance(d.instance("b").unwrap()));
        assert!(a.is_anchor(d.module("pair").unwrap()));
        assert!(d.validate(&DiagnosticSink::new()));

        assert!(d
            .add_module_instance("p1", "pair", &[("a", "t0")])
            .is_err());
        assert!(d.add_module_instance("p1", "missing", &[]).is_err());
        assert!(d.add_module_instance("p1", "pair", &[("a", "t9")]).is_err());
    }

    #[test]
    fn validate_reports_detached_members() {
        let mut d = design();
        let mut module = XdlModule::new("pair");
        module.add_instance(slice("t0")).unwrap();
        d.add_module(module).unwrap();
        d.add_instance(slice("a")).unwrap();
        d.add_module_instance("p0", "pair", &[("a", "t0")]).unwrap();
        d.instance_mut("a").unwrap().detach_from_module();

        let sink = DiagnosticSink::new();
        assert!(d.validate(&sink));
        assert!(sink.contains_code(DETACHED_MEMBER));
        assert_eq!(sink.count(Severity::Warning), 1);
    }

    #[test]
    fn validate_reports_undriven_nets() {
        let mut d = design();
        d.add_instance(slice("b")).unwrap();
        let mut net = XdlNet::new("n0");
        net.add_pin(XdlPin::inpin("b", "A1"));
        d.add_net(net).unwrap();
        let sink = DiagnosticSink::new();
        assert!(d.validate(&sink));
        assert_eq!(sink.take_all()[0].code, UNDRIVEN_NET);
    }

    #[test]
    fn render_design() {
        let mut d = design();
        let mut a = slice("a");
        a.add_attribute(XdlAttribute::new("CLKINV", "", "CLK"));
        a.add_attribute(XdlAttribute::new("A6LUT", "lut", "#LUT:O6=A1"));
        d.add_instance(a).unwrap();
        d.place_instance_at("a", "SLICE_X0Y0").unwrap();
        let mut pad = slice("pad");
        pad.set_bonded(Some(Bonded::Unbonded));
        d.add_instance(pad).unwrap();

        let text = d.render().unwrap();
        let expected = "design \"top\" rstest01 ;\n\n\
            inst \"a\" \"SLICEL\", placed CLB_X0Y0 SLICE_X0Y0 ,\n  \
            cfg \" A6LUT:lut:#LUT:O6=A1 CLKINV::CLK \"\n  ;\n\
            inst \"pad\" \"SLICEL\", unplaced unbonded ,\n  cfg \" \"\n  ;\n";
        assert_eq!(text, expected);
    }
}
