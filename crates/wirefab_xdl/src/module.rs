//! Module templates and their instantiations.
//!
//! An [`XdlModule`] is a reusable group of instances with one anchor used as
//! the placement reference. An [`XdlModuleInstance`] is one use of a module in
//! a design: it names the design instances implementing the template's
//! instances. All links are names resolved through the design.

use crate::error::{DesignError, DesignResult};
use crate::instance::XdlInstance;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A module template. Owns its template instances.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct XdlModule {
    name: String,
    anchor: Option<String>,
    instances: BTreeMap<String, XdlInstance>,
}

impl XdlModule {
    /// Creates an empty module template.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            anchor: None,
            instances: BTreeMap::new(),
        }
    }

    /// Module name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds a template instance and marks it as part of this module.
    pub fn add_instance(&mut self, mut instance: XdlInstance) -> DesignResult<()> {
        if self.instances.contains_key(instance.name()) {
            return Err(DesignError::DuplicateInstance(instance.name().to_string()));
        }
        instance.set_module_template(&self.name);
        self.instances.insert(instance.name().to_string(), instance);
        Ok(())
    }

    /// The template instance with the given name.
    pub fn instance(&self, name: &str) -> Option<&XdlInstance> {
        self.instances.get(name)
    }

    /// Template instances, in name order.
    pub fn instances(&self) -> impl Iterator<Item = &XdlInstance> {
        self.instances.values()
    }

    /// Name of the anchor instance.
    pub fn anchor(&self) -> Option<&str> {
        self.anchor.as_deref()
    }

    /// The anchor instance.
    pub fn anchor_instance(&self) -> Option<&XdlInstance> {
        self.instances.get(self.anchor.as_deref()?)
    }

    /// Makes a template instance the anchor.
    pub fn set_anchor(&mut self, name: &str) -> DesignResult<()> {
        if !self.instances.contains_key(name) {
            return Err(DesignError::InstanceNotFound(name.to_string()));
        }
        self.anchor = Some(name.to_string());
        Ok(())
    }
}

/// One use of a module template inside a design.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct XdlModuleInstance {
    name: String,
    module: String,
    anchor: Option<String>,
    instances: Vec<String>,
}

impl XdlModuleInstance {
    pub(crate) fn new(name: &str, module: &str) -> Self {
        Self {
            name: name.to_string(),
            module: module.to_string(),
            anchor: None,
            instances: Vec::new(),
        }
    }

    /// Module instance name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the module template it instantiates.
    pub fn module_name(&self) -> &str {
        &self.module
    }

    /// Name of the design instance implementing the template's anchor.
    pub fn anchor(&self) -> Option<&str> {
        self.anchor.as_deref()
    }

    /// Names of the member instances.
    pub fn instances(&self) -> &[String] {
        &self.instances
    }

    pub(crate) fn add_member(&mut self, instance: &str, is_anchor: bool) {
        self.instances.push(instance.to_string());
        if is_anchor {
            self.anchor = Some(instance.to_string());
        }
    }

    pub(crate) fn remove_member(&mut self, instance: &str) {
        self.instances.retain(|name| name != instance);
        if self.anchor.as_deref() == Some(instance) {
            self.anchor = None;
        }
    }
}
