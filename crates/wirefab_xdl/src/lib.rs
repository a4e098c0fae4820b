//! XDL design registry: instances, nets and modules placed on a device.
//!
//! An [`XdlDesign`] records which [`XdlInstance`] occupies which site and
//! keeps that record consistent through every placement edit. Instances carry
//! their configuration as [`XdlAttribute`]s and render to the XDL `inst`
//! statement; nets collect their PIPs from a route tree built with
//! [`wirefab_route`].
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use wirefab_device::{Device, SiteType};
//! use wirefab_xdl::{XdlAttribute, XdlDesign, XdlInstance};
//!
//! let device = Arc::new(Device::load(Path::new("device.toml"))?);
//! let mut design = XdlDesign::new("top", device);
//! let mut ff = XdlInstance::new("ff", SiteType::new("SLICEL"));
//! ff.add_attribute(XdlAttribute::new("CLKINV", "", "CLK"));
//! design.add_instance(ff)?;
//! design.place_instance_at("ff", "SLICE_X0Y0")?;
//! print!("{}", design.render()?);
//! ```

#![warn(missing_docs)]

pub mod attribute;
pub mod design;
pub mod error;
pub mod instance;
pub mod module;
pub mod net;
pub mod pin;

pub use attribute::{XdlAttribute, MULTI_VALUE_SEPARATOR};
pub use design::{InstanceEdit, XdlDesign};
pub use error::{DesignError, DesignResult};
pub use instance::{Bonded, XdlInstance};
pub use module::{XdlModule, XdlModuleInstance};
pub use net::XdlNet;
pub use pin::XdlPin;
