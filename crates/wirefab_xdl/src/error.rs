//! Design registry errors.

use thiserror::Error;
use wirefab_device::DeviceError;

/// Errors raised while editing an [`XdlDesign`](crate::XdlDesign) or one of
/// its instances.
///
/// A failing operation leaves the design unchanged.
#[derive(Debug, Error)]
pub enum DesignError {
    /// A site is already occupied by another instance.
    #[error("site '{site}' is already occupied by '{occupant}', cannot place '{instance}'")]
    DoubleOccupancy {
        /// Name of the contested site.
        site: String,
        /// The instance currently on the site.
        occupant: String,
        /// The instance that was being placed.
        instance: String,
    },

    /// No instance with the given name exists.
    #[error("instance '{0}' not found")]
    InstanceNotFound(String),

    /// The instance has no attribute with the given physical name.
    #[error("instance '{instance}' has no attribute '{attribute}'")]
    AttributeNotFound {
        /// The instance searched.
        instance: String,
        /// The physical name looked for.
        attribute: String,
    },

    /// An instance with the same name is already part of the design.
    #[error("instance '{0}' already exists")]
    DuplicateInstance(String),

    /// The design's structure does not allow the edit.
    #[error("design assembly error: {0}")]
    DesignAssembly(String),

    /// A device lookup failed.
    #[error(transparent)]
    Device(#[from] DeviceError),
}

/// Result alias for design operations.
pub type DesignResult<T> = Result<T, DesignError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_double_occupancy() {
        let err = DesignError::DoubleOccupancy {
            site: "SLICE_X0Y0".into(),
            occupant: "a".into(),
            instance: "b".into(),
        };
        assert_eq!(
            err.to_string(),
            "site 'SLICE_X0Y0' is already occupied by 'a', cannot place 'b'"
        );
    }

    #[test]
    fn device_errors_pass_through() {
        let err: DesignError = DeviceError::UnknownWire("T/w9".into()).into();
        assert!(matches!(err, DesignError::Device(_)));
    }
}
