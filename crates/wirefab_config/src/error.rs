//! Error types for device description loading and validation.

/// Errors that can occur when loading or validating a `device.toml`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading the description file.
    #[error("failed to read device description: {0}")]
    IoError(#[from] std::io::Error),

    /// The TOML content could not be parsed.
    #[error("failed to parse device description: {0}")]
    ParseError(String),

    /// A required field is missing or empty.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// A value is inconsistent with the rest of the description.
    #[error("validation error: {0}")]
    ValidationError(String),
}
