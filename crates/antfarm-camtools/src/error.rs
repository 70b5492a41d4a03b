//! Error types for the path planning crate.
//!
//! Configuration problems are fatal to a planning call. Degenerate geometry
//! (an offset that collapses to nothing) is never an error; drivers branch
//! on the missing result instead. Non-fatal findings travel as
//! [`crate::Diagnostic`] values alongside the result.

use std::io;
use thiserror::Error;

/// Errors that can occur while configuring or running a planner.
#[derive(Error, Debug)]
pub enum CamToolError {
    /// The machining configuration is invalid.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// A path sink rejected the planned paths.
    #[error("Path sink error: {0}")]
    Sink(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// TOML deserialization error.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML write error: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    /// The file extension is not recognized.
    #[error("Unknown file extension: {0}")]
    UnknownExtension(String),
}

/// Errors related to machining configuration validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// The tool diameter is zero, negative or not a number.
    #[error("Tool diameter must be positive, got {0}")]
    NonPositiveToolDiameter(f64),

    /// The strategy tag does not name a known machining strategy.
    #[error("Unknown machining strategy: '{0}'")]
    UnknownStrategy(String),

    /// A parameter value is out of the valid range.
    #[error("Parameter '{name}' out of range: {value} (valid: {min}..{max})")]
    OutOfRange {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A parameter value is invalid.
    #[error("Invalid value for '{name}': {reason}")]
    InvalidValue { name: String, reason: String },
}

impl CamToolError {
    /// Check if this is a configuration error
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, CamToolError::Configuration(_))
    }
}

/// Result type alias for planner operations.
pub type CamToolResult<T> = Result<T, CamToolError>;

/// Result type alias for configuration validation.
pub type ConfigurationResult<T> = Result<T, ConfigurationError>;
