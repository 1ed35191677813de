//! Configuration Error Types

use thiserror::Error;

/// Errors while loading decoder configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File or environment source could not be read or deserialized
    #[error("Configuration source error: {0}")]
    Source(#[from] ::config::ConfigError),

    /// Voltage window is empty or inverted
    #[error("Invalid voltage window ({min}, {max})")]
    InvalidVoltageWindow { min: f32, max: f32 },
}
