//! Decoder configuration

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::Path;

/// Prefix of environment overrides, e.g. `SZ_DECODE_HEADER_CHECK=verify`
pub const ENV_PREFIX: &str = "SZ_DECODE";

/// Whether page response headers are inspected before decoding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderCheck {
    /// Decode whatever the transport hands over
    #[default]
    Trust,
    /// Treat a page whose header is not `61 <page-id>` as absent
    Verify,
}

/// Decoder configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Page header policy
    pub header_check: HeaderCheck,

    /// Lower bound (exclusive) for an accepted adapter voltage
    pub voltage_min_v: f32,

    /// Upper bound (exclusive) for an accepted adapter voltage
    pub voltage_max_v: f32,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            header_check: HeaderCheck::Trust,
            voltage_min_v: 0.0,
            voltage_max_v: 20.0,
        }
    }
}

impl DecoderConfig {
    /// Verify page headers before decoding
    pub fn strict() -> Self {
        Self {
            header_check: HeaderCheck::Verify,
            ..Default::default()
        }
    }

    /// Load defaults, then an optional file, then `SZ_DECODE_*` variables
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = ::config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path).required(false));
        }

        let config: Self = builder
            .add_source(::config::Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Reject an empty or inverted voltage window
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.voltage_min_v.partial_cmp(&self.voltage_max_v) {
            Some(Ordering::Less) => Ok(()),
            _ => Err(ConfigError::InvalidVoltageWindow {
                min: self.voltage_min_v,
                max: self.voltage_max_v,
            }),
        }
    }
}
