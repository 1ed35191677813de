//! SZ Sensor Decoder
//!
//! Turns raw diagnostic responses into a [`SensorRecord`]: the four
//! proprietary KWP2000 pages through a fitted descriptor table, and the
//! standard OBD-II Mode 01 PIDs through the SAE J1979 formulas.
//!
//! Decoding is synchronous and best-effort. Nothing here returns an error
//! for bad input; fields that cannot be decoded are left as they were.

pub mod calibration;
mod config;
mod error;
mod obd2;
mod page;
mod record;
pub mod table;

pub use crate::config::{DecoderConfig, HeaderCheck, ENV_PREFIX};
pub use error::ConfigError;
pub use obd2::{decode_obd2, Obd2Decoder, Obd2Responses};
pub use page::{decode_pages, PageSet, SzPageDecoder};
pub use record::{DecodeSummary, Field, SensorRecord};

pub use diag_codec::{PageId, Pid};
