//! OBD-II Decoder
//!
//! Decodes Mode 01 responses and the adapter voltage reading into the same
//! record the page decoder fills. Where both write a field, the decoder
//! run last wins.

use crate::calibration::{parse_voltage, Transform};
use crate::config::DecoderConfig;
use crate::record::{DecodeSummary, Field, SensorRecord};
use crate::table::PID_TABLE;
use diag_codec::{CanonicalHex, Pid};
use tracing::{debug, trace};

/// Raw adapter responses of one poll cycle, one per PID
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Obd2Responses<'a> {
    pids: [Option<&'a str>; 8],
    voltage: Option<&'a str>,
}

impl<'a> Obd2Responses<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the response to a PID request, builder style
    pub fn with(mut self, pid: Pid, response: &'a str) -> Self {
        self.pids[pid.index()] = Some(response);
        self
    }

    /// Attach the adapter voltage reading (`ATRV`), builder style
    pub fn with_voltage(mut self, response: &'a str) -> Self {
        self.voltage = Some(response);
        self
    }

    /// Response to `pid`, if any
    pub fn get(&self, pid: Pid) -> Option<&'a str> {
        self.pids[pid.index()]
    }

    /// Voltage reading, if any
    pub fn voltage(&self) -> Option<&'a str> {
        self.voltage
    }
}

/// Decoder for standard Mode 01 PIDs
#[derive(Debug, Clone)]
pub struct Obd2Decoder {
    voltage_min_v: f32,
    voltage_max_v: f32,
}

impl Default for Obd2Decoder {
    fn default() -> Self {
        Self::new(&DecoderConfig::default())
    }
}

impl Obd2Decoder {
    pub fn new(config: &DecoderConfig) -> Self {
        Self {
            voltage_min_v: config.voltage_min_v,
            voltage_max_v: config.voltage_max_v,
        }
    }

    /// Decode every present response.
    ///
    /// Absent responses leave their fields unchanged, as do responses
    /// without a usable `41 <pid>` marker.
    pub fn decode(&self, responses: &Obd2Responses<'_>, record: &mut SensorRecord) -> DecodeSummary {
        let mut summary = DecodeSummary::default();

        for pid in Pid::ALL {
            let Some(response) = responses.get(pid) else {
                continue;
            };

            let mut targets = PID_TABLE.iter().filter(|d| d.pid == pid).peekable();
            if targets.peek().is_none() {
                trace!(pid = pid.as_hex(), "No record field for PID");
                continue;
            }

            let hex = CanonicalHex::new(response);
            let raw = match pid.locate(&hex) {
                Ok(raw) => raw,
                Err(e) => {
                    trace!(pid = pid.as_hex(), response = %hex, error = %e, "PID not decoded");
                    summary.skipped += targets.count();
                    continue;
                }
            };

            for desc in targets {
                match Transform::J1979(desc.formula).apply(raw) {
                    Ok(value) => {
                        record.set(desc.field, value);
                        summary.written += 1;
                    }
                    Err(e) => {
                        trace!(field = %desc.field, error = %e, "Field not decoded");
                        summary.skipped += 1;
                    }
                }
            }
        }

        if let Some(reading) = responses.voltage() {
            match parse_voltage(reading, self.voltage_min_v, self.voltage_max_v) {
                Ok(volts) => {
                    record.set(Field::BatteryV, volts);
                    summary.written += 1;
                }
                Err(e) => {
                    trace!(reading, error = %e, "Voltage rejected");
                    summary.skipped += 1;
                }
            }
        }

        debug!(
            written = summary.written,
            skipped = summary.skipped,
            "OBD-II decode complete"
        );
        summary
    }
}

/// Decode OBD-II responses with the default configuration
pub fn decode_obd2(responses: &Obd2Responses<'_>, record: &mut SensorRecord) -> DecodeSummary {
    Obd2Decoder::default().decode(responses, record)
}
