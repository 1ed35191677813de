//! OBD-II PID Definitions and Response Location
//!
//! Defines the Mode 01 PIDs the decoder consumes and how their data bytes
//! are found inside a normalized adapter response.

use crate::error::DecodeError;
use crate::extract::{extract, RawValue, Width};
use crate::hex::{decode_bounded, CanonicalHex};
use crate::mode;
use serde::{Deserialize, Serialize};

/// Mode 01 PIDs consumed by the decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Pid {
    /// Calculated engine load (0x04)
    EngineLoad = 0x04,
    /// Engine coolant temperature (0x05)
    CoolantTemp = 0x05,
    /// Intake manifold absolute pressure (0x0B)
    IntakeManifoldPressure = 0x0B,
    /// Engine RPM (0x0C)
    Rpm = 0x0C,
    /// Vehicle speed (0x0D)
    Speed = 0x0D,
    /// Mass air flow rate (0x10)
    Maf = 0x10,
    /// Throttle position (0x11)
    ThrottlePosition = 0x11,
    /// Fuel rail gauge pressure, diesel (0x23)
    FuelRailPressure = 0x23,
}

impl Pid {
    /// Every PID in request order
    pub const ALL: [Pid; 8] = [
        Pid::EngineLoad,
        Pid::CoolantTemp,
        Pid::IntakeManifoldPressure,
        Pid::Rpm,
        Pid::Speed,
        Pid::Maf,
        Pid::ThrottlePosition,
        Pid::FuelRailPressure,
    ];

    /// Get the PID hex value
    pub fn as_hex(&self) -> u8 {
        *self as u8
    }

    /// Position in [`Pid::ALL`]
    pub fn index(&self) -> usize {
        match self {
            Pid::EngineLoad => 0,
            Pid::CoolantTemp => 1,
            Pid::IntakeManifoldPressure => 2,
            Pid::Rpm => 3,
            Pid::Speed => 4,
            Pid::Maf => 5,
            Pid::ThrottlePosition => 6,
            Pid::FuelRailPressure => 7,
        }
    }

    /// Look up a PID by its code
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|pid| pid.as_hex() == code)
    }

    /// Number of data bytes following the `41 <pid>` marker
    pub fn data_width(&self) -> Width {
        match self {
            Pid::Rpm | Pid::Maf | Pid::FuelRailPressure => Width::Two,
            _ => Width::One,
        }
    }

    /// ASCII request as sent to the adapter, e.g. `"010C"`
    pub fn request(&self) -> String {
        format!("{:02X}{:02X}", mode::CURRENT_DATA, self.as_hex())
    }

    /// Locate this PID's data bytes in a normalized response
    pub fn locate(&self, hex: &CanonicalHex) -> Result<RawValue, DecodeError> {
        locate_pid_data(hex, self.as_hex(), self.data_width())
    }
}

/// Find `41 <pid>` in `hex` and extract the `width` data bytes after it.
///
/// The first marker occurrence wins. Fails when the marker is missing or
/// fewer than `width` complete bytes follow it.
pub fn locate_pid_data(hex: &CanonicalHex, pid: u8, width: Width) -> Result<RawValue, DecodeError> {
    let idx = hex
        .find_marker(mode::CURRENT_DATA_RESPONSE, pid)
        .ok_or(DecodeError::MarkerNotFound(pid))?;

    // data starts after the 4-digit marker
    let data = decode_bounded(hex.tail(idx + 4), width.bytes());
    extract(&data, 0, width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rpm_locate() {
        let hex = CanonicalHex::new("41 0C 1A F8");
        assert_eq!(Pid::Rpm.locate(&hex), Ok(RawValue::Word(0x1AF8)));
    }

    #[test]
    fn test_coolant_behind_kwp_header() {
        let hex = CanonicalHex::new("83 F1 7A 41 05 5A C3");
        assert_eq!(Pid::CoolantTemp.locate(&hex), Ok(RawValue::Byte(0x5A)));
    }

    #[test]
    fn test_missing_marker() {
        let hex = CanonicalHex::new("NO DATA");
        assert_eq!(
            Pid::Speed.locate(&hex),
            Err(DecodeError::MarkerNotFound(0x0D))
        );
    }

    #[test]
    fn test_truncated_data() {
        // Only one of two RPM bytes present
        let hex = CanonicalHex::new("410C1A");
        assert!(matches!(
            Pid::Rpm.locate(&hex),
            Err(DecodeError::Truncated { needed: 2, actual: 1 })
        ));
        // Half a byte does not count
        let hex = CanonicalHex::new("410C1AF");
        assert!(Pid::Rpm.locate(&hex).is_err());
    }

    #[test]
    fn test_four_byte_data() {
        let hex = CanonicalHex::new("4100BE3FA813");
        let raw = locate_pid_data(&hex, 0x00, Width::Four).unwrap();
        assert_eq!(raw, RawValue::Quad([0xBE, 0x3F, 0xA8, 0x13]));

        // supported-PID bitmap: BE => PIDs 01, 03, 04, 05, 06, 07 set
        let bitmap = raw.bytes();
        assert_eq!(bitmap, vec![0xBE, 0x3F, 0xA8, 0x13]);
        let supports = |pid: u8| bitmap[(pid as usize - 1) / 8] & (0x80 >> ((pid - 1) % 8)) != 0;
        assert!(supports(0x04) && supports(0x05) && supports(0x0C));
        assert!(!supports(0x02) && !supports(0x08));
    }

    #[test]
    fn test_marker_at_odd_offset() {
        // stray leading nibble: "410C" starts at character 1
        let hex = CanonicalHex::new("0410C1AF8");
        assert_eq!(hex.find_marker(0x41, 0x0C), Some(1));
        // 1A F8 => ((0x1A * 256) + 0xF8) = 6904
        assert_eq!(Pid::Rpm.locate(&hex), Ok(RawValue::Word(0x1AF8)));
    }

    #[test]
    fn test_request_and_lookup() {
        assert_eq!(Pid::FuelRailPressure.request(), "0123");
        assert_eq!(Pid::from_code(0x0B), Some(Pid::IntakeManifoldPressure));
        assert_eq!(Pid::from_code(0x14), None);
        assert_eq!(Pid::FuelRailPressure.data_width(), Width::Two);
    }

    #[test]
    fn test_index_matches_all() {
        for (i, pid) in Pid::ALL.iter().enumerate() {
            assert_eq!(pid.index(), i);
        }
    }
}
