//! Raw-to-Physical Calibration
//!
//! Page fields use transforms fitted by regression against the viewer's
//! displayed values. The constants are stored exactly as fitted and must
//! not be re-derived. OBD-II fields use the SAE J1979 formulas.

use diag_codec::{DecodeError, RawValue};
use serde::{Deserialize, Serialize};

/// Provenance of a fitted transform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fit {
    /// Number of samples the fit was made on
    pub samples: u32,
    /// Mean absolute error against ground truth
    pub mae: f32,
}

impl Fit {
    pub const fn new(samples: u32, mae: f32) -> Self {
        Self { samples, mae }
    }

    /// True when no ground truth was available for the fit
    pub fn is_unverified(&self) -> bool {
        self.samples == 0
    }
}

/// SAE J1979 Mode 01 formulas (A, B = data bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Formula {
    /// A − 40 (°C)
    Temperature,
    /// A
    Direct,
    /// A × 10, kPa read as millibar
    KpaToMillibar,
    /// (A·256 + B) / 4 (rpm)
    Rpm,
    /// (A·256 + B) / 100 (g/s)
    MassAirFlow,
    /// A × 100 / 255 (%)
    Percent,
    /// (A·256 + B) × 10 / 100, kPa to bar
    RailPressure,
}

impl Formula {
    fn apply(self, raw: u32) -> f32 {
        match self {
            Formula::Temperature => (raw as i32 - 40) as f32,
            Formula::Direct => raw as f32,
            Formula::KpaToMillibar => raw as f32 * 10.0,
            Formula::Rpm => raw as f32 / 4.0,
            Formula::MassAirFlow => raw as f32 / 100.0,
            Formula::Percent => raw as f32 * 100.0 / 255.0,
            Formula::RailPressure => raw as f32 * 10.0 / 100.0,
        }
    }
}

/// Maps a raw integer to a physical value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Transform {
    /// `scale * raw + bias`
    Affine { scale: f32, bias: f32 },
    /// `raw * factor`
    Scale(f32),
    /// `raw / divisor`
    Divide(f32),
    /// `raw`
    Identity,
    /// Standard OBD-II formula
    J1979(Formula),
}

impl Transform {
    /// Apply to a 1- or 2-byte raw value
    pub fn apply(&self, raw: RawValue) -> Result<f32, DecodeError> {
        let raw = raw.scalar()?;
        Ok(match *self {
            Transform::Affine { scale, bias } => raw as f32 * scale + bias,
            Transform::Scale(factor) => raw as f32 * factor,
            Transform::Divide(divisor) => raw as f32 / divisor,
            Transform::Identity => raw as f32,
            Transform::J1979(formula) => formula.apply(raw),
        })
    }
}

/// Parse an adapter voltage reading such as `"12.3V"`.
///
/// Takes the leading run of digits with at most one decimal point and
/// accepts it only strictly inside `(min, max)`.
pub fn parse_voltage(raw: &str, min: f32, max: f32) -> Result<f32, DecodeError> {
    let s = raw.trim_start();

    let mut seen_dot = false;
    let end = s
        .char_indices()
        .find(|&(_, c)| match c {
            '0'..='9' => false,
            '.' if !seen_dot => {
                seen_dot = true;
                false
            }
            _ => true,
        })
        .map_or(s.len(), |(i, _)| i);

    let value: f32 = s[..end].parse().map_err(|_| DecodeError::MalformedNumber)?;

    if value > min && value < max {
        Ok(value)
    } else {
        Err(DecodeError::VoltageOutOfRange { value, min, max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_affine_idle_speed() {
        let t = Transform::Affine {
            scale: 0.06220588595295306,
            bias: 844.9560488396442,
        };
        let value = t.apply(RawValue::Word(1000)).unwrap();
        assert!((value - 907.16).abs() < 0.01);
    }

    #[test]
    fn test_divide_is_not_reciprocal_multiply() {
        let value = Transform::Divide(10.0).apply(RawValue::Word(4321)).unwrap();
        assert_eq!(value.to_bits(), (4321.0f32 / 10.0).to_bits());
    }

    #[test]
    fn test_j1979_formulas() {
        // 1A F8 => ((0x1A * 256) + 0xF8) / 4 = (26*256 + 248) / 4 = 6904/4 = 1726
        let rpm = Transform::J1979(Formula::Rpm);
        assert_eq!(rpm.apply(RawValue::Word(0x1AF8)).unwrap(), 1726.0);

        // 0x5A = 90, so temp = 90 - 40 = 50°C
        let coolant = Transform::J1979(Formula::Temperature);
        assert_eq!(coolant.apply(RawValue::Byte(0x5A)).unwrap(), 50.0);
        assert_eq!(coolant.apply(RawValue::Byte(0x00)).unwrap(), -40.0);

        // 0xFF = 255 => 255*100/255 = 100%
        let throttle = Transform::J1979(Formula::Percent);
        assert_eq!(throttle.apply(RawValue::Byte(0xFF)).unwrap(), 100.0);

        // 0B B8 = 3000 kPa => 3000*10/100 = 300 bar
        let rail = Transform::J1979(Formula::RailPressure);
        assert!((rail.apply(RawValue::Word(0x0BB8)).unwrap() - 300.0).abs() < 0.001);

        // 01 F4 = 500 => 500/100 = 5 g/s
        let maf = Transform::J1979(Formula::MassAirFlow);
        assert!((maf.apply(RawValue::Word(0x01F4)).unwrap() - 5.0).abs() < 0.001);

        // 101 kPa => 1010 mbar
        let mbar = Transform::J1979(Formula::KpaToMillibar);
        assert_eq!(mbar.apply(RawValue::Byte(101)).unwrap(), 1010.0);
    }

    #[test]
    fn test_quad_rejected() {
        assert_eq!(
            Transform::Identity.apply(RawValue::Quad([0; 4])),
            Err(DecodeError::NotScalar)
        );
    }

    #[test]
    fn test_voltage_accepted() {
        assert!((parse_voltage("12.3V", 0.0, 20.0).unwrap() - 12.3).abs() < 1e-6);
        assert!((parse_voltage(" \r\n13.9V\r\n>", 0.0, 20.0).unwrap() - 13.9).abs() < 1e-6);
        assert_eq!(parse_voltage("14V", 0.0, 20.0), Ok(14.0));
    }

    #[test]
    fn test_voltage_rejected() {
        assert!(matches!(
            parse_voltage("25.0V", 0.0, 20.0),
            Err(DecodeError::VoltageOutOfRange { .. })
        ));
        assert!(parse_voltage("0.0V", 0.0, 20.0).is_err());
        assert!(parse_voltage("20V", 0.0, 20.0).is_err());
        assert_eq!(parse_voltage("V", 0.0, 20.0), Err(DecodeError::MalformedNumber));
        assert_eq!(parse_voltage("?", 0.0, 20.0), Err(DecodeError::MalformedNumber));
        assert_eq!(parse_voltage("", 0.0, 20.0), Err(DecodeError::MalformedNumber));
    }

    #[test]
    fn test_voltage_stops_at_second_dot() {
        assert!((parse_voltage("12.3.4V", 0.0, 20.0).unwrap() - 12.3).abs() < 1e-6);
    }
}
