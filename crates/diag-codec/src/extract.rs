//! Bounds-Checked Field Extraction

use crate::error::DecodeError;
use serde::{Deserialize, Serialize};

/// Width of a raw field in bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Width {
    /// Single byte (A)
    One,
    /// Big-endian 16-bit word (A·256 + B)
    Two,
    /// Four bytes handed over uninterpreted
    Four,
}

impl Width {
    /// Number of bytes covered by this width
    pub const fn bytes(self) -> usize {
        match self {
            Width::One => 1,
            Width::Two => 2,
            Width::Four => 4,
        }
    }
}

/// Raw value pulled out of a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawValue {
    Byte(u8),
    Word(u16),
    Quad([u8; 4]),
}

impl RawValue {
    /// Integer value for 1- and 2-byte fields
    pub fn scalar(self) -> Result<u32, DecodeError> {
        match self {
            RawValue::Byte(a) => Ok(a as u32),
            RawValue::Word(w) => Ok(w as u32),
            RawValue::Quad(_) => Err(DecodeError::NotScalar),
        }
    }

    /// Individual data bytes (A, B, ...) in wire order
    pub fn bytes(&self) -> Vec<u8> {
        match *self {
            RawValue::Byte(a) => vec![a],
            RawValue::Word(w) => w.to_be_bytes().to_vec(),
            RawValue::Quad(q) => q.to_vec(),
        }
    }
}

/// Extract a field of `width` bytes starting at `offset`.
///
/// Requires `buf.len() > offset + width - 1`. A short buffer is reported as
/// [`DecodeError::Truncated`]; pages routinely arrive cut short.
pub fn extract(buf: &[u8], offset: usize, width: Width) -> Result<RawValue, DecodeError> {
    let needed = offset.saturating_add(width.bytes());
    let Some(field) = buf.get(offset..needed) else {
        return Err(DecodeError::Truncated {
            needed,
            actual: buf.len(),
        });
    };

    Ok(match width {
        Width::One => RawValue::Byte(field[0]),
        Width::Two => RawValue::Word(u16::from_be_bytes([field[0], field[1]])),
        Width::Four => RawValue::Quad([field[0], field[1], field[2], field[3]]),
    })
}
