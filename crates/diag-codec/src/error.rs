//! Decode Error Types

use thiserror::Error;

/// Reasons a single field could not be decoded.
///
/// None of these abort a decode cycle: the orchestrators log them and leave
/// the target field untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    /// The `41 <pid>` response marker is absent from the response
    #[error("Response marker 41{0:02X} not found")]
    MarkerNotFound(u8),

    /// Buffer too short for the requested field
    #[error("Buffer too short: need {needed} bytes, got {actual}")]
    Truncated { needed: usize, actual: usize },

    /// Raw value has no scalar interpretation (4-byte fields)
    #[error("Raw value is not a scalar")]
    NotScalar,

    /// No leading numeric token in a voltage reading
    #[error("Malformed numeric token")]
    MalformedNumber,

    /// Parsed voltage outside the accepted window
    #[error("Voltage {value}V outside ({min}, {max})")]
    VoltageOutOfRange { value: f32, min: f32, max: f32 },

    /// Response header does not match the requested page
    #[error("Header mismatch: expected {expected:02X?}, got {actual:02X?}")]
    HeaderMismatch { expected: [u8; 2], actual: Vec<u8> },
}
