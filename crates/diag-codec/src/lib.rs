//! Diagnostic Response Codec
//!
//! Low-level helpers shared by the page and OBD-II decoders: ASCII-hex
//! normalization, hex-to-byte conversion, `41 <pid>` marker location and
//! bounds-checked field extraction. Nothing in here panics on bad input.

mod error;
mod extract;
pub mod hex;
pub mod kwp;
mod pid;

pub use error::DecodeError;
pub use extract::{extract, RawValue, Width};
pub use hex::CanonicalHex;
pub use kwp::PageId;
pub use pid::{locate_pid_data, Pid};

/// OBD-II mode constants
pub mod mode {
    /// Current data
    pub const CURRENT_DATA: u8 = 0x01;
    /// Positive response to a current data request
    pub const CURRENT_DATA_RESPONSE: u8 = 0x41;
}
