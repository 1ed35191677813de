//! KWP2000 Page Definitions
//!
//! The four proprietary pages are read with ReadDataByLocalIdentifier
//! (`21 <id>`); a positive reply starts with `61 <id>` and the payload
//! follows at byte 2.

use crate::error::DecodeError;
use serde::{Deserialize, Serialize};

/// ReadDataByLocalIdentifier service id
pub const READ_DATA_BY_LOCAL_ID: u8 = 0x21;

/// Positive response SID = request SID + this offset
pub const RESPONSE_SID_OFFSET: u8 = 0x40;

/// First payload byte of a page response
pub const PAYLOAD_OFFSET: usize = 2;

/// Largest single-frame KWP2000 response
pub const MAX_FRAME_LEN: usize = 255;

/// Proprietary data pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PageId {
    A0 = 0xA0,
    A2 = 0xA2,
    A5 = 0xA5,
    Cd = 0xCD,
}

impl PageId {
    /// All pages in poll order
    pub const ALL: [PageId; 4] = [PageId::A0, PageId::A2, PageId::A5, PageId::Cd];

    /// Local identifier byte
    pub fn as_hex(&self) -> u8 {
        *self as u8
    }

    /// Position in [`PageId::ALL`]
    pub fn index(&self) -> usize {
        match self {
            PageId::A0 => 0,
            PageId::A2 => 1,
            PageId::A5 => 2,
            PageId::Cd => 3,
        }
    }

    /// Request bytes, e.g. `[0x21, 0xA0]`
    pub fn request(&self) -> [u8; 2] {
        [READ_DATA_BY_LOCAL_ID, self.as_hex()]
    }

    /// Expected positive response header, e.g. `[0x61, 0xA0]`
    pub fn response_header(&self) -> [u8; 2] {
        [READ_DATA_BY_LOCAL_ID + RESPONSE_SID_OFFSET, self.as_hex()]
    }

    /// Check that `frame` starts with this page's positive response header
    pub fn check_header(&self, frame: &[u8]) -> Result<(), DecodeError> {
        let expected = self.response_header();
        match frame.get(..PAYLOAD_OFFSET) {
            Some(header) if header == expected.as_slice() => Ok(()),
            other => Err(DecodeError::HeaderMismatch {
                expected,
                actual: other.unwrap_or(frame).to_vec(),
            }),
        }
    }
}

impl std::fmt::Display for PageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "21{:02X}", self.as_hex())
    }
}
