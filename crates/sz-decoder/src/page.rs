//! Page Decoder
//!
//! Decodes the four `21 A0/A2/A5/CD` page frames of a poll cycle into the
//! record through [`PAGE_TABLE`]. A missing or short page only costs the
//! fields it carries.

use crate::config::{DecoderConfig, HeaderCheck};
use crate::record::{DecodeSummary, SensorRecord};
use crate::table::PAGE_TABLE;
use diag_codec::kwp::MAX_FRAME_LEN;
use diag_codec::{extract, hex, PageId};
use tracing::{debug, trace, warn};

/// The page frames collected during one poll cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSet {
    frames: [Option<Vec<u8>>; 4],
}

impl PageSet {
    /// Empty set, every page absent
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the four raw frames; `None` marks a page that was not received
    pub fn from_frames(
        a0: Option<&[u8]>,
        a2: Option<&[u8]>,
        a5: Option<&[u8]>,
        cd: Option<&[u8]>,
    ) -> Self {
        Self {
            frames: [a0, a2, a5, cd].map(|f| f.map(<[u8]>::to_vec)),
        }
    }

    /// Add a frame, builder style
    pub fn with_page(mut self, page: PageId, frame: impl Into<Vec<u8>>) -> Self {
        self.insert(page, frame);
        self
    }

    /// Store the frame for `page`, replacing any previous one
    pub fn insert(&mut self, page: PageId, frame: impl Into<Vec<u8>>) {
        self.frames[page.index()] = Some(frame.into());
    }

    /// Store a frame given as adapter ASCII-hex text
    pub fn insert_hex(&mut self, page: PageId, response: &str) {
        self.insert(page, hex::decode_bounded(response, MAX_FRAME_LEN));
    }

    /// Frame for `page`, if received
    pub fn get(&self, page: PageId) -> Option<&[u8]> {
        self.frames[page.index()].as_deref()
    }
}

/// Table-driven decoder for the proprietary pages
#[derive(Debug, Clone, Default)]
pub struct SzPageDecoder {
    header_check: HeaderCheck,
}

impl SzPageDecoder {
    pub fn new(config: &DecoderConfig) -> Self {
        Self {
            header_check: config.header_check,
        }
    }

    /// Decode every table field whose page is present and long enough.
    ///
    /// Fields that cannot be decoded keep their current value.
    pub fn decode(&self, pages: &PageSet, record: &mut SensorRecord) -> DecodeSummary {
        let frames = PageId::ALL.map(|page| self.accepted_frame(pages, page));
        let mut summary = DecodeSummary::default();

        for desc in PAGE_TABLE.iter() {
            let Some(frame) = frames[desc.page.index()] else {
                summary.skipped += 1;
                continue;
            };

            match extract(frame, desc.offset, desc.width).and_then(|raw| desc.transform.apply(raw)) {
                Ok(value) => {
                    record.set(desc.field, value);
                    summary.written += 1;
                }
                Err(e) => {
                    trace!(field = %desc.field, page = %desc.page, error = %e, "Field not decoded");
                    summary.skipped += 1;
                }
            }
        }

        debug!(
            written = summary.written,
            skipped = summary.skipped,
            "Page decode complete"
        );
        summary
    }

    fn accepted_frame<'a>(&self, pages: &'a PageSet, page: PageId) -> Option<&'a [u8]> {
        let Some(frame) = pages.get(page) else {
            debug!(%page, "Page absent");
            return None;
        };

        if self.header_check == HeaderCheck::Verify {
            if let Err(e) = page.check_header(frame) {
                warn!(%page, error = %e, "Page rejected");
                return None;
            }
        }

        Some(frame)
    }
}

/// Decode the four page frames with the default configuration
pub fn decode_pages(
    a0: &[u8],
    a2: &[u8],
    a5: &[u8],
    cd: &[u8],
    record: &mut SensorRecord,
) -> DecodeSummary {
    let pages = PageSet::from_frames(Some(a0), Some(a2), Some(a5), Some(cd));
    SzPageDecoder::default().decode(&pages, record)
}
