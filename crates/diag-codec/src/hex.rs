//! ASCII-Hex Response Handling
//!
//! Adapter responses arrive as ASCII text with arbitrary case, spaces,
//! CR/LF and prompt characters. Everything here tolerates that noise and
//! never fails: bad characters are skipped, not reported.

use std::fmt;

/// Maps an ASCII byte to its nibble value, or 0xFF if it is not a hex digit
const NIBBLE: [u8; 256] = {
    let mut table = [0xFF; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = match i as u8 {
            c @ b'0'..=b'9' => c - b'0',
            c @ b'a'..=b'f' => c - b'a' + 10,
            c @ b'A'..=b'F' => c - b'A' + 10,
            _ => 0xFF,
        };
        i += 1;
    }
    table
};

#[inline]
fn nibble(c: u8) -> Option<u8> {
    match NIBBLE[c as usize] {
        0xFF => None,
        n => Some(n),
    }
}

/// Strip everything that is not a hex digit and uppercase the rest.
///
/// `" 61 a0\r\nFF"` becomes `"61A0FF"`.
pub fn normalize(raw: &str) -> String {
    raw.bytes()
        .filter(u8::is_ascii_hexdigit)
        .map(|c| c.to_ascii_uppercase() as char)
        .collect()
}

/// Decode hex digit pairs from `input` into `out`, skipping separators.
///
/// Stops when `out` is full or the input is exhausted. A trailing unpaired
/// digit produces no byte. Returns the number of bytes written.
pub fn decode_into(input: &[u8], out: &mut [u8]) -> usize {
    let mut digits = input.iter().filter_map(|&c| nibble(c));
    let mut written = 0;

    while written < out.len() {
        let (Some(hi), Some(lo)) = (digits.next(), digits.next()) else {
            break;
        };
        out[written] = (hi << 4) | lo;
        written += 1;
    }

    written
}

/// Decode at most `max` bytes from a hex string into a new buffer
pub fn decode_bounded(input: &str, max: usize) -> Vec<u8> {
    let mut out = vec![0u8; max];
    let n = decode_into(input.as_bytes(), &mut out);
    out.truncate(n);
    out
}

/// A response normalized once, shared by every lookup made against it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalHex(String);

impl CanonicalHex {
    /// Normalize raw response text
    pub fn new(raw: &str) -> Self {
        Self(normalize(raw))
    }

    /// Character offset of the first `<mode><pid>` marker, e.g. `"410C"`.
    ///
    /// Only the first occurrence counts; later echoes of the same PID are
    /// ignored.
    pub fn find_marker(&self, mode: u8, pid: u8) -> Option<usize> {
        let needle = format!("{mode:02X}{pid:02X}");
        self.0.find(&needle)
    }

    /// Hex digits from `start` to the end, or an empty slice past the end
    pub fn tail(&self, start: usize) -> &str {
        self.0.get(start..).unwrap_or("")
    }
}

impl fmt::Display for CanonicalHex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_strips_separators() {
        assert_eq!(normalize(" 61 a0\r\nFF"), "61A0FF");
        assert_eq!(normalize("83 F1 7A 41 0c 1a f8 >"), "83F17A410C1AF8");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("NO DATA"), "DAA");
    }

    #[test]
    fn test_decode_skips_separators() {
        let mut out = [0u8; 8];
        let n = decode_into(b"61 A0-0f:e", &mut out);
        assert_eq!(n, 3);
        assert_eq!(&out[..n], &[0x61, 0xA0, 0x0F]);
    }

    #[test]
    fn test_decode_drops_trailing_digit() {
        assert_eq!(decode_bounded("ABC", 4), vec![0xAB]);
        assert_eq!(decode_bounded("A", 4), Vec::<u8>::new());
    }

    #[test]
    fn test_decode_respects_bound() {
        assert_eq!(decode_bounded("0102030405", 2), vec![0x01, 0x02]);
        assert!(decode_bounded("0102", 0).is_empty());
    }

    #[test]
    fn test_pair_spans_separator() {
        // High and low nibble may be split by noise
        assert_eq!(decode_bounded("6 1A 0", 4), vec![0x61, 0xA0]);
    }

    #[test]
    fn test_find_marker_first_match_wins() {
        let hex = CanonicalHex::new("41 0C 1A F8 41 0C 00 00");
        assert_eq!(hex.find_marker(0x41, 0x0C), Some(0));
        assert_eq!(hex.find_marker(0x41, 0x0D), None);
    }

    #[test]
    fn test_find_marker_behind_header() {
        let hex = CanonicalHex::new("83F17A41055A");
        assert_eq!(hex.find_marker(0x41, 0x05), Some(6));
        assert_eq!(hex.tail(10), "5A");
        assert_eq!(hex.tail(40), "");
    }

    #[test]
    fn test_find_marker_odd_offset() {
        let hex = CanonicalHex::new("0410C1AF8");
        assert_eq!(hex.find_marker(0x41, 0x0C), Some(1));
        assert_eq!(hex.tail(5), "1AF8");
    }

    proptest! {
        #[test]
        fn prop_normalize_alphabet(raw in ".{0,64}") {
            let out = normalize(&raw);
            prop_assert!(out.bytes().all(|c| c.is_ascii_digit() || (b'A'..=b'F').contains(&c)));
            prop_assert!(out.len() <= raw.len());
        }

        #[test]
        fn prop_decode_never_overflows(
            raw in proptest::collection::vec(any::<u8>(), 0usize..128),
            cap in 0usize..32,
        ) {
            let mut out = vec![0u8; cap];
            let n = decode_into(&raw, &mut out);
            let digits = raw.iter().filter(|c| c.is_ascii_hexdigit()).count();
            prop_assert_eq!(n, (digits / 2).min(cap));
        }
    }
}
