//! Packing of record bytes into the `d1` string array.
//!
//! Envelope attributes can only hold strings, so record bytes are spread over
//! 7-bit characters. A NUL marker at the start of the first string selects
//! this mode; input without the marker is read as one byte per character.
//!
//! Every 7-bit value is offset by one (modulo 128) before it becomes a
//! character: zero is far more common than 0x7F in record bytes, and only the
//! latter now maps to NUL.

use crate::CodecError;

/// Marker prefixed to the first string of 8-to-7 encoded data.
pub const MARKER: char = '\u{0}';

/// Maximum number of characters in one encoded string.
pub const MAX_CHUNK_LEN: usize = 65535;

/// Encode bytes into an array of strings.
pub fn encode_bytes(data: &[u8]) -> Vec<String> {
    let septets = encode_8_to_7(data);

    let mut text = String::with_capacity(septets.len() + 1);
    text.push(MARKER);
    for s in septets {
        text.push(char::from((s + 1) & 0x7F));
    }

    // All characters are ASCII, so byte offsets are char boundaries.
    text.as_bytes()
        .chunks(MAX_CHUNK_LEN)
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .collect()
}

/// Decode an array of strings produced by [`encode_bytes`] (or the legacy
/// one-byte-per-char layout) back into bytes.
pub fn decode_bytes(data: &[String]) -> Result<Vec<u8>, CodecError> {
    let marked = data
        .first()
        .and_then(|s| s.chars().next())
        .is_some_and(|c| c == MARKER);

    let mut chars = data.iter().flat_map(|s| s.chars()).enumerate();
    if marked {
        chars.next();
        let mut septets = Vec::new();
        for (offset, ch) in chars {
            let code = ch as u32;
            if code > 0x7F {
                return Err(CodecError::InvalidBitEncoding { offset, ch });
            }
            septets.push((code as u8).wrapping_sub(1) & 0x7F);
        }
        Ok(decode_7_to_8(&septets))
    } else {
        chars
            .map(|(offset, ch)| {
                u8::try_from(ch as u32).map_err(|_| CodecError::InvalidBitEncoding { offset, ch })
            })
            .collect()
    }
}

/// Spread 8-bit bytes over 7-bit values, least significant bits first.
fn encode_8_to_7(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity((data.len() * 8).div_ceil(7));
    let mut acc: u32 = 0;
    let mut bits = 0;

    for &b in data {
        acc |= u32::from(b) << bits;
        bits += 8;
        while bits >= 7 {
            out.push((acc & 0x7F) as u8);
            acc >>= 7;
            bits -= 7;
        }
    }
    if bits > 0 {
        out.push((acc & 0x7F) as u8);
    }
    out
}

/// Inverse of [`encode_8_to_7`]. Padding bits of the final value are dropped.
fn decode_7_to_8(septets: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(septets.len() * 7 / 8);
    let mut acc: u32 = 0;
    let mut bits = 0;

    for &s in septets {
        acc |= u32::from(s & 0x7F) << bits;
        bits += 7;
        if bits >= 8 {
            out.push((acc & 0xFF) as u8);
            acc >>= 8;
            bits -= 8;
        }
    }
    out
}
