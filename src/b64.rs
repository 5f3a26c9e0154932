//! Standalone base64 codec for inline image assets.
//!
//! Image bytes travel as base64 text embedded alongside the generator, and
//! the host is not guaranteed to offer a decoder, so the codec lives here.
//!
//! Decoding is permissive: any byte outside the standard alphabet (including
//! `=` and whitespace) is read as the sextet `0` instead of producing an
//! error. Callers that previously relied on this tolerance would see
//! different output if it were tightened, so it is kept as-is.

use std::path::Path;

use crate::Result;

const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

fn sextet(c: u8) -> u32 {
    match c {
        b'A'..=b'Z' => (c - b'A') as u32,
        b'a'..=b'z' => (c - b'a') as u32 + 26,
        b'0'..=b'9' => (c - b'0') as u32 + 52,
        b'+' => 62,
        b'/' => 63,
        _ => 0,
    }
}

/// Number of bytes `decode` produces for `text`: `floor(len * 3 / 4) - pads`.
pub fn decoded_len(text: &str) -> usize {
    let input = text.as_bytes();
    let len = input.len();
    let mut pads = 0;
    if len >= 1 && input[len - 1] == b'=' {
        pads += 1;
    }
    if len >= 2 && input[len - 2] == b'=' {
        pads += 1;
    }
    (len * 3 / 4).saturating_sub(pads)
}

/// Decode standard-alphabet base64 into raw bytes.
///
/// Never fails. Unknown characters decode as zero bits and a truncated final
/// quartet is zero-filled before the output is cut to [`decoded_len`].
pub fn decode(text: &str) -> Vec<u8> {
    let input = text.as_bytes();
    let byte_len = decoded_len(text);
    let mut out = Vec::with_capacity(byte_len);
    let at = |i: usize| input.get(i).map_or(0, |&c| sextet(c));

    for i in (0..input.len()).step_by(4) {
        let (a, b, c, d) = (at(i), at(i + 1), at(i + 2), at(i + 3));
        let group = [
            ((a << 2) | (b >> 4)) as u8,
            (((b & 15) << 4) | (c >> 2)) as u8,
            (((c & 3) << 6) | d) as u8,
        ];
        for byte in group {
            if out.len() < byte_len {
                out.push(byte);
            }
        }
    }

    log::debug!("decoded {} base64 chars into {} bytes", input.len(), out.len());
    out
}

/// Decode base64 stored as text, such as the line-wrapped output of
/// `base64(1)`. ASCII whitespace is dropped first so line breaks do not shift
/// later quartets; anything else still decodes permissively.
pub fn decode_text(text: &str) -> Vec<u8> {
    decode(&text.split_ascii_whitespace().collect::<String>())
}

/// Read a file of base64 text and decode it with [`decode_text`].
pub fn read_file(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let text = std::fs::read_to_string(path)?;
    Ok(decode_text(&text))
}

/// Encode bytes as padded standard-alphabet base64.
pub fn encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len().div_ceil(3) * 4);
    for chunk in bytes.chunks(3) {
        let b0 = chunk[0] as u32;
        let b1 = chunk.get(1).copied().unwrap_or(0) as u32;
        let b2 = chunk.get(2).copied().unwrap_or(0) as u32;
        let n = (b0 << 16) | (b1 << 8) | b2;

        out.push(ALPHABET[(n >> 18) as usize & 63] as char);
        out.push(ALPHABET[(n >> 12) as usize & 63] as char);
        if chunk.len() > 1 {
            out.push(ALPHABET[(n >> 6) as usize & 63] as char);
        } else {
            out.push('=');
        }
        if chunk.len() > 2 {
            out.push(ALPHABET[n as usize & 63] as char);
        } else {
            out.push('=');
        }
    }
    out
}
