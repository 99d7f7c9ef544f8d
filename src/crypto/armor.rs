//! Base64 armor for envelopes
//!
//! Mirrors `openssl enc -a`: standard alphabet, lines of 64 characters, a
//! trailing newline. Decoding ignores any ASCII whitespace.

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::FormatError;

/// Characters per armored line
pub const LINE_WIDTH: usize = 64;

/// Encode an envelope as wrapped base64 text
pub fn encode(envelope: &[u8]) -> String {
    let encoded = STANDARD.encode(envelope);
    let mut wrapped = String::with_capacity(encoded.len() + encoded.len() / LINE_WIDTH + 1);

    for line in encoded.as_bytes().chunks(LINE_WIDTH) {
        wrapped.extend(line.iter().map(|&b| b as char));
        wrapped.push('\n');
    }
    wrapped
}

/// Decode armored text back into envelope bytes
pub fn decode(armored: &[u8]) -> Result<Vec<u8>, FormatError> {
    let compact: Vec<u8> = armored
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();

    STANDARD
        .decode(&compact)
        .map_err(|e| FormatError::Armor(e.to_string()))
}
