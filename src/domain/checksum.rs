//! CRC-16 checksum carried in the trailing `63` field of a QRIS payload.
//!
//! Polynomial `0x1021`, initial register `0xFFFF`, no final XOR. Readers
//! recompute exactly this value and silently reject the code on mismatch.

use crate::domain::tlv::CHECKSUM_HEADER;
use crate::error::{QrisError, Result};

const POLYNOMIAL: u16 = 0x1021;
const INITIAL: u16 = 0xFFFF;

/// Number of characters in the rendered checksum value.
pub const CHECKSUM_WIDTH: usize = 4;

/// Returns the raw 16-bit register after consuming `text`.
///
/// Each UTF-16 code unit contributes its low byte, which matches readers that
/// iterate over JavaScript-style character codes.
pub fn crc16(text: &str) -> u16 {
    let mut crc = INITIAL;
    for unit in text.encode_utf16() {
        crc ^= (unit & 0x00FF) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ POLYNOMIAL
            } else {
                crc << 1
            };
        }
    }
    crc
}

/// Computes the checksum of `text` as 4 zero-padded uppercase hex digits.
pub fn compute_checksum(text: &str) -> String {
    format!("{:04X}", crc16(text))
}

/// Checks the trailing checksum value of a sealed payload and returns it.
///
/// The checksum covers everything up to and including the `6304` header.
pub fn verify_checksum(payload: &str) -> Result<String> {
    let total = payload.chars().count();
    if total < CHECKSUM_HEADER.len() + CHECKSUM_WIDTH {
        return Err(QrisError::FormatError("payload too short".to_string()));
    }

    let split = payload
        .char_indices()
        .nth(total - CHECKSUM_WIDTH)
        .map(|(idx, _)| idx)
        .unwrap_or(payload.len());
    let (covered, found) = payload.split_at(split);

    if !covered.ends_with(CHECKSUM_HEADER) {
        return Err(QrisError::FormatError(
            "missing checksum field header 6304".to_string(),
        ));
    }

    let expected = compute_checksum(covered);
    if expected.eq_ignore_ascii_case(found) {
        Ok(expected)
    } else {
        Err(QrisError::FormatError(format!(
            "checksum mismatch: expected {expected}, found {found}"
        )))
    }
}
