//! `Base58Check` encoding/decoding
//!
//! Payloads carry a 4-byte double SHA-256 checksum and are rendered in the
//! Bitcoin base-58 alphabet. The conversion runs in two explicit phases:
//! a big-integer radix conversion of everything after the leading zero bytes,
//! then one `'1'` per leading zero byte. Integer conversion alone would drop
//! those bytes.

use crate::error::{Codec, KeyError, ParseReason, Result};
use crate::hash::double_sha256;
use num_bigint::BigUint;

/// Checksum width in bytes
pub const CHECKSUM_LEN: usize = 4;

const ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

// Character -> digit, 0xff for characters outside the alphabet
#[allow(clippy::cast_possible_truncation)]
const DIGITS: [u8; 128] = {
    let mut table = [0xff; 128];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
};

/// First 4 bytes of the double SHA-256 of `payload`
#[must_use]
pub fn checksum(payload: &[u8]) -> [u8; CHECKSUM_LEN] {
    let digest = double_sha256(payload);
    let mut checksum = [0u8; CHECKSUM_LEN];
    checksum.copy_from_slice(&digest[..CHECKSUM_LEN]);
    checksum
}

/// Encode `payload` with an appended checksum
#[must_use]
pub fn encode(payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(payload.len() + CHECKSUM_LEN);
    data.extend_from_slice(payload);
    data.extend_from_slice(&checksum(payload));

    encode_base58(&data)
}

/// Decode a `Base58Check` string, verify its checksum and return the payload
///
/// The checksum is verified before the payload is handed to any caller.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    let mut decoded = decode_base58(text)?;

    if decoded.len() < CHECKSUM_LEN {
        return Err(KeyError::parse(
            Codec::Base58Check,
            ParseReason::TooShort {
                min: CHECKSUM_LEN,
                actual: decoded.len(),
            },
        ));
    }

    let data_end = decoded.len() - CHECKSUM_LEN;
    let mut found = [0u8; CHECKSUM_LEN];
    found.copy_from_slice(&decoded[data_end..]);
    decoded.truncate(data_end);

    let expected = checksum(&decoded);
    if found != expected {
        log::debug!("Base58Check checksum mismatch over {data_end}-byte payload");
        return Err(KeyError::Checksum {
            codec: Codec::Base58Check,
            expected,
            found,
        });
    }

    Ok(decoded)
}

fn encode_base58(data: &[u8]) -> String {
    let zeros = data.iter().take_while(|&&b| b == 0).count();
    let rest = &data[zeros..];

    let digits = if rest.is_empty() {
        Vec::new()
    } else {
        BigUint::from_bytes_be(rest).to_radix_be(58)
    };

    let mut encoded = String::with_capacity(zeros + digits.len());
    encoded.extend(std::iter::repeat_n(char::from(ALPHABET[0]), zeros));
    encoded.extend(digits.iter().map(|&d| char::from(ALPHABET[usize::from(d)])));
    encoded
}

fn decode_base58(text: &str) -> Result<Vec<u8>> {
    if text.is_empty() {
        return Err(KeyError::parse(Codec::Base58Check, ParseReason::Empty));
    }

    let mut digits = Vec::with_capacity(text.len());
    for (index, character) in text.chars().enumerate() {
        let digit = u8::try_from(character)
            .ok()
            .and_then(|b| DIGITS.get(usize::from(b)).copied())
            .filter(|&d| d != 0xff)
            .ok_or_else(|| {
                KeyError::parse(
                    Codec::Base58Check,
                    ParseReason::InvalidCharacter { character, index },
                )
            })?;
        digits.push(digit);
    }

    let zeros = digits.iter().take_while(|&&d| d == 0).count();
    let rest = &digits[zeros..];

    let mut decoded = vec![0u8; zeros];
    if !rest.is_empty() {
        let value = rest
            .iter()
            .fold(BigUint::default(), |acc, &digit| acc * 58u8 + digit);
        decoded.extend_from_slice(&value.to_bytes_be());
    }
    Ok(decoded)
}
