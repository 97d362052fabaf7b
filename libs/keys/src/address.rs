//! Address decoding
//!
//! Addresses are only ever produced from a public key
//! ([`PublicKey::to_address`](crate::PublicKey::to_address)). Decoding goes
//! the other way only as far as the hash160; the point cannot be recovered.

use crate::base58check;
use crate::error::{Codec, KeyError, ParseReason, Result};
use crate::network::NetworkProfile;

/// Length of the RIPEMD-160 digest carried in an address
pub const HASH160_LEN: usize = 20;

/// Length of an address payload (version byte + hash160)
pub const ADDRESS_PAYLOAD_LEN: usize = 1 + HASH160_LEN;

/// Decode an address minted for `expected_network` and return its hash160
///
/// Checksum first, then the version byte, then the payload length.
pub fn decode_address(address: &str, expected_network: &NetworkProfile) -> Result<[u8; HASH160_LEN]> {
    let payload = base58check::decode(address)?;

    let Some(&found) = payload.first() else {
        return Err(address_length_error(0));
    };
    let expected = expected_network.public_key_prefix();
    if found != expected {
        return Err(KeyError::IncompatibleNetwork {
            codec: Codec::Address,
            expected,
            found,
        });
    }

    if payload.len() != ADDRESS_PAYLOAD_LEN {
        return Err(address_length_error(payload.len()));
    }

    let mut hash = [0u8; HASH160_LEN];
    hash.copy_from_slice(&payload[1..]);
    Ok(hash)
}

fn address_length_error(actual: usize) -> KeyError {
    KeyError::parse(
        Codec::Address,
        ParseReason::InvalidLength {
            expected: "21 bytes",
            actual,
        },
    )
}
