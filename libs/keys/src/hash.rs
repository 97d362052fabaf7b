//! Hash pipeline used by the checksum and address layers

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// SHA-256 digest
#[must_use]
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// SHA-256 applied twice
#[must_use]
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(Sha256::digest(data)).into()
}

/// RIPEMD-160 of SHA-256, the 20-byte public key digest carried in addresses
#[must_use]
pub fn hash160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(Sha256::digest(data)).into()
}
