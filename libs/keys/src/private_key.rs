//! Private keys: raw scalar, hex and Wallet Import Format
//!
//! WIF payload layout:
//! ```text
//! [network private_key_prefix:1][scalar:32 big-endian][0x01 if compressed]
//! ```
//! The trailing `0x01` is the only place the compression choice travels.

use crate::base58check;
use crate::curve::{self, FIELD_SIZE, Scalar};
use crate::error::{Codec, KeyError, ParseReason, Result};
use crate::hash::sha256;
use crate::network::NetworkProfile;
use crate::public_key::PublicKey;
use num_bigint::BigUint;
use std::fmt;
use std::str::FromStr;

/// Payload length of an uncompressed WIF (prefix + scalar)
pub const WIF_UNCOMPRESSED_LEN: usize = 1 + FIELD_SIZE;

/// Payload length of a compressed WIF (prefix + scalar + flag)
pub const WIF_COMPRESSED_LEN: usize = WIF_UNCOMPRESSED_LEN + 1;

const COMPRESSED_FLAG: u8 = 0x01;

/// secp256k1 private key bound to a network
///
/// Equality compares the scalar and the network; the compression flag only
/// selects the default serialization of the derived public key.
#[derive(Clone)]
pub struct PrivateKey {
    scalar: Scalar,
    compressed: bool,
    network: NetworkProfile,
}

impl PrivateKey {
    /// Create an uncompressed key from an integer in `[1, n-1]`
    pub fn from_scalar(value: &BigUint, network: &NetworkProfile) -> Result<Self> {
        let scalar = Scalar::from_biguint(value)
            .ok_or_else(|| KeyError::parse(Codec::Scalar, ParseReason::ScalarOutOfRange))?;
        Ok(Self::new(scalar, false, network))
    }

    /// Parse a big-endian scalar given as 64 hex characters or 32 raw bytes
    ///
    /// The resulting key is uncompressed.
    pub fn from_hex_key(key: impl AsRef<[u8]>, network: &NetworkProfile) -> Result<Self> {
        let key = key.as_ref();
        let mut bytes = [0u8; FIELD_SIZE];
        match key.len() {
            FIELD_SIZE => bytes.copy_from_slice(key),
            len if len == 2 * FIELD_SIZE => hex::decode_to_slice(key, &mut bytes).map_err(|e| {
                KeyError::parse(Codec::PrivateKeyHex, ParseReason::InvalidHex(e.to_string()))
            })?,
            actual => {
                return Err(KeyError::parse(
                    Codec::PrivateKeyHex,
                    ParseReason::InvalidLength {
                        expected: "64 hex characters or 32 bytes",
                        actual,
                    },
                ));
            }
        }

        let scalar = Scalar::from_be_bytes(&bytes).ok_or_else(|| {
            KeyError::parse(Codec::PrivateKeyHex, ParseReason::ScalarOutOfRange)
        })?;
        Ok(Self::new(scalar, false, network))
    }

    /// Derive an uncompressed key from the SHA-256 of a passphrase
    ///
    /// No salt and no stretching: a human-chosen passphrase gives a
    /// low-entropy key that can be brute-forced. Kept for compatibility with
    /// existing "brain wallets".
    pub fn from_master_password(
        passphrase: impl AsRef<[u8]>,
        network: &NetworkProfile,
    ) -> Result<Self> {
        Self::from_hex_key(sha256(passphrase.as_ref()), network)
    }

    /// Parse a WIF string minted for `expected_network`
    ///
    /// The checksum is verified first, then the version byte, then the
    /// payload length and compression flag.
    pub fn from_wif(wif: &str, expected_network: &NetworkProfile) -> Result<Self> {
        let payload = base58check::decode(wif)?;

        let Some(&found) = payload.first() else {
            return Err(wif_length_error(0));
        };
        let expected = expected_network.private_key_prefix();
        if found != expected {
            log::debug!(
                "WIF version 0x{found:02x} does not match {} (0x{expected:02x})",
                expected_network.name()
            );
            return Err(KeyError::IncompatibleNetwork {
                codec: Codec::Wif,
                expected,
                found,
            });
        }

        let compressed = match payload.len() {
            WIF_UNCOMPRESSED_LEN => false,
            WIF_COMPRESSED_LEN => match payload[WIF_UNCOMPRESSED_LEN] {
                COMPRESSED_FLAG => true,
                flag => {
                    return Err(KeyError::parse(
                        Codec::Wif,
                        ParseReason::InvalidCompressionFlag(flag),
                    ));
                }
            },
            len => return Err(wif_length_error(len)),
        };

        let mut bytes = [0u8; FIELD_SIZE];
        bytes.copy_from_slice(&payload[1..WIF_UNCOMPRESSED_LEN]);
        let scalar = Scalar::from_be_bytes(&bytes)
            .ok_or_else(|| KeyError::parse(Codec::Wif, ParseReason::ScalarOutOfRange))?;

        log::debug!(
            "Decoded WIF for {} (compressed: {compressed})",
            expected_network.name()
        );
        Ok(Self::new(scalar, compressed, expected_network))
    }

    fn new(scalar: Scalar, compressed: bool, network: &NetworkProfile) -> Self {
        Self {
            scalar,
            compressed,
            network: network.clone(),
        }
    }

    /// Copy of this key with the compression flag set to `compressed`
    #[must_use]
    pub fn with_compression(self, compressed: bool) -> Self {
        Self { compressed, ..self }
    }

    /// Encode as WIF
    #[must_use]
    pub fn export_to_wif(&self) -> String {
        let mut payload = Vec::with_capacity(WIF_COMPRESSED_LEN);
        payload.push(self.network.private_key_prefix());
        payload.extend_from_slice(&self.scalar.to_be_bytes());
        if self.compressed {
            payload.push(COMPRESSED_FLAG);
        }
        base58check::encode(&payload)
    }

    /// Scalar as 64 lowercase hex characters
    #[must_use]
    pub fn get_key(&self) -> String {
        hex::encode(self.scalar.to_be_bytes())
    }

    /// Scalar as 32 big-endian bytes
    #[must_use]
    pub fn to_bytes(&self) -> [u8; FIELD_SIZE] {
        self.scalar.to_be_bytes()
    }

    /// Scalar as an integer
    #[must_use]
    pub fn private_exponent(&self) -> BigUint {
        self.scalar.to_biguint()
    }

    /// Whether the derived public key serializes compressed
    #[must_use]
    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    /// Network this key is bound to
    #[must_use]
    pub fn network(&self) -> &NetworkProfile {
        &self.network
    }

    /// Derive the public key; it inherits the compression flag and network
    #[must_use]
    pub fn get_public_key(&self) -> PublicKey {
        PublicKey::from_curve_point(curve::scalar_mul(&self.scalar), self.compressed, &self.network)
    }
}

fn wif_length_error(actual: usize) -> KeyError {
    KeyError::parse(
        Codec::Wif,
        ParseReason::InvalidLength {
            expected: "33 or 34 bytes",
            actual,
        },
    )
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.scalar == other.scalar && self.network == other.network
    }
}

impl Eq for PrivateKey {}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("network", &self.network.name())
            .field("compressed", &self.compressed)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.export_to_wif())
    }
}

impl FromStr for PrivateKey {
    type Err = KeyError;

    /// Parse a WIF against the default (bitcoin mainnet) profile
    fn from_str(s: &str) -> Result<Self> {
        Self::from_wif(s, &NetworkProfile::default())
    }
}
