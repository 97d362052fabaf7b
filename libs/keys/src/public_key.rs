//! Public keys: SEC encodings and address derivation
//!
//! SEC layouts:
//! ```text
//! compressed:   [0x02 even y | 0x03 odd y][x:32]
//! uncompressed: [0x04][x:32][y:32]
//! ```
//! Both are fixed width, so coordinates with leading zero bytes keep them.
//! Neither layout carries a network byte; the network only enters through
//! the address version byte.

use crate::address;
use crate::base58check;
use crate::curve::{FIELD_SIZE, Point};
use crate::error::{Codec, KeyError, ParseReason, Result};
use crate::hash;
use crate::network::NetworkProfile;
use std::fmt;

/// Length of a compressed SEC key
pub const COMPRESSED_LEN: usize = 1 + FIELD_SIZE;

/// Length of an uncompressed SEC key
pub const UNCOMPRESSED_LEN: usize = 1 + 2 * FIELD_SIZE;

const UNCOMPRESSED_PREFIX: u8 = 0x04;
const EVEN_PREFIX: u8 = 0x02;
const ODD_PREFIX: u8 = 0x03;

/// secp256k1 public key bound to a network
///
/// Equality compares the point and the network, not the form it was parsed
/// from.
#[derive(Clone)]
pub struct PublicKey {
    point: Point,
    compressed: bool,
    network: NetworkProfile,
}

impl PublicKey {
    /// Parse a SEC key given as hex text (66 or 130 characters) or raw bytes (33 or 65)
    ///
    /// The key remembers which form it was parsed from.
    pub fn from_hex_key(key: impl AsRef<[u8]>, network: &NetworkProfile) -> Result<Self> {
        let key = key.as_ref();
        match key.len() {
            COMPRESSED_LEN | UNCOMPRESSED_LEN => Self::from_sec_bytes(key, network),
            len if len == 2 * COMPRESSED_LEN || len == 2 * UNCOMPRESSED_LEN => {
                let bytes = hex::decode(key).map_err(|e| {
                    KeyError::parse(Codec::PublicKeyHex, ParseReason::InvalidHex(e.to_string()))
                })?;
                Self::from_sec_bytes(&bytes, network)
            }
            actual => Err(KeyError::parse(
                Codec::PublicKeyHex,
                ParseReason::InvalidLength {
                    expected: "66/130 hex characters or 33/65 bytes",
                    actual,
                },
            )),
        }
    }

    fn from_sec_bytes(bytes: &[u8], network: &NetworkProfile) -> Result<Self> {
        let Some(&prefix) = bytes.first() else {
            return Err(KeyError::parse(Codec::PublicKeyHex, ParseReason::Empty));
        };

        let (point, compressed) = match prefix {
            UNCOMPRESSED_PREFIX => {
                check_sec_length(bytes, UNCOMPRESSED_LEN, "65 bytes for prefix 0x04")?;
                let (x, y) = bytes[1..].split_at(FIELD_SIZE);
                (Point::from_coordinates(&field(x), &field(y)), false)
            }
            EVEN_PREFIX | ODD_PREFIX => {
                check_sec_length(bytes, COMPRESSED_LEN, "33 bytes for prefix 0x02/0x03")?;
                let y_is_odd = prefix & 1 == 1;
                (Point::decompress(&field(&bytes[1..]), y_is_odd), true)
            }
            other => {
                return Err(KeyError::parse(
                    Codec::PublicKeyHex,
                    ParseReason::InvalidPrefix(other),
                ));
            }
        };

        let point =
            point.ok_or_else(|| KeyError::parse(Codec::PublicKeyHex, ParseReason::NotOnCurve))?;
        Ok(Self::from_curve_point(point, compressed, network))
    }

    /// Create an uncompressed key from big-endian affine coordinates
    pub fn from_point(
        x: &[u8; FIELD_SIZE],
        y: &[u8; FIELD_SIZE],
        network: &NetworkProfile,
    ) -> Result<Self> {
        let point = Point::from_coordinates(x, y)
            .ok_or_else(|| KeyError::parse(Codec::PublicKeyHex, ParseReason::NotOnCurve))?;
        Ok(Self::from_curve_point(point, false, network))
    }

    pub(crate) fn from_curve_point(point: Point, compressed: bool, network: &NetworkProfile) -> Self {
        Self {
            point,
            compressed,
            network: network.clone(),
        }
    }

    /// Copy of this key with the compression flag set to `compressed`
    #[must_use]
    pub fn with_compression(self, compressed: bool) -> Self {
        Self { compressed, ..self }
    }

    /// SEC bytes in the requested form: exactly 33 or 65 bytes
    #[must_use]
    pub fn to_bytes(&self, compressed: bool) -> Vec<u8> {
        self.point.to_sec1(compressed)
    }

    /// Hex SEC encoding in this key's own form
    #[must_use]
    pub fn get_key(&self) -> String {
        self.get_key_with(self.compressed)
    }

    /// Hex SEC encoding in the requested form
    #[must_use]
    pub fn get_key_with(&self, compressed: bool) -> String {
        hex::encode(self.to_bytes(compressed))
    }

    /// `x` coordinate, 32 bytes big-endian
    #[must_use]
    pub fn x(&self) -> [u8; FIELD_SIZE] {
        self.point.x()
    }

    /// `y` coordinate, 32 bytes big-endian
    #[must_use]
    pub fn y(&self) -> [u8; FIELD_SIZE] {
        self.point.y()
    }

    /// Whether this key serializes compressed by default
    #[must_use]
    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    /// Network this key is bound to
    #[must_use]
    pub fn network(&self) -> &NetworkProfile {
        &self.network
    }

    /// RIPEMD-160(SHA-256(SEC bytes)) in this key's form
    #[must_use]
    pub fn hash160(&self) -> [u8; address::HASH160_LEN] {
        hash::hash160(&self.to_bytes(self.compressed))
    }

    /// Base58Check address: `[public_key_prefix] ++ hash160`
    #[must_use]
    pub fn to_address(&self) -> String {
        let mut payload = Vec::with_capacity(address::ADDRESS_PAYLOAD_LEN);
        payload.push(self.network.public_key_prefix());
        payload.extend_from_slice(&self.hash160());
        base58check::encode(&payload)
    }

    /// Whether `address` (on this key's network) was derived from this key
    ///
    /// Fails with the address codec's error when `address` is malformed or
    /// belongs to another network.
    pub fn matches_address(&self, address: &str) -> Result<bool> {
        let hash = address::decode_address(address, &self.network)?;
        Ok(hash == self.hash160())
    }
}

fn check_sec_length(bytes: &[u8], expected_len: usize, expected: &'static str) -> Result<()> {
    if bytes.len() == expected_len {
        Ok(())
    } else {
        Err(KeyError::parse(
            Codec::PublicKeyHex,
            ParseReason::InvalidLength {
                expected,
                actual: bytes.len(),
            },
        ))
    }
}

fn field(bytes: &[u8]) -> [u8; FIELD_SIZE] {
    let mut out = [0u8; FIELD_SIZE];
    out.copy_from_slice(bytes);
    out
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.point == other.point && self.network == other.network
    }
}

impl Eq for PublicKey {}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublicKey")
            .field("key", &self.get_key())
            .field("network", &self.network.name())
            .finish()
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.get_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::network::{BITCOIN_MAINNET, BITCOIN_TESTNET};
    use crate::private_key::PrivateKey;

    // From https://en.bitcoin.it/wiki/Technical_background_of_version_1_Bitcoin_addresses
    const WIKI_PRIVATE_KEY: &str =
        "18e14a7b6a307f426a94f8114701e7c8e774e7f9a47e2c2035db29a206321725";
    const WIKI_PUBLIC_KEY: &str = "04\
        50863ad64a87ae8a2fe83c1af1a8403cb53f53e486d8511dad8a04887e5b2352\
        2cd470243453a299fa9e77237716103abc11a1df38855ed6f2ee187e9c582ba6";

    fn wiki_public_key() -> PublicKey {
        PublicKey::from_hex_key(WIKI_PUBLIC_KEY, &BITCOIN_MAINNET).unwrap()
    }

    #[test]
    fn test_leading_zeros() {
        // x coordinate starts with a zero byte
        let expected_key = "04\
            02cbfd5410fd04973c096a4275bf75070955ebd689f316a6fbd449980ba7b756\
            c559764e5c367c03e002751aaf4ef8ec40fe97cda9b2d3f14fdd4cd244e8fcd2";
        let public_key = PublicKey::from_hex_key(expected_key, &BITCOIN_MAINNET).unwrap();
        assert_eq!(public_key.get_key(), expected_key);
        assert_eq!(public_key.x()[0], 0x02);

        let compressed = public_key.get_key_with(true);
        assert_eq!(compressed.len(), 2 * COMPRESSED_LEN);
        assert_eq!(
            compressed,
            "0202cbfd5410fd04973c096a4275bf75070955ebd689f316a6fbd449980ba7b756"
        );
        let reparsed = PublicKey::from_hex_key(&compressed, &BITCOIN_MAINNET).unwrap();
        assert_eq!(reparsed, public_key);
        assert!(reparsed.is_compressed());
        assert_eq!(reparsed.get_key_with(false), expected_key);
    }

    #[test]
    fn test_address() {
        assert_eq!(wiki_public_key().to_address(), "16UwLL9Risc3QfPqBUvKofHmBQ7wMtjvM");
        assert_eq!(
            hex::encode(wiki_public_key().hash160()),
            "010966776006953d5567439e5e39f86a0d273bee"
        );
    }

    #[test]
    fn test_private_to_public() {
        let private_key = PrivateKey::from_hex_key(WIKI_PRIVATE_KEY, &BITCOIN_MAINNET).unwrap();
        assert_eq!(private_key.get_public_key(), wiki_public_key());
    }

    #[test]
    fn test_unhexlified_key() {
        let key_bytes = hex::decode(wiki_public_key().get_key()).unwrap();
        assert_eq!(
            PublicKey::from_hex_key(&key_bytes, &BITCOIN_MAINNET).unwrap(),
            wiki_public_key()
        );
    }

    #[test]
    fn test_bad_key() {
        let err = PublicKey::from_hex_key("badkey", &BITCOIN_MAINNET).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert_eq!(err.codec(), Codec::PublicKeyHex);
    }

    #[test]
    fn test_corrupted_prefix_is_parse_error() {
        let key = format!("00{}", &WIKI_PUBLIC_KEY[2..]);
        assert_eq!(
            PublicKey::from_hex_key(&key, &BITCOIN_MAINNET).unwrap_err(),
            KeyError::parse(Codec::PublicKeyHex, ParseReason::InvalidPrefix(0x00))
        );
    }

    #[test]
    fn test_prefix_length_mismatch() {
        // Compressed prefix on a 65-byte key
        let key = format!("02{}", &WIKI_PUBLIC_KEY[2..]);
        assert_eq!(
            PublicKey::from_hex_key(&key, &BITCOIN_MAINNET).unwrap_err(),
            KeyError::parse(
                Codec::PublicKeyHex,
                ParseReason::InvalidLength {
                    expected: "33 bytes for prefix 0x02/0x03",
                    actual: 65,
                }
            )
        );
    }

    #[test]
    fn test_point_not_on_curve() {
        let mut key = hex::decode(WIKI_PUBLIC_KEY).unwrap();
        key[64] ^= 0x01;
        assert_eq!(
            PublicKey::from_hex_key(&key, &BITCOIN_MAINNET).unwrap_err(),
            KeyError::parse(Codec::PublicKeyHex, ParseReason::NotOnCurve)
        );
    }

    #[test]
    fn test_from_point() {
        let key = wiki_public_key();
        let rebuilt = PublicKey::from_point(&key.x(), &key.y(), &BITCOIN_MAINNET).unwrap();
        assert_eq!(rebuilt, key);
    }

    #[test]
    fn test_equality_ignores_form_but_not_network() {
        let uncompressed = wiki_public_key();
        let compressed = uncompressed.clone().with_compression(true);
        assert_eq!(uncompressed, compressed);
        assert_ne!(uncompressed.to_address(), compressed.to_address());

        let testnet = PublicKey::from_hex_key(WIKI_PUBLIC_KEY, &BITCOIN_TESTNET).unwrap();
        assert_ne!(testnet, uncompressed);
    }

    #[test]
    fn test_matches_address() {
        let key = wiki_public_key();
        assert!(key.matches_address("16UwLL9Risc3QfPqBUvKofHmBQ7wMtjvM").unwrap());

        let compressed = key.with_compression(true);
        assert!(!compressed.matches_address("16UwLL9Risc3QfPqBUvKofHmBQ7wMtjvM").unwrap());
    }
}
