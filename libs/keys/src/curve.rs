//! secp256k1 capability consumed by the key codecs
//!
//! Thin wrapper over `k256`: scalar validation, multiplication by the
//! generator, SEC point parsing and fixed-width serialization. The curve
//! constants live inside `k256` and are never mutated here.

use k256::Secp256k1;
use k256::elliptic_curve::Curve;
use k256::elliptic_curve::bigint::ArrayEncoding;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use num_bigint::BigUint;
use std::fmt;

/// Byte width of a scalar and of each affine coordinate
pub const FIELD_SIZE: usize = 32;

/// Order `n` of the secp256k1 generator
#[must_use]
pub fn curve_order() -> BigUint {
    BigUint::from_bytes_be(&Secp256k1::ORDER.to_be_byte_array())
}

/// Secret scalar in `[1, n-1]`
///
/// The inner `k256` key is zeroized on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct Scalar(k256::SecretKey);

impl Scalar {
    /// Parse a big-endian scalar, `None` when it is zero or not below `n`
    #[must_use]
    pub fn from_be_bytes(bytes: &[u8; FIELD_SIZE]) -> Option<Self> {
        k256::SecretKey::from_slice(bytes).ok().map(Self)
    }

    /// Convert an integer, `None` when it is outside `[1, n-1]`
    #[must_use]
    pub fn from_biguint(value: &BigUint) -> Option<Self> {
        let bytes = value.to_bytes_be();
        if bytes.len() > FIELD_SIZE {
            return None;
        }
        let mut padded = [0u8; FIELD_SIZE];
        padded[FIELD_SIZE - bytes.len()..].copy_from_slice(&bytes);
        Self::from_be_bytes(&padded)
    }

    /// Fixed-width big-endian encoding
    #[must_use]
    pub fn to_be_bytes(&self) -> [u8; FIELD_SIZE] {
        let mut bytes = [0u8; FIELD_SIZE];
        bytes.copy_from_slice(&self.0.to_bytes());
        bytes
    }

    /// Value as an integer
    #[must_use]
    pub fn to_biguint(&self) -> BigUint {
        BigUint::from_bytes_be(&self.to_be_bytes())
    }
}

impl fmt::Debug for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Scalar(..)")
    }
}

/// Affine point on secp256k1, never the identity
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Point(k256::PublicKey);

impl Point {
    /// Parse SEC1 bytes (`02`/`03` compressed or `04` uncompressed)
    ///
    /// Returns `None` when the bytes do not describe a point on the curve.
    #[must_use]
    pub fn from_sec1(bytes: &[u8]) -> Option<Self> {
        k256::PublicKey::from_sec1_bytes(bytes).ok().map(Self)
    }

    /// Build a point from big-endian affine coordinates
    #[must_use]
    pub fn from_coordinates(x: &[u8; FIELD_SIZE], y: &[u8; FIELD_SIZE]) -> Option<Self> {
        let mut sec1 = [0u8; 1 + 2 * FIELD_SIZE];
        sec1[0] = 0x04;
        sec1[1..=FIELD_SIZE].copy_from_slice(x);
        sec1[1 + FIELD_SIZE..].copy_from_slice(y);
        Self::from_sec1(&sec1)
    }

    /// Recover `y` from `x` and its parity
    #[must_use]
    pub fn decompress(x: &[u8; FIELD_SIZE], y_is_odd: bool) -> Option<Self> {
        let mut sec1 = [0u8; 1 + FIELD_SIZE];
        sec1[0] = if y_is_odd { 0x03 } else { 0x02 };
        sec1[1..].copy_from_slice(x);
        Self::from_sec1(&sec1)
    }

    /// SEC1 encoding: 33 bytes compressed, 65 bytes uncompressed
    #[must_use]
    pub fn to_sec1(&self, compressed: bool) -> Vec<u8> {
        self.0.to_encoded_point(compressed).as_bytes().to_vec()
    }

    /// `x` coordinate, zero padded to 32 bytes
    #[must_use]
    pub fn x(&self) -> [u8; FIELD_SIZE] {
        let sec1 = self.to_sec1(false);
        let mut x = [0u8; FIELD_SIZE];
        x.copy_from_slice(&sec1[1..=FIELD_SIZE]);
        x
    }

    /// `y` coordinate, zero padded to 32 bytes
    #[must_use]
    pub fn y(&self) -> [u8; FIELD_SIZE] {
        let sec1 = self.to_sec1(false);
        let mut y = [0u8; FIELD_SIZE];
        y.copy_from_slice(&sec1[1 + FIELD_SIZE..]);
        y
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point({})", hex::encode(self.to_sec1(true)))
    }
}

/// Multiply the generator by `scalar`
#[must_use]
pub fn scalar_mul(scalar: &Scalar) -> Point {
    Point(scalar.0.public_key())
}
