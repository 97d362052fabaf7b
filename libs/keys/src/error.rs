//! Error taxonomy shared by every codec in the crate
//!
//! Each failure is one of three kinds: a checksum mismatch, a key minted for a
//! different network, or structurally malformed input. Every error records the
//! codec that detected it so callers can tell a corrupted WIF apart from a bad
//! public-key hex string without parsing messages.

use std::fmt;
use thiserror::Error;

/// Codec boundary at which an error was detected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Codec {
    /// Base58Check text layer (alphabet, length, checksum)
    Base58Check,
    /// Wallet Import Format envelope around a private scalar
    Wif,
    /// Hex or raw-byte private scalar
    PrivateKeyHex,
    /// Hex or raw-byte SEC public key
    PublicKeyHex,
    /// Base58Check address envelope around a hash160
    Address,
    /// Raw integer scalar
    Scalar,
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Base58Check => "base58check",
            Self::Wif => "wif",
            Self::PrivateKeyHex => "private key hex",
            Self::PublicKeyHex => "public key hex",
            Self::Address => "address",
            Self::Scalar => "scalar",
        };
        f.write_str(name)
    }
}

/// Why a structurally malformed input was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseReason {
    /// Input was empty
    #[error("input is empty")]
    Empty,

    /// Character outside the base-58 alphabet
    #[error("invalid character {character:?} at index {index}")]
    InvalidCharacter {
        /// Offending character
        character: char,
        /// Character index within the input
        index: usize,
    },

    /// Decoded data is shorter than the format allows
    #[error("too short: need at least {min} bytes, got {actual}")]
    TooShort {
        /// Minimum acceptable length in bytes
        min: usize,
        /// Actual length in bytes
        actual: usize,
    },

    /// Length does not match any accepted encoding
    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Human-readable description of the accepted lengths
        expected: &'static str,
        /// Actual length
        actual: usize,
    },

    /// Text is not valid hexadecimal
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Leading SEC byte is not 0x02, 0x03 or 0x04
    #[error("invalid prefix byte 0x{0:02x}")]
    InvalidPrefix(u8),

    /// 34-byte WIF payload whose trailing byte is not 0x01
    #[error("invalid compression flag 0x{0:02x}")]
    InvalidCompressionFlag(u8),

    /// Scalar is zero or not below the curve order
    #[error("scalar outside [1, n-1]")]
    ScalarOutOfRange,

    /// Coordinates do not describe a point on the curve
    #[error("point is not on the curve")]
    NotOnCurve,
}

/// Key codec errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    /// Base58Check checksum did not match the recomputed value
    #[error("{codec}: checksum mismatch (expected {}, found {})", hex::encode(.expected), hex::encode(.found))]
    Checksum {
        /// Codec that verified the checksum
        codec: Codec,
        /// Checksum recomputed over the payload
        expected: [u8; 4],
        /// Checksum carried by the input
        found: [u8; 4],
    },

    /// Payload is intact but carries another network's version byte
    #[error("{codec}: incompatible network (expected version 0x{expected:02x}, found 0x{found:02x})")]
    IncompatibleNetwork {
        /// Codec that read the version byte
        codec: Codec,
        /// Version byte of the network the caller asked for
        expected: u8,
        /// Version byte found in the payload
        found: u8,
    },

    /// Structurally malformed input
    #[error("{codec}: {reason}")]
    Parse {
        /// Codec that rejected the input
        codec: Codec,
        /// Failed check
        reason: ParseReason,
    },
}

/// Bare error kind, for callers that only branch on the category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`KeyError::Checksum`]
    Checksum,
    /// See [`KeyError::IncompatibleNetwork`]
    IncompatibleNetwork,
    /// See [`KeyError::Parse`]
    Parse,
}

impl KeyError {
    pub(crate) fn parse(codec: Codec, reason: ParseReason) -> Self {
        Self::Parse { codec, reason }
    }

    /// Category of this error
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Checksum { .. } => ErrorKind::Checksum,
            Self::IncompatibleNetwork { .. } => ErrorKind::IncompatibleNetwork,
            Self::Parse { .. } => ErrorKind::Parse,
        }
    }

    /// Codec that detected this error
    #[must_use]
    pub fn codec(&self) -> Codec {
        match self {
            Self::Checksum { codec, .. }
            | Self::IncompatibleNetwork { codec, .. }
            | Self::Parse { codec, .. } => *codec,
        }
    }
}

/// Result type for key codec operations
pub type Result<T> = std::result::Result<T, KeyError>;

/// Errors raised while loading network profiles from configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Profile JSON could not be parsed
    #[error("Invalid network profile JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// No built-in profile has this name
    #[error("Unknown network: {0}")]
    UnknownNetwork(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_codec() {
        let err = KeyError::IncompatibleNetwork {
            codec: Codec::Wif,
            expected: 0xef,
            found: 0x80,
        };
        assert_eq!(err.kind(), ErrorKind::IncompatibleNetwork);
        assert_eq!(err.codec(), Codec::Wif);

        let err = KeyError::parse(Codec::PublicKeyHex, ParseReason::InvalidPrefix(0x00));
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert_eq!(err.codec(), Codec::PublicKeyHex);
    }

    #[test]
    fn test_messages_name_codec_and_check() {
        let err = KeyError::Checksum {
            codec: Codec::Base58Check,
            expected: [0xde, 0xad, 0xbe, 0xef],
            found: [0xff; 4],
        };
        assert_eq!(
            err.to_string(),
            "base58check: checksum mismatch (expected deadbeef, found ffffffff)"
        );

        let err = KeyError::parse(
            Codec::Wif,
            ParseReason::InvalidLength {
                expected: "33 or 34 bytes",
                actual: 12,
            },
        );
        assert_eq!(
            err.to_string(),
            "wif: invalid length: expected 33 or 34 bytes, got 12"
        );
    }
}
