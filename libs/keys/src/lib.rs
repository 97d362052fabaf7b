//! secp256k1 key and address codec
//!
//! Converts between raw private scalars, public curve points, Wallet Import
//! Format strings, SEC hex/byte encodings and Base58Check addresses, for any
//! network described by a [`NetworkProfile`].
//!
//! # Layers
//!
//! - `network`: immutable version-byte profiles
//! - `hash`, `base58check`: stateless encoding primitives
//! - `curve`: the secp256k1 capability (backed by `k256`)
//! - `private_key`, `public_key`, `address`: the key codecs
//!
//! Every operation is pure and every type is immutable, so keys can be shared
//! across threads freely.
//!
//! # Example Usage
//!
//! ```rust
//! use keycodec::{BITCOIN_MAINNET, PrivateKey};
//!
//! let key = PrivateKey::from_wif(
//!     "5HueCGU8rMjxEXxiPuD5BDku4MkFqeZyd4dZ1jvhTVqvbTLvyTJ",
//!     &BITCOIN_MAINNET,
//! )
//! .unwrap();
//! assert!(!key.is_compressed());
//!
//! let address = key.get_public_key().to_address();
//! assert!(address.starts_with('1'));
//! ```

#![warn(missing_docs)]

pub mod address;
pub mod base58check;
pub mod curve;
pub mod error;
pub mod hash;
pub mod network;
pub mod private_key;
pub mod public_key;

// Re-export commonly used types
pub use address::decode_address;
pub use error::{Codec, ConfigError, ErrorKind, KeyError, ParseReason, Result};
pub use network::{
    BITCOIN_MAINNET, BITCOIN_TESTNET, Curve, DOGECOIN_MAINNET, LITECOIN_MAINNET, NetworkProfile,
};
pub use private_key::PrivateKey;
pub use public_key::PublicKey;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
