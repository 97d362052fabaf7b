//! Network profiles: the version bytes that distinguish deployments
//!
//! A profile is chosen when a key is constructed and stays bound to it. The
//! surrounding application supplies profiles either as the built-in constants
//! below or as JSON configuration.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Elliptic curve a network's keys live on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Curve {
    /// SEC 2 curve secp256k1
    #[default]
    #[serde(rename = "secp256k1")]
    Secp256k1,
}

/// Immutable version-byte configuration for one network
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NetworkProfile {
    name: Cow<'static, str>,
    private_key_prefix: u8,
    public_key_prefix: u8,
    #[serde(default)]
    curve: Curve,
}

/// Bitcoin mainnet (`5…`/`K…`/`L…` WIF, `1…` addresses)
pub const BITCOIN_MAINNET: NetworkProfile = NetworkProfile::new("bitcoin", 0x80, 0x00);

/// Bitcoin testnet (`9…`/`c…` WIF, `m…`/`n…` addresses)
pub const BITCOIN_TESTNET: NetworkProfile = NetworkProfile::new("bitcoin-testnet", 0xef, 0x6f);

/// Litecoin mainnet
pub const LITECOIN_MAINNET: NetworkProfile = NetworkProfile::new("litecoin", 0xb0, 0x30);

/// Dogecoin mainnet
pub const DOGECOIN_MAINNET: NetworkProfile = NetworkProfile::new("dogecoin", 0x9e, 0x1e);

/// Built-in profiles, in lookup order
#[must_use]
pub fn builtin_profiles() -> [NetworkProfile; 4] {
    [
        BITCOIN_MAINNET,
        BITCOIN_TESTNET,
        LITECOIN_MAINNET,
        DOGECOIN_MAINNET,
    ]
}

impl NetworkProfile {
    /// Create a secp256k1 profile
    #[must_use]
    pub const fn new(name: &'static str, private_key_prefix: u8, public_key_prefix: u8) -> Self {
        Self {
            name: Cow::Borrowed(name),
            private_key_prefix,
            public_key_prefix,
            curve: Curve::Secp256k1,
        }
    }

    /// Look up a built-in profile by name
    pub fn builtin(name: &str) -> Result<Self, ConfigError> {
        builtin_profiles()
            .into_iter()
            .find(|profile| profile.name == name)
            .ok_or_else(|| ConfigError::UnknownNetwork(name.to_string()))
    }

    /// Load a profile from JSON supplied by the application
    ///
    /// ```json
    /// {"name": "bitcoin-regtest", "private_key_prefix": 239, "public_key_prefix": 111}
    /// ```
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let profile: Self = serde_json::from_str(json)?;
        log::debug!(
            "Loaded network profile {} (wif 0x{:02x}, address 0x{:02x})",
            profile.name,
            profile.private_key_prefix,
            profile.public_key_prefix
        );
        Ok(profile)
    }

    /// Network name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Version byte leading every WIF payload
    #[must_use]
    pub fn private_key_prefix(&self) -> u8 {
        self.private_key_prefix
    }

    /// Version byte leading every address payload
    #[must_use]
    pub fn public_key_prefix(&self) -> u8 {
        self.public_key_prefix
    }

    /// Curve identifier
    #[must_use]
    pub fn curve(&self) -> Curve {
        self.curve
    }
}

impl Default for NetworkProfile {
    fn default() -> Self {
        BITCOIN_MAINNET
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        let testnet = NetworkProfile::builtin("bitcoin-testnet").unwrap();
        assert_eq!(testnet, BITCOIN_TESTNET);
        assert_eq!(testnet.private_key_prefix(), 0xef);
        assert_eq!(testnet.public_key_prefix(), 0x6f);

        assert!(matches!(
            NetworkProfile::builtin("nope"),
            Err(ConfigError::UnknownNetwork(name)) if name == "nope"
        ));
    }

    #[test]
    fn test_from_json() {
        let json = r#"{"name": "bitcoin-regtest", "private_key_prefix": 239, "public_key_prefix": 111}"#;
        let profile = NetworkProfile::from_json(json).unwrap();
        assert_eq!(profile.name(), "bitcoin-regtest");
        assert_eq!(profile.private_key_prefix(), 0xef);
        assert_eq!(profile.public_key_prefix(), 0x6f);
        assert_eq!(profile.curve(), Curve::Secp256k1);
        // Same bytes, different name: a distinct profile
        assert_ne!(profile, BITCOIN_TESTNET);
    }

    #[test]
    fn test_from_json_rejects_unknown_curve() {
        let json = r#"{"name": "x", "private_key_prefix": 1, "public_key_prefix": 2, "curve": "ed25519"}"#;
        assert!(matches!(
            NetworkProfile::from_json(json),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_json_roundtrip() {
        let json = serde_json::to_string(&LITECOIN_MAINNET).unwrap();
        assert_eq!(NetworkProfile::from_json(&json).unwrap(), LITECOIN_MAINNET);
    }

    #[test]
    fn test_default_is_bitcoin_mainnet() {
        assert_eq!(NetworkProfile::default(), BITCOIN_MAINNET);
    }
}
