//! Account-style keys
//!
//! Stellar encodes ed25519 keys as strkeys: a version byte (`G` for
//! account ids, `S` for secret seeds), the 32-byte key and a CRC16
//! checksum, all base32. These helpers bridge strkeys and ed25519-dalek.

use ed25519_dalek::{PublicKey, SecretKey};
use zeroize::Zeroize;

use crate::error::{Result, Sep6Error};

/// Decode a `G...` account id into an ed25519 verifying key
pub fn parse_account_id(account_id: &str) -> std::result::Result<PublicKey, String> {
    let strkey = stellar_strkey::ed25519::PublicKey::from_string(account_id)
        .map_err(|_| "not a valid account public key".to_string())?;

    PublicKey::from_bytes(&strkey.0).map_err(|e| format!("not an ed25519 point: {}", e))
}

/// Encode raw ed25519 public key bytes as a `G...` account id
pub fn encode_account_id(public_key: &[u8; 32]) -> String {
    stellar_strkey::ed25519::PublicKey(*public_key).to_string()
}

/// The wallet's identity, derived from its secret seed
///
/// Only the public address is kept; the seed is zeroized as soon as the
/// address is derived. Callbacks are verified against the anchor's key,
/// never this one.
#[derive(Debug, Clone)]
pub struct WalletKeys {
    address: String,
}

impl WalletKeys {
    /// Parse an `S...` secret seed
    pub fn from_secret_seed(secret_seed: &str) -> Result<Self> {
        let strkey = stellar_strkey::ed25519::PrivateKey::from_string(secret_seed)
            .map_err(|_| Sep6Error::validation("secretKey", "not a valid secret seed"))?;
        Self::from_seed_bytes(strkey.0)
    }

    /// Derive from raw seed bytes
    pub fn from_seed_bytes(mut seed: [u8; 32]) -> Result<Self> {
        let secret = SecretKey::from_bytes(&seed);
        seed.zeroize();
        let secret = secret.map_err(|e| Sep6Error::validation("secretKey", e.to_string()))?;
        let public = PublicKey::from(&secret);

        Ok(Self {
            address: encode_account_id(public.as_bytes()),
        })
    }

    /// The wallet's public `G...` address
    pub fn address(&self) -> &str {
        &self.address
    }
}
