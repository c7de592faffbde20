//! Shared fixtures: a deterministic anchor signer and wallet seed

use base64::{engine::general_purpose::STANDARD, Engine};
use ed25519_dalek::{Keypair, PublicKey, SecretKey, Signer};

use crate::keys::encode_account_id;
use crate::webhook::canonical_payload;

pub const HOME_DOMAIN: &str = "wallet.example.com";
pub const ANCHOR_SEED: [u8; 32] = [0x11; 32];
pub const OTHER_SEED: [u8; 32] = [0x33; 32];
pub const WALLET_SEED: [u8; 32] = [0x22; 32];

/// Signs callbacks the way an anchor does
pub struct TestAnchor {
    keypair: Keypair,
}

impl TestAnchor {
    pub fn new() -> Self {
        Self::from_seed(ANCHOR_SEED)
    }

    pub fn from_seed(seed: [u8; 32]) -> Self {
        let secret = SecretKey::from_bytes(&seed).expect("32-byte seed");
        let public = PublicKey::from(&secret);
        Self {
            keypair: Keypair { secret, public },
        }
    }

    /// The anchor's `G...` signing key
    pub fn account_id(&self) -> String {
        encode_account_id(self.keypair.public.as_bytes())
    }

    pub fn sign(&self, timestamp: &str, home_domain: &str, body: &[u8]) -> Vec<u8> {
        let payload = canonical_payload(timestamp, home_domain, body);
        self.keypair.sign(&payload).to_bytes().to_vec()
    }

    /// A complete `t=..., s=...` header for `body`
    pub fn header(&self, timestamp: u64, home_domain: &str, body: &[u8]) -> String {
        let signature = self.sign(&timestamp.to_string(), home_domain, body);
        format_header(&timestamp.to_string(), &signature)
    }
}

pub fn format_header(timestamp: &str, signature: &[u8]) -> String {
    format!("t={}, s={}", timestamp, STANDARD.encode(signature))
}

/// `S...` seed for the wallet
pub fn wallet_secret_seed() -> String {
    stellar_strkey::ed25519::PrivateKey(WALLET_SEED).to_string()
}
