//! Authenticity checks for anchor status callbacks
//!
//! A callback is trusted only when its signature header parses, its
//! timestamp is inside the freshness window, and the anchor's signing key
//! verifies a signature over `timestamp.home_domain.body`.

pub mod canonical;
pub mod freshness;
pub mod header;
pub mod signature;

use std::sync::Arc;

use crate::error::VerificationError;

pub use canonical::canonical_payload;
pub use freshness::{FreshnessPolicy, DEFAULT_MAX_AGE_MINUTES};
pub use header::{
    select_signature_header, SignatureHeader, LEGACY_SIGNATURE_HEADER, SIGNATURE_HEADER,
};
pub use signature::verify_signature;

/// Source of the verifier's current time
pub trait Clock: Send + Sync {
    /// Seconds since the Unix epoch
    fn now(&self) -> u64;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

/// A clock stuck at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now(&self) -> u64 {
        self.0
    }
}

/// Immutable verification context for one anchor/wallet pair
#[derive(Clone)]
pub struct WebhookVerifier {
    signing_key: String,
    home_domain: String,
    freshness: FreshnessPolicy,
    clock: Arc<dyn Clock>,
}

impl WebhookVerifier {
    /// `signing_key` is the anchor's `G...` key from its `stellar.toml`;
    /// `home_domain` is this wallet's host, as the anchor signs it
    pub fn new(signing_key: impl Into<String>, home_domain: impl Into<String>) -> Self {
        Self {
            signing_key: signing_key.into(),
            home_domain: home_domain.into(),
            freshness: FreshnessPolicy::default(),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_freshness(mut self, freshness: FreshnessPolicy) -> Self {
        self.freshness = freshness;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn signing_key(&self) -> &str {
        &self.signing_key
    }

    pub fn home_domain(&self) -> &str {
        &self.home_domain
    }

    pub fn freshness(&self) -> FreshnessPolicy {
        self.freshness
    }

    /// Run every check on a raw header value and the raw request body
    ///
    /// Header and freshness problems are reported before any signature work.
    pub fn verify(&self, header: &str, body: &[u8]) -> Result<SignatureHeader, VerificationError> {
        let parsed = SignatureHeader::parse(header)?;

        self.freshness.check(parsed.timestamp, self.clock.now())?;

        let payload = canonical_payload(&parsed.timestamp_text, &self.home_domain, body);
        verify_signature(&payload, &parsed.signature, &self.signing_key)?;

        Ok(parsed)
    }
}

impl std::fmt::Debug for WebhookVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookVerifier")
            .field("signing_key", &self.signing_key)
            .field("home_domain", &self.home_domain)
            .field("freshness", &self.freshness)
            .finish()
    }
}
