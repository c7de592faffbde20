//! Signature header parsing
//!
//! Anchors send `t=<unix-seconds>, s=<base64 signature>`. The two fields are
//! joined by `", "`, so the signature segment carries a leading space.

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::VerificationError;

/// Primary header carrying the callback signature
pub const SIGNATURE_HEADER: &str = "Signature";

/// Legacy header, consulted only when `Signature` is absent
pub const LEGACY_SIGNATURE_HEADER: &str = "X-Stellar-Signature";

const TIMESTAMP_PREFIX: &str = "t=";
const SIGNATURE_PREFIX: &str = " s=";

/// A parsed `t=..., s=...` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    /// Seconds since the Unix epoch
    pub timestamp: u64,
    /// Timestamp exactly as it appeared on the wire; this is what was signed
    pub timestamp_text: String,
    /// Decoded signature bytes
    pub signature: Vec<u8>,
}

impl SignatureHeader {
    /// Parse a raw header value
    ///
    /// Segments are matched by prefix only; nothing is trimmed, so a header
    /// formatted differently from the anchor convention is rejected.
    pub fn parse(raw: &str) -> Result<Self, VerificationError> {
        if raw.is_empty() {
            return Err(VerificationError::MalformedHeader("no signature header provided"));
        }

        let mut timestamp_text = None;
        let mut signature_text = None;
        for part in raw.split(',') {
            if let Some(t) = part.strip_prefix(TIMESTAMP_PREFIX) {
                timestamp_text = Some(t);
            }
            if let Some(s) = part.strip_prefix(SIGNATURE_PREFIX) {
                signature_text = Some(s);
            }
        }

        let (timestamp_text, signature_text) = match (timestamp_text, signature_text) {
            (Some(t), Some(s)) if !t.is_empty() && !s.is_empty() => (t, s),
            _ => return Err(VerificationError::MalformedHeader("missing t= or s= field")),
        };

        // str::parse::<u64> accepts a leading '+', the wire format does not
        if !timestamp_text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(VerificationError::MalformedHeader("timestamp is not an integer"));
        }
        let timestamp = timestamp_text
            .parse::<u64>()
            .map_err(|_| VerificationError::MalformedHeader("timestamp is not an integer"))?;

        let signature = STANDARD
            .decode(signature_text)
            .map_err(|_| VerificationError::MalformedHeader("signature is not valid base64"))?;

        Ok(Self {
            timestamp,
            timestamp_text: timestamp_text.to_string(),
            signature,
        })
    }
}

/// Pick the signature header value: `Signature` wins, `X-Stellar-Signature` is the fallback
///
/// Empty values count as absent.
pub fn select_signature_header<'a>(
    primary: Option<&'a str>,
    legacy: Option<&'a str>,
) -> Option<&'a str> {
    primary
        .filter(|v| !v.is_empty())
        .or_else(|| legacy.filter(|v| !v.is_empty()))
}
