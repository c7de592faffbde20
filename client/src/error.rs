//! Error types for the SEP-6 client
//!
//! `Sep6Error` is what every public client operation returns. Webhook
//! verification has its own narrower `VerificationError` so the callback
//! layer can map each rejection to a response without string matching.

use thiserror::Error;

/// Result alias used across the crate
pub type Result<T, E = Sep6Error> = std::result::Result<T, E>;

/// Client error, tagged by kind and carrying the offending field
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Sep6Error {
    /// Bad caller input or a rejected callback
    #[error("validation error: {field} - {message}")]
    Validation { field: String, message: String },

    /// Network, HTTP status or decode failure while talking to the anchor
    #[error("fetch error: {field} - {message}")]
    Fetch { field: String, message: String },
}

impl Sep6Error {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn fetch(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fetch {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Name of the field the error refers to
    pub fn field(&self) -> &str {
        match self {
            Self::Validation { field, .. } | Self::Fetch { field, .. } => field,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch { .. })
    }
}

/// Why an inbound callback was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("signature header is malformed: {0}")]
    MalformedHeader(&'static str),

    #[error("request is not fresh: signed at {timestamp}, verifier time {now}, window {max_age_secs}s")]
    StaleSignature {
        timestamp: u64,
        now: u64,
        max_age_secs: u64,
    },

    #[error("signature verification failed")]
    SignatureMismatch,

    #[error("anchor signing key is invalid: {0}")]
    InvalidSigningKey(String),
}

impl VerificationError {
    /// Field name reported when the error is surfaced as a `Sep6Error`
    pub fn field(&self) -> &'static str {
        match self {
            Self::MalformedHeader(_) => "SignatureHeader",
            Self::StaleSignature { .. } => "Timestamp",
            Self::SignatureMismatch => "SignatureVerification",
            Self::InvalidSigningKey(_) => "SigningKey",
        }
    }

    /// Short tag used in logs and counters
    pub fn reason(&self) -> &'static str {
        match self {
            Self::MalformedHeader(_) => "malformed_header",
            Self::StaleSignature { .. } => "stale_signature",
            Self::SignatureMismatch => "signature_mismatch",
            Self::InvalidSigningKey(_) => "invalid_signing_key",
        }
    }
}

impl From<VerificationError> for Sep6Error {
    fn from(err: VerificationError) -> Self {
        Sep6Error::validation(err.field(), err.to_string())
    }
}

/// Failure to hand a verified update to the worker pool
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchError {
    #[error("dispatch queue is full")]
    QueueFull,

    #[error("dispatch pool is shut down")]
    Closed,
}
