//! ed25519 verification of the canonical payload

use ed25519_dalek::{Signature, Verifier};

use crate::error::VerificationError;
use crate::keys::parse_account_id;

/// Verify `signature` over `payload` with the anchor's `G...` signing key
pub fn verify_signature(
    payload: &[u8],
    signature: &[u8],
    signing_key: &str,
) -> Result<(), VerificationError> {
    let public_key = parse_account_id(signing_key).map_err(VerificationError::InvalidSigningKey)?;

    let signature =
        Signature::try_from(signature).map_err(|_| VerificationError::SignatureMismatch)?;

    public_key
        .verify(payload, &signature)
        .map_err(|_| VerificationError::SignatureMismatch)
}
