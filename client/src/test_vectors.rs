//! Callback verification test vectors
//!
//! Known-answer checks against RFC 8032 (Ed25519 test 2) and a fixed
//! anchor callback, so the canonical payload layout and key decoding
//! cannot drift silently.
//!
//! Reference: RFC 8032 section 7.1

#[cfg(test)]
mod callback_test_vectors {
    use std::sync::Arc;

    use ed25519_dalek::{PublicKey, SecretKey};

    use crate::error::VerificationError;
    use crate::keys::{encode_account_id, WalletKeys};
    use crate::test_support::{TestAnchor, HOME_DOMAIN};
    use crate::webhook::{
        canonical_payload, verify_signature, FixedClock, FreshnessPolicy, WebhookVerifier,
    };

    const RFC8032_SECRET: &str = "4ccd089b28ff96da9db6c346ec114e0f5b8a319f35aba624da8cf6ed4fb8a6fb";
    const RFC8032_PUBLIC: &str = "3d4017c3e843895a92b70aa74d1b7ebc9c982ccf2ec4968cc0cd55f12af4660c";
    const RFC8032_MESSAGE: &[u8] = &[0x72];
    const RFC8032_SIGNATURE: &str = "92a009a9f0d4cab8720e820b5f642540a2b27b5416503f8fb3762223ebdb69da\
                                     085ac1e43e15996e458f3613d0f11d8c387b2eaeb4302aeeb00d291612bb0c00";

    fn decode_32(hex_str: &str) -> [u8; 32] {
        let bytes = hex::decode(hex_str).expect("valid hex");
        let mut out = [0u8; 32];
        out.copy_from_slice(&bytes);
        out
    }

    /// Test Vector 1: RFC 8032 key pair survives strkey encoding
    #[test]
    fn test_vector_1_rfc8032_key_derivation() {
        let secret = SecretKey::from_bytes(&decode_32(RFC8032_SECRET)).unwrap();
        let public = PublicKey::from(&secret);
        assert_eq!(public.to_bytes(), decode_32(RFC8032_PUBLIC));

        let wallet = WalletKeys::from_seed_bytes(decode_32(RFC8032_SECRET)).unwrap();
        assert_eq!(wallet.address(), encode_account_id(&decode_32(RFC8032_PUBLIC)));
    }

    /// Test Vector 2: RFC 8032 signature verifies through an account id
    #[test]
    fn test_vector_2_rfc8032_signature() {
        let account_id = encode_account_id(&decode_32(RFC8032_PUBLIC));
        let signature = hex::decode(RFC8032_SIGNATURE).unwrap();

        assert_eq!(signature.len(), 64);
        assert!(verify_signature(RFC8032_MESSAGE, &signature, &account_id).is_ok());
        assert_eq!(
            verify_signature(&[0x73], &signature, &account_id),
            Err(VerificationError::SignatureMismatch)
        );
    }

    /// Test Vector 3: canonical payload of a fixed callback
    #[test]
    fn test_vector_3_canonical_payload() {
        let payload = canonical_payload("1700000000", "wallet.example.com", br#"{"id":"abc"}"#);
        assert_eq!(
            String::from_utf8(payload).unwrap(),
            r#"1700000000.wallet.example.com.{"id":"abc"}"#
        );
    }

    /// Test Vector 4: fixed callback accepted at t+30s, stale at t+10min
    #[test]
    fn test_vector_4_fixed_callback_freshness() {
        let anchor = TestAnchor::new();
        let body = br#"{"id":"abc"}"#;
        let header = anchor.header(1_700_000_000, HOME_DOMAIN, body);

        let fresh = WebhookVerifier::new(anchor.account_id(), HOME_DOMAIN)
            .with_freshness(FreshnessPolicy::from_minutes(2))
            .with_clock(Arc::new(FixedClock(1_700_000_030)));
        assert!(fresh.verify(&header, body).is_ok());

        let late = WebhookVerifier::new(anchor.account_id(), HOME_DOMAIN)
            .with_freshness(FreshnessPolicy::from_minutes(2))
            .with_clock(Arc::new(FixedClock(1_700_000_600)));
        assert!(matches!(
            late.verify(&header, body),
            Err(VerificationError::StaleSignature {
                timestamp: 1_700_000_000,
                now: 1_700_000_600,
                max_age_secs: 120,
            })
        ));
    }

    /// Test Vector 5: signing is deterministic for a fixed key and payload
    #[test]
    fn test_vector_5_deterministic_signature() {
        let anchor = TestAnchor::new();
        let first = anchor.sign("1700000000", HOME_DOMAIN, br#"{"id":"abc"}"#);
        let second = anchor.sign("1700000000", HOME_DOMAIN, br#"{"id":"abc"}"#);
        assert_eq!(first, second, "Ed25519 signatures must be deterministic");
    }
}
