//! Unit tests for the SEP-6 client
//!
//! Tests cover:
//! - Signature header parsing and header selection
//! - Freshness window boundaries
//! - Canonical payload layout and signature verification
//! - Wallet keys, input validation and `stellar.toml` parsing
//! - Response decoding and error mapping

#[cfg(test)]
mod header_tests {
    use crate::error::VerificationError;
    use crate::webhook::{select_signature_header, SignatureHeader};

    fn is_malformed(result: Result<SignatureHeader, VerificationError>) -> bool {
        matches!(result, Err(VerificationError::MalformedHeader(_)))
    }

    #[test]
    fn test_parse_valid_header() {
        let header = SignatureHeader::parse("t=1700000000, s=AAEC").unwrap();

        assert_eq!(header.timestamp, 1_700_000_000);
        assert_eq!(header.timestamp_text, "1700000000");
        assert_eq!(header.signature, vec![0x00, 0x01, 0x02]);
    }

    #[test]
    fn test_parse_fields_in_any_order() {
        // The leading space still belongs to the s= segment
        let header = SignatureHeader::parse("x=1, s=AAEC,t=42").unwrap();
        assert_eq!(header.timestamp, 42);
        assert_eq!(header.signature, vec![0x00, 0x01, 0x02]);
    }

    #[test]
    fn test_missing_fields_rejected() {
        assert!(is_malformed(SignatureHeader::parse("")));
        assert!(is_malformed(SignatureHeader::parse("t=1700000000")));
        assert!(is_malformed(SignatureHeader::parse(" s=AAEC")));
        assert!(is_malformed(SignatureHeader::parse("t=, s=AAEC")));
        assert!(is_malformed(SignatureHeader::parse("t=1700000000, s=")));
    }

    #[test]
    fn test_signature_without_leading_space_rejected() {
        assert!(is_malformed(SignatureHeader::parse("t=1700000000,s=AAEC")));
    }

    #[test]
    fn test_timestamp_with_whitespace_rejected() {
        assert!(is_malformed(SignatureHeader::parse(" t=1700000000, s=AAEC")));
        assert!(is_malformed(SignatureHeader::parse("t=1700000000 , s=AAEC")));
    }

    #[test]
    fn test_non_integer_timestamp_rejected() {
        assert!(is_malformed(SignatureHeader::parse("t=abc, s=AAEC")));
        assert!(is_malformed(SignatureHeader::parse("t=-5, s=AAEC")));
        assert!(is_malformed(SignatureHeader::parse("t=+5, s=AAEC")));
        assert!(is_malformed(SignatureHeader::parse("t=1.5, s=AAEC")));
        assert!(is_malformed(SignatureHeader::parse(
            "t=99999999999999999999999, s=AAEC"
        )));
    }

    #[test]
    fn test_invalid_base64_rejected() {
        assert!(is_malformed(SignatureHeader::parse("t=1700000000, s=***")));
        assert!(is_malformed(SignatureHeader::parse("t=1700000000, s=AAE")));
    }

    #[test]
    fn test_primary_header_wins() {
        assert_eq!(select_signature_header(Some("a"), Some("b")), Some("a"));
        assert_eq!(select_signature_header(None, Some("b")), Some("b"));
        assert_eq!(select_signature_header(Some(""), Some("b")), Some("b"));
        assert_eq!(select_signature_header(Some(""), Some("")), None);
        assert_eq!(select_signature_header(None, None), None);
    }
}

#[cfg(test)]
mod freshness_tests {
    use crate::error::VerificationError;
    use crate::webhook::FreshnessPolicy;

    const NOW: u64 = 1_700_000_000;

    #[test]
    fn test_default_window_is_two_minutes() {
        assert_eq!(FreshnessPolicy::default().max_age().as_secs(), 120);
    }

    #[test]
    fn test_window_boundaries() {
        let policy = FreshnessPolicy::from_minutes(2);

        assert!(policy.check(NOW, NOW).is_ok());
        assert!(policy.check(NOW - 120, NOW).is_ok());
        assert_eq!(
            policy.check(NOW - 121, NOW),
            Err(VerificationError::StaleSignature {
                timestamp: NOW - 121,
                now: NOW,
                max_age_secs: 120,
            })
        );
    }

    #[test]
    fn test_future_timestamp_rejected() {
        let policy = FreshnessPolicy::from_minutes(2);

        assert!(matches!(
            policy.check(NOW + 1, NOW),
            Err(VerificationError::StaleSignature { .. })
        ));
        assert!(policy.check(NOW + 3600, NOW).is_err());
    }

    #[test]
    fn test_zero_window_only_accepts_now() {
        let policy = FreshnessPolicy::from_minutes(0);
        assert!(policy.check(NOW, NOW).is_ok());
        assert!(policy.check(NOW - 1, NOW).is_err());
    }
}

#[cfg(test)]
mod verification_tests {
    use std::sync::Arc;

    use crate::error::VerificationError;
    use crate::test_support::{format_header, TestAnchor, HOME_DOMAIN, OTHER_SEED};
    use crate::webhook::{canonical_payload, verify_signature, FixedClock, WebhookVerifier};

    const NOW: u64 = 1_700_000_000;

    fn verifier(anchor: &TestAnchor) -> WebhookVerifier {
        WebhookVerifier::new(anchor.account_id(), HOME_DOMAIN).with_clock(Arc::new(FixedClock(NOW)))
    }

    #[test]
    fn test_canonical_payload_layout() {
        let payload = canonical_payload("1700000000", HOME_DOMAIN, br#"{"id":"abc"}"#);
        assert_eq!(payload, br#"1700000000.wallet.example.com.{"id":"abc"}"#.to_vec());
    }

    #[test]
    fn test_canonical_payload_keeps_body_bytes() {
        let body = b"{ \"b\":1,\n  \"a\":2 }";
        let payload = canonical_payload("1", "d", body);
        assert!(payload.ends_with(body));
        assert_eq!(&payload[..4], b"1.d.");
    }

    #[test]
    fn test_valid_signature_accepted() {
        let anchor = TestAnchor::new();
        let body = br#"{"transaction":{"id":"abc"}}"#;
        let header = anchor.header(NOW, HOME_DOMAIN, body);

        let parsed = verifier(&anchor).verify(&header, body).unwrap();
        assert_eq!(parsed.timestamp, NOW);
    }

    #[test]
    fn test_other_key_rejected() {
        let anchor = TestAnchor::new();
        let impostor = TestAnchor::from_seed(OTHER_SEED);
        let body = b"{}";
        let header = impostor.header(NOW, HOME_DOMAIN, body);

        assert_eq!(
            verifier(&anchor).verify(&header, body),
            Err(VerificationError::SignatureMismatch)
        );
    }

    #[test]
    fn test_truncated_signature_rejected() {
        let anchor = TestAnchor::new();
        let body = b"{}";
        let signature = anchor.sign(&NOW.to_string(), HOME_DOMAIN, body);
        let header = format_header(&NOW.to_string(), &signature[..63]);

        assert_eq!(
            verifier(&anchor).verify(&header, body),
            Err(VerificationError::SignatureMismatch)
        );
    }

    #[test]
    fn test_invalid_signing_key_reported() {
        let anchor = TestAnchor::new();
        let payload = canonical_payload("1", HOME_DOMAIN, b"{}");
        let signature = anchor.sign("1", HOME_DOMAIN, b"{}");

        assert!(matches!(
            verify_signature(&payload, &signature, "GNOTAKEY"),
            Err(VerificationError::InvalidSigningKey(_))
        ));
    }

    #[test]
    fn test_malformed_header_checked_before_freshness() {
        let anchor = TestAnchor::new();
        let result = verifier(&anchor).verify("t=1, s=***", b"{}");
        assert!(matches!(result, Err(VerificationError::MalformedHeader(_))));
    }

    #[test]
    fn test_stale_checked_before_signature() {
        let anchor = TestAnchor::new();
        // Garbage signature but an old timestamp: freshness fails first
        let header = format_header(&(NOW - 600).to_string(), &[0u8; 64]);

        assert!(matches!(
            verifier(&anchor).verify(&header, b"{}"),
            Err(VerificationError::StaleSignature { .. })
        ));
    }
}

#[cfg(test)]
mod key_tests {
    use ed25519_dalek::{PublicKey, SecretKey};

    use crate::keys::{encode_account_id, parse_account_id, WalletKeys};
    use crate::test_support::{wallet_secret_seed, TestAnchor, WALLET_SEED};

    #[test]
    fn test_wallet_address_derivation() {
        let keys = WalletKeys::from_secret_seed(&wallet_secret_seed()).unwrap();

        let secret = SecretKey::from_bytes(&WALLET_SEED).unwrap();
        let expected = encode_account_id(PublicKey::from(&secret).as_bytes());

        assert_eq!(keys.address(), expected);
        assert!(keys.address().starts_with('G'));
        assert_eq!(keys.address().len(), 56);
    }

    #[test]
    fn test_invalid_secret_seed_rejected() {
        let err = WalletKeys::from_secret_seed("SNOTAREALSEED").unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.field(), "secretKey");

        // An account id is not a secret seed
        let account = TestAnchor::new().account_id();
        assert!(WalletKeys::from_secret_seed(&account).is_err());
    }

    #[test]
    fn test_account_id_roundtrip() {
        let anchor = TestAnchor::new();
        let public = parse_account_id(&anchor.account_id()).unwrap();
        assert_eq!(encode_account_id(public.as_bytes()), anchor.account_id());
    }

    #[test]
    fn test_secret_seed_is_not_an_account_id() {
        assert!(parse_account_id(&wallet_secret_seed()).is_err());
        assert!(parse_account_id("").is_err());
    }

    #[test]
    fn test_only_address_retained() {
        let keys = WalletKeys::from_secret_seed(&wallet_secret_seed()).unwrap();
        let printed = format!("{:?}", keys);

        assert_eq!(printed, format!("WalletKeys {{ address: {:?} }}", keys.address()));
        assert!(!printed.contains(&wallet_secret_seed()));
        assert_eq!(
            WalletKeys::from_seed_bytes(WALLET_SEED).unwrap().address(),
            keys.address()
        );
    }
}

#[cfg(test)]
mod validation_tests {
    use crate::validation::{
        normalize_base_url, normalize_route_path, validate_amount, validate_not_empty,
    };

    #[test]
    fn test_first_empty_field_reported() {
        assert!(validate_not_empty(&[("a", "x"), ("b", "y")]).is_ok());

        let err = validate_not_empty(&[("a", "x"), ("b", ""), ("c", "")]).unwrap_err();
        assert_eq!(err.field(), "b");
        assert_eq!(err.to_string(), "validation error: b - cannot be empty");
    }

    #[test]
    fn test_amount_must_be_positive() {
        assert!(validate_amount(0.0001).is_ok());
        assert!(validate_amount(0.0).is_err());
        assert!(validate_amount(-1.0).is_err());
        assert!(validate_amount(f32::NAN).is_err());
        assert_eq!(validate_amount(0.0).unwrap_err().field(), "amount");
    }

    #[test]
    fn test_base_url_trailing_slash_removed() {
        assert_eq!(
            normalize_base_url("anchorUrl", "https://anchor.example.com/sep6/").unwrap(),
            "https://anchor.example.com/sep6"
        );
        assert_eq!(
            normalize_base_url("anchorUrl", "https://anchor.example.com").unwrap(),
            "https://anchor.example.com"
        );
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let err = normalize_base_url("horizonServer", "not a url").unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.field(), "horizonServer");

        assert!(normalize_base_url("anchorUrl", "ftp://anchor.example.com").is_err());
        assert!(normalize_base_url("anchorUrl", "").is_err());
    }

    #[test]
    fn test_route_path_normalized() {
        assert_eq!(normalize_route_path("webhook").unwrap(), "/webhook");
        assert_eq!(normalize_route_path("/webhook").unwrap(), "/webhook");
        assert_eq!(normalize_route_path("//webhook").unwrap(), "/webhook");
        assert!(normalize_route_path("/").is_err());
        assert!(normalize_route_path("").is_err());
    }
}

#[cfg(test)]
mod discovery_tests {
    use crate::discovery::parse_signing_key;

    #[test]
    fn test_signing_key_extracted() {
        let document = r#"
NETWORK_PASSPHRASE = "Public Global Stellar Network ; September 2015"
SIGNING_KEY = "GBWMCCC3NHSKLAOJDBKKYW7SSH2PFTTNVFKWSGLWGDLEBKLOVP5JLBBP"
TRANSFER_SERVER = "https://anchor.example.com/sep6"

[DOCUMENTATION]
ORG_NAME = "Example Anchor"

[[CURRENCIES]]
code = "USDC"
"#;
        assert_eq!(
            parse_signing_key(document).unwrap(),
            "GBWMCCC3NHSKLAOJDBKKYW7SSH2PFTTNVFKWSGLWGDLEBKLOVP5JLBBP"
        );
    }

    #[test]
    fn test_missing_signing_key() {
        let err = parse_signing_key("TRANSFER_SERVER = \"https://a\"\n").unwrap_err();
        assert!(err.is_fetch());
        assert_eq!(err.field(), "SIGNING_KEY");

        assert!(parse_signing_key("SIGNING_KEY = \"\"\n").is_err());
    }

    #[test]
    fn test_invalid_toml() {
        let err = parse_signing_key("SIGNING_KEY = ").unwrap_err();
        assert_eq!(err.field(), "TOML Decode");
    }
}

#[cfg(test)]
mod type_tests {
    use crate::types::{DepositResponse, InfoResponse, Order, TransactionResponse};

    #[test]
    fn test_transaction_envelope_decoding() {
        let json = r#"{
            "transaction": {
                "id": "82fhs729f63dh0v4",
                "kind": "deposit",
                "status": "completed",
                "amount_in": "510",
                "amount_out": "490",
                "amount_fee": "5",
                "started_at": "2017-03-20T17:05:32Z",
                "completed_at": "2017-03-20T17:09:58Z",
                "stellar_transaction_id": "17a670bc424ff5ce3b386dbfaae9990b66a2a37b4fbe51547e8794962a3f9e6a",
                "external_transaction_id": "1941491",
                "unknown_field": true
            }
        }"#;

        let tx = serde_json::from_str::<TransactionResponse>(json).unwrap().transaction;
        assert_eq!(tx.id, "82fhs729f63dh0v4");
        assert_eq!(tx.status, "completed");
        assert_eq!(tx.amount_out.as_deref(), Some("490"));
        assert_eq!(tx.external_transaction_id.as_deref(), Some("1941491"));
        assert!(tx.more_info_url.is_none());
    }

    #[test]
    fn test_envelope_missing_fields_default() {
        let tx = serde_json::from_str::<TransactionResponse>(r#"{"id":"abc"}"#)
            .unwrap()
            .transaction;
        assert_eq!(tx, Default::default());
    }

    #[test]
    fn test_envelope_type_mismatch_fails() {
        assert!(serde_json::from_str::<TransactionResponse>(r#"{"transaction": 5}"#).is_err());
        assert!(serde_json::from_str::<TransactionResponse>("[1,2]").is_err());
        assert!(serde_json::from_str::<TransactionResponse>("not json").is_err());
    }

    #[test]
    fn test_info_decoding() {
        let json = r#"{
            "deposit": {
                "USDC": {"enabled": true, "min_amount": 0.1, "max_amount": 1000, "authentication_required": false}
            },
            "withdraw": {
                "USDC": {
                    "enabled": true,
                    "fee_fixed": 1.5,
                    "types": {"bank_account": {"fields": {"dest": {"description": "IBAN", "optional": false}}}}
                }
            },
            "deposit-exchange": {"enabled": false},
            "fee": {"enabled": true, "authentication_required": true},
            "features": {"account_creation": true, "claimable_balances": true}
        }"#;

        let info: InfoResponse = serde_json::from_str(json).unwrap();
        assert!(info.deposit["USDC"].enabled);
        assert_eq!(info.deposit["USDC"].max_amount, 1000.0);
        assert_eq!(info.withdraw["USDC"].asset.fee_fixed, Some(1.5));
        assert_eq!(
            info.withdraw["USDC"].types["bank_account"].fields["dest"].description,
            "IBAN"
        );
        assert!(!info.deposit_exchange.enabled);
        assert!(info.fee.authentication_required);
        assert!(info.features.claimable_balances);
        assert!(!info.transactions.enabled);
    }

    #[test]
    fn test_deposit_decoding() {
        let json = r#"{
            "how": "Make a payment to Bank: 121122676 Account: 13719713158835300",
            "id": "9421871e-0623-4356-b7b5-5996da122f3e",
            "eta": 3600,
            "fee_fixed": "0.5",
            "instructions": {"bank_number": {"value": "121122676", "description": "US bank routing number"}},
            "extra_info": {"message": "Deposit must come from your own account"}
        }"#;

        let deposit: DepositResponse = serde_json::from_str(json).unwrap();
        assert_eq!(deposit.eta, Some(3600));
        assert_eq!(deposit.instructions["bank_number"].value, "121122676");
        assert!(deposit.extra_info.is_some());
        assert!(deposit.min_amount.is_none());
    }

    #[test]
    fn test_order_parsing() {
        assert_eq!("asc".parse::<Order>().unwrap(), Order::Asc);
        assert_eq!("desc".parse::<Order>().unwrap(), Order::Desc);
        assert!("newest".parse::<Order>().is_err());
        assert_eq!(Order::Desc.as_str(), "desc");
    }
}

#[cfg(test)]
mod error_tests {
    use crate::error::{Sep6Error, VerificationError};

    #[test]
    fn test_verification_error_maps_to_validation() {
        let err: Sep6Error = VerificationError::SignatureMismatch.into();
        assert!(err.is_validation());
        assert_eq!(err.field(), "SignatureVerification");

        let err: Sep6Error = VerificationError::MalformedHeader("missing t= or s= field").into();
        assert_eq!(err.field(), "SignatureHeader");
        assert_eq!(
            err.to_string(),
            "validation error: SignatureHeader - signature header is malformed: missing t= or s= field"
        );

        let err: Sep6Error = VerificationError::StaleSignature {
            timestamp: 1,
            now: 1000,
            max_age_secs: 120,
        }
        .into();
        assert_eq!(err.field(), "Timestamp");
    }

    #[test]
    fn test_error_kinds_are_distinct() {
        let validation = Sep6Error::validation("account", "cannot be empty");
        let fetch = Sep6Error::fetch("account", "cannot be empty");

        assert_ne!(validation, fetch);
        assert!(fetch.is_fetch() && !fetch.is_validation());
        assert_eq!(fetch.to_string(), "fetch error: account - cannot be empty");
    }
}
