//! Anchor metadata discovery via `/.well-known/stellar.toml`

use reqwest::StatusCode;

use crate::error::{Result, Sep6Error};
use crate::types::StellarToml;

pub const STELLAR_TOML_PATH: &str = ".well-known/stellar.toml";

/// Fetch the anchor's `SIGNING_KEY`
///
/// The body is decoded as TOML whatever the `Content-Type`; plenty of
/// anchors serve the file as `application/octet-stream`.
pub async fn fetch_signing_key(http: &reqwest::Client, anchor_url: &str) -> Result<String> {
    let url = format!("{}/{}", anchor_url, STELLAR_TOML_PATH);
    tracing::debug!(url = %url, "Fetching stellar.toml");

    let resp = http
        .get(&url)
        .send()
        .await
        .map_err(|e| Sep6Error::fetch("URL", format!("Failed to fetch stellar.toml - {}", e)))?;

    let status = resp.status();
    if status != StatusCode::OK {
        return Err(Sep6Error::fetch(
            "StatusCode",
            format!("Failed to fetch stellar.toml - StatusCode: {}", status.as_u16()),
        ));
    }

    let text = resp
        .text()
        .await
        .map_err(|e| Sep6Error::fetch("TOML Decode", format!("Failed to read stellar.toml - {}", e)))?;

    parse_signing_key(&text)
}

/// Pull `SIGNING_KEY` out of a `stellar.toml` document
pub fn parse_signing_key(document: &str) -> Result<String> {
    let parsed: StellarToml = toml::from_str(document).map_err(|e| {
        Sep6Error::fetch("TOML Decode", format!("Failed to decode stellar.toml - {}", e))
    })?;

    match parsed.signing_key {
        Some(key) if !key.is_empty() => Ok(key),
        _ => Err(Sep6Error::fetch("SIGNING_KEY", "stellar.toml has no SIGNING_KEY")),
    }
}
