//! Caller input checks, run before any request is built

use reqwest::Url;

use crate::error::{Result, Sep6Error};

/// Fail on the first empty value, in the order given
pub fn validate_not_empty(fields: &[(&str, &str)]) -> Result<()> {
    for (name, value) in fields {
        if value.is_empty() {
            return Err(Sep6Error::validation(*name, "cannot be empty"));
        }
    }
    Ok(())
}

/// Amounts must be strictly positive (NaN included in the rejection)
pub fn validate_amount(amount: f32) -> Result<()> {
    if amount > 0.0 {
        Ok(())
    } else {
        Err(Sep6Error::validation("amount", "must be positive"))
    }
}

/// Parse an absolute http(s) URL and drop one trailing slash
pub fn normalize_base_url(field: &str, raw: &str) -> Result<String> {
    let parsed = Url::parse(raw).map_err(|e| Sep6Error::validation(field, format!("invalid URL: {}", e)))?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.cannot_be_a_base() {
        return Err(Sep6Error::validation(field, "invalid URL: expected http(s)"));
    }

    Ok(raw.strip_suffix('/').unwrap_or(raw).to_string())
}

/// Route paths always start with a single `/`
pub fn normalize_route_path(path: &str) -> Result<String> {
    let trimmed = path.trim_start_matches('/');
    if trimmed.is_empty() {
        return Err(Sep6Error::validation("path", "cannot be empty"));
    }
    Ok(format!("/{}", trimmed))
}
