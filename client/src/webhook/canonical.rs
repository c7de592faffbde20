//! Reconstruction of the signed callback payload

const SEPARATOR: u8 = b'.';

/// Build `timestamp + "." + home_domain + "." + body`
///
/// `body` must be the bytes exactly as received; re-serialized JSON will
/// not match what the anchor signed.
pub fn canonical_payload(timestamp: &str, home_domain: &str, body: &[u8]) -> Vec<u8> {
    let mut payload = Vec::with_capacity(timestamp.len() + home_domain.len() + body.len() + 2);
    payload.extend_from_slice(timestamp.as_bytes());
    payload.push(SEPARATOR);
    payload.extend_from_slice(home_domain.as_bytes());
    payload.push(SEPARATOR);
    payload.extend_from_slice(body);
    payload
}
