//! Untrusted session token decoding
//!
//! Reads the claim set out of the second dot-separated segment of a session
//! token. No signature, issuer or expiry is checked: the result is only fit
//! for deciding which UI controls to show.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use serde_json::Value;
use stayfolio_types::ClaimSet;

/// Standard alphabet, padding optional. Token segments arrive unpadded and in
/// the URL-safe alphabet, which is mapped back before decoding.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Decode the claim set carried by a token.
///
/// Returns `None` if the token has fewer than two segments, or the payload
/// segment is not base64, not UTF-8, not JSON, or not a JSON object. Never
/// panics.
pub fn decode(token: &str) -> Option<ClaimSet> {
    let mut segments = token.split('.');
    let _header = segments.next()?;
    let Some(payload) = segments.next() else {
        tracing::trace!("token has no payload segment");
        return None;
    };

    let standard: String = payload
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();

    let bytes = match PAYLOAD_ENGINE.decode(standard.as_bytes()) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::trace!(error = %e, "token payload is not base64");
            return None;
        }
    };

    let text = String::from_utf8(bytes).ok()?;
    let value: Value = match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(e) => {
            tracing::trace!(error = %e, "token payload is not JSON");
            return None;
        }
    };

    ClaimSet::from_json(value)
}

/// Check whether a token claims a role. Malformed tokens claim nothing.
pub fn has_role(token: &str, role: &str) -> bool {
    decode(token).is_some_and(|claims| claims.has_role(role))
}
