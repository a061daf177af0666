//! Unverified JWT payload decoding.
//!
//! The client reads exactly one claim out of the access token: the numeric
//! `userId`, used to fetch the full user record after login or reload.
//! Nothing here verifies a signature and nothing here may ever gate an
//! authorization decision — the server validates the token on every
//! request; this decode is informational only.

#[cfg(test)]
#[path = "jwt_test.rs"]
mod jwt_test;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::Value;
use thiserror::Error;

/// Failure to read a claim out of a token.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClaimError {
    #[error("token is not a three-segment jwt")]
    Shape,
    #[error("payload segment is not valid base64url")]
    Encoding,
    #[error("payload is not a json object")]
    Payload,
    #[error("payload has no numeric userId claim")]
    MissingUserId,
}

/// Extract the `userId` claim from an access token without verifying it.
///
/// # Errors
///
/// Fails when the token is not shaped like a JWT, the payload segment is
/// not base64url-without-padding, the payload is not JSON, or the claim is
/// absent or non-numeric.
pub fn decode_user_id(token: &str) -> Result<i64, ClaimError> {
    let mut segments = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(ClaimError::Shape);
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| ClaimError::Encoding)?;
    let claims: Value = serde_json::from_slice(&bytes).map_err(|_| ClaimError::Payload)?;
    claims
        .get("userId")
        .and_then(Value::as_i64)
        .ok_or(ClaimError::MissingUserId)
}
