//! Unverified decoding of issued tokens for display.
//!
//! This reads back what the issuer just produced. It does not check the
//! signature and must never be used to make a trust decision.

use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Serialize;
use thiserror::Error;

use super::LicenseClaims;

/// Errors while decoding a token for display.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("malformed token header")]
    Header(#[source] jsonwebtoken::errors::Error),

    #[error("malformed token payload")]
    Payload(#[source] jsonwebtoken::errors::Error),
}

/// The header fields shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenHeader {
    pub alg: Algorithm,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,
}

/// A token together with its header and claims, read without verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedLicense {
    pub token: String,
    pub header: TokenHeader,
    pub claims: LicenseClaims,
}

/// Decode the header and payload of `token` without checking its signature.
pub fn decode_unverified(token: &str) -> Result<DecodedLicense, DecodeError> {
    let header = jsonwebtoken::decode_header(token).map_err(DecodeError::Header)?;

    let mut validation = Validation::new(header.alg);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    // The key is never consulted once signature validation is off.
    let data = jsonwebtoken::decode::<LicenseClaims>(
        token,
        &DecodingKey::from_secret(&[]),
        &validation,
    )
    .map_err(DecodeError::Payload)?;

    Ok(DecodedLicense {
        token: token.to_string(),
        header: TokenHeader {
            alg: header.alg,
            typ: header.typ,
        },
        claims: data.claims,
    })
}
