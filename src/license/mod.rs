//! License token issuance.
//!
//! A license is a compact RS512 JWS whose payload carries the claim set
//! below. The payload is signed, not encrypted: anyone can read the claims,
//! only the holder of the private key can produce them.
//!
//! Wire keys are short for compatibility with existing verifiers:
//!
//! | Field          | Key   | Example            |
//! |----------------|-------|--------------------|
//! | issuer         | `iss` | `"tabbyml.com"`    |
//! | subject        | `sub` | `"a@example.com"`  |
//! | issued at      | `iat` | `1767225600`       |
//! | expires at     | `exp` | `1769817600`       |
//! | license type   | `typ` | `"TEAM"`           |
//! | seats          | `num` | `5`                |

pub mod decode;

use std::path::{Path, PathBuf};

use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{ISSUER, SECONDS_PER_DAY};

pub use decode::{DecodeError, DecodedLicense, TokenHeader, decode_unverified};

/// The only algorithm licenses are signed with.
pub const ALGORITHM: Algorithm = Algorithm::RS512;

/// Errors that abort license issuance.
#[derive(Error, Debug)]
pub enum IssueError {
    /// The private key file could not be read.
    #[error("failed to read private key {}", .path.display())]
    ReadKey {
        path: PathBuf,
        source: std::io::Error,
    },

    /// `issued_at + days * 86400` does not fit in an `i64`.
    ///
    /// Only reachable for a `--days` magnitude beyond roughly 10^14; any
    /// representable expiry is signed as given.
    #[error("expiry of {days} day(s) is out of the representable timestamp range")]
    ExpiryOutOfRange { days: i64 },

    /// The key was not a usable RSA private key, or encoding failed.
    #[error("failed to sign license")]
    Sign(#[source] jsonwebtoken::errors::Error),
}

/// Product tier carried in the `typ` claim.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum LicenseType {
    Team,
    Enterprise,
}

/// The signed payload of a license token.
///
/// Field order matches the serialized key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseClaims {
    #[serde(rename = "iss")]
    pub issuer: String,
    #[serde(rename = "sub")]
    pub subject: String,
    #[serde(rename = "iat")]
    pub issued_at: i64,
    #[serde(rename = "exp")]
    pub expires_at: i64,
    #[serde(rename = "typ")]
    pub license_type: LicenseType,
    #[serde(rename = "num")]
    pub seats: i64,
}

impl LicenseClaims {
    /// Build the claim set for a license issued at `issued_at` (Unix seconds).
    ///
    /// `seats` and `expiry_days` are taken as-is: zero or negative values
    /// produce a license that is signed but useless to the product.
    pub fn new(
        email: impl Into<String>,
        license_type: LicenseType,
        seats: i64,
        expiry_days: i64,
        issued_at: i64,
    ) -> Result<Self, IssueError> {
        let expires_at = expiry_days
            .checked_mul(SECONDS_PER_DAY)
            .and_then(|secs| issued_at.checked_add(secs))
            .ok_or(IssueError::ExpiryOutOfRange { days: expiry_days })?;

        Ok(Self {
            issuer: ISSUER.to_string(),
            subject: email.into(),
            issued_at,
            expires_at,
            license_type,
            seats,
        })
    }
}

/// Validated inputs for [`issue`].
#[derive(Debug, Clone)]
pub struct IssueRequest {
    pub email: String,
    pub license_type: LicenseType,
    pub seats: i64,
    pub expiry_days: i64,
    pub private_key_path: PathBuf,
}

/// Issue a license token signed with the key at `request.private_key_path`,
/// stamped with the current time.
pub fn issue(request: &IssueRequest) -> Result<String, IssueError> {
    issue_at(request, chrono::Utc::now().timestamp())
}

/// Same as [`issue`] with an explicit `issued_at` (Unix seconds).
pub fn issue_at(request: &IssueRequest, issued_at: i64) -> Result<String, IssueError> {
    let key = read_private_key(&request.private_key_path)?;

    let claims = LicenseClaims::new(
        request.email.as_str(),
        request.license_type,
        request.seats,
        request.expiry_days,
        issued_at,
    )?;
    tracing::debug!(
        subject = %claims.subject,
        license_type = %claims.license_type,
        seats = claims.seats,
        iat = claims.issued_at,
        exp = claims.expires_at,
        "built license claims"
    );

    sign(&claims, &key)
}

/// Read a PEM private key as raw bytes.
pub fn read_private_key(path: &Path) -> Result<Vec<u8>, IssueError> {
    let bytes = std::fs::read(path).map_err(|source| IssueError::ReadKey {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), len = bytes.len(), "read private key");
    Ok(bytes)
}

/// Sign `claims` with a PEM-encoded RSA private key (PKCS#1 or PKCS#8).
pub fn sign(claims: &LicenseClaims, private_key_pem: &[u8]) -> Result<String, IssueError> {
    let key = EncodingKey::from_rsa_pem(private_key_pem).map_err(IssueError::Sign)?;
    let token = jsonwebtoken::encode(&Header::new(ALGORITHM), claims, &key)
        .map_err(IssueError::Sign)?;
    tracing::debug!(len = token.len(), "signed license token");
    Ok(token)
}
