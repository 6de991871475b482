//! Integration tests for license issuance and display decoding.
//!
//! Tokens are signed with the fixture key pair under `tests/fixtures/keys/`
//! and checked with `jsonwebtoken` the way the product verifies them.

use std::path::PathBuf;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use pretty_assertions::assert_eq;

use licgen::license::{
    self, DecodeError, IssueError, IssueRequest, LicenseClaims, LicenseType, decode_unverified,
};
use licgen::output::text::TextRenderer;
use licgen::output::{self, DisplayZone};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/keys")
        .join(name)
}

fn request(license_type: LicenseType, seats: i64, days: i64) -> IssueRequest {
    IssueRequest {
        email: "a@example.com".to_string(),
        license_type,
        seats,
        expiry_days: days,
        private_key_path: fixture("issuer_private.pem"),
    }
}

fn verify(token: &str, public_key: &str) -> jsonwebtoken::errors::Result<LicenseClaims> {
    let pem = std::fs::read(fixture(public_key)).unwrap();
    let mut validation = Validation::new(Algorithm::RS512);
    validation.set_issuer(&["tabbyml.com"]);
    validation.validate_aud = false;
    jsonwebtoken::decode::<LicenseClaims>(token, &DecodingKey::from_rsa_pem(&pem)?, &validation)
        .map(|data| data.claims)
}

fn segments(token: &str) -> Vec<&str> {
    token.split('.').collect()
}

fn decode_segment(segment: &str) -> serde_json::Value {
    serde_json::from_slice(&URL_SAFE_NO_PAD.decode(segment).unwrap()).unwrap()
}

// ---------------------------------------------------------------------------
// issue
// ---------------------------------------------------------------------------

#[test]
fn team_license_scenario() {
    let token = license::issue(&request(LicenseType::Team, 5, 30)).unwrap();

    let parts = segments(&token);
    assert_eq!(parts.len(), 3);

    let payload = decode_segment(parts[1]);
    assert_eq!(payload["iss"], "tabbyml.com");
    assert_eq!(payload["sub"], "a@example.com");
    assert_eq!(payload["typ"], "TEAM");
    assert_eq!(payload["num"], 5);
    let iat = payload["iat"].as_i64().unwrap();
    let exp = payload["exp"].as_i64().unwrap();
    assert_eq!(exp - iat, 2_592_000);
}

#[test]
fn issued_at_is_current_time() {
    let before = chrono::Utc::now().timestamp();
    let token = license::issue(&request(LicenseType::Enterprise, 1, 1)).unwrap();
    let after = chrono::Utc::now().timestamp();

    let claims = decode_unverified(&token).unwrap().claims;
    assert!(claims.issued_at >= before && claims.issued_at <= after);
    assert!(claims.issued_at < claims.expires_at);
}

#[test]
fn header_declares_rs512_jwt() {
    let token = license::issue_at(&request(LicenseType::Team, 1, 1), 1_700_000_000).unwrap();
    let header = decode_segment(segments(&token)[0]);
    assert_eq!(header["alg"], "RS512");
    assert_eq!(header["typ"], "JWT");
}

#[test]
fn payload_has_exactly_the_claim_keys() {
    let token = license::issue_at(&request(LicenseType::Team, 2, 3), 1_700_000_000).unwrap();
    let payload = decode_segment(segments(&token)[1]);
    let mut keys: Vec<_> = payload.as_object().unwrap().keys().cloned().collect();
    keys.sort();
    assert_eq!(keys, vec!["exp", "iat", "iss", "num", "sub", "typ"]);
}

#[test]
fn non_positive_inputs_are_signed_as_is() {
    let token = license::issue_at(&request(LicenseType::Team, -4, -2), 1_700_000_000).unwrap();
    let claims = decode_unverified(&token).unwrap().claims;
    assert_eq!(claims.seats, -4);
    assert_eq!(claims.expires_at, 1_700_000_000 - 2 * 86_400);
}

#[test]
fn missing_key_file_is_a_read_error() {
    let mut req = request(LicenseType::Team, 5, 30);
    req.private_key_path = fixture("does_not_exist.pem");

    let err = license::issue(&req).unwrap_err();
    assert!(matches!(err, IssueError::ReadKey { .. }), "got: {err:?}");
    assert!(err.to_string().contains("does_not_exist.pem"));
}

#[test]
fn malformed_key_is_a_signing_error() {
    let mut req = request(LicenseType::Team, 5, 30);
    req.private_key_path = fixture("malformed.pem");

    let err = license::issue(&req).unwrap_err();
    assert!(matches!(err, IssueError::Sign(_)), "got: {err:?}");
}

#[test]
fn public_key_is_not_a_signing_key() {
    let mut req = request(LicenseType::Team, 5, 30);
    req.private_key_path = fixture("issuer_public.pem");

    let err = license::issue(&req).unwrap_err();
    assert!(matches!(err, IssueError::Sign(_)), "got: {err:?}");
}

// ---------------------------------------------------------------------------
// verification by a holder of the public key
// ---------------------------------------------------------------------------

#[test]
fn token_verifies_with_matching_public_key() {
    let token = license::issue(&request(LicenseType::Enterprise, 25, 365)).unwrap();
    let claims = verify(&token, "issuer_public.pem").unwrap();
    assert_eq!(claims.license_type, LicenseType::Enterprise);
    assert_eq!(claims.seats, 25);
}

#[test]
fn token_fails_with_other_public_key() {
    let token = license::issue(&request(LicenseType::Team, 5, 30)).unwrap();
    let err = verify(&token, "other_public.pem").unwrap_err();
    assert!(
        matches!(err.kind(), ErrorKind::InvalidSignature),
        "got: {err:?}"
    );
}

#[test]
fn tampered_payload_fails_verification() {
    let token = license::issue(&request(LicenseType::Team, 5, 30)).unwrap();
    let parts = segments(&token);

    let mut payload = decode_segment(parts[1]);
    payload["num"] = serde_json::json!(500);
    let forged_payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&payload).unwrap());
    let forged = format!("{}.{}.{}", parts[0], forged_payload, parts[2]);

    let err = verify(&forged, "issuer_public.pem").unwrap_err();
    assert!(
        matches!(err.kind(), ErrorKind::InvalidSignature),
        "got: {err:?}"
    );
}

// ---------------------------------------------------------------------------
// decode / render
// ---------------------------------------------------------------------------

#[test]
fn unverified_decode_round_trips_claims() {
    let issued_at = 1_767_225_600;
    let token = license::issue_at(&request(LicenseType::Enterprise, 12, 90), issued_at).unwrap();

    let decoded = decode_unverified(&token).unwrap();
    let expected =
        LicenseClaims::new("a@example.com", LicenseType::Enterprise, 12, 90, issued_at).unwrap();
    assert_eq!(decoded.claims, expected);
    assert_eq!(decoded.header.alg, Algorithm::RS512);
    assert_eq!(decoded.header.typ.as_deref(), Some("JWT"));
    assert_eq!(decoded.token, token);
}

#[test]
fn unverified_decode_ignores_expiry() {
    let token = license::issue_at(&request(LicenseType::Team, 1, 1), 0).unwrap();
    assert!(decode_unverified(&token).is_ok());
}

#[test]
fn decode_rejects_garbage() {
    assert!(matches!(
        decode_unverified("a.b"),
        Err(DecodeError::Header(_))
    ));
}

#[test]
fn render_text_block_for_issued_token() {
    let token = license::issue_at(&request(LicenseType::Team, 5, 31), 1_767_225_600).unwrap();
    let renderer = TextRenderer {
        zone: DisplayZone::Utc,
    };

    let out = output::render(&token, &renderer).unwrap();
    assert_eq!(
        out,
        format!(
            "\nLicense Token:\n{token}\n\nLicense Information:\n  Issued to: a@example.com\n  License type: TEAM\n  Seats: 5\n  Expires: 2026-02-01 00:00:00\n"
        )
    );
}
