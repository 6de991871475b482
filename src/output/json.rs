//! JSON output renderer.
//!
//! Outputs `{"token": "...", "header": {...}, "payload": {...}}` with
//! timestamps already formatted for reading.

use serde::Serialize;

use crate::license::{DecodedLicense, LicenseType, TokenHeader};
use crate::output::{DisplayZone, LicenseRenderer, RenderError};

/// JSON output renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer {
    pub zone: DisplayZone,
}

#[derive(Serialize)]
struct LicenseInfo<'a> {
    token: &'a str,
    header: &'a TokenHeader,
    payload: PayloadInfo<'a>,
}

#[derive(Serialize)]
struct PayloadInfo<'a> {
    issuer: &'a str,
    subject: &'a str,
    issued_at: String,
    expires_at: String,
    #[serde(rename = "type")]
    license_type: LicenseType,
    seats: i64,
}

impl LicenseRenderer for JsonRenderer {
    fn render(&self, license: &DecodedLicense) -> Result<String, RenderError> {
        let claims = &license.claims;
        let info = LicenseInfo {
            token: &license.token,
            header: &license.header,
            payload: PayloadInfo {
                issuer: &claims.issuer,
                subject: &claims.subject,
                issued_at: self.zone.format(claims.issued_at),
                expires_at: self.zone.format(claims.expires_at),
                license_type: claims.license_type,
                seats: claims.seats,
            },
        };

        Ok(serde_json::to_string_pretty(&info)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::license::LicenseClaims;
    use jsonwebtoken::Algorithm;

    #[test]
    fn render_json() {
        let license = DecodedLicense {
            token: "aaa.bbb.ccc".to_string(),
            header: TokenHeader {
                alg: Algorithm::RS512,
                typ: Some("JWT".to_string()),
            },
            claims: LicenseClaims::new("ops@example.com", LicenseType::Enterprise, 50, 1, 0)
                .unwrap(),
        };

        let output = JsonRenderer {
            zone: DisplayZone::Utc,
        }
        .render(&license)
        .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["token"], "aaa.bbb.ccc");
        assert_eq!(parsed["header"]["alg"], "RS512");
        assert_eq!(parsed["header"]["typ"], "JWT");
        assert_eq!(parsed["payload"]["issuer"], "tabbyml.com");
        assert_eq!(parsed["payload"]["subject"], "ops@example.com");
        assert_eq!(parsed["payload"]["issued_at"], "1970-01-01 00:00:00");
        assert_eq!(parsed["payload"]["expires_at"], "1970-01-02 00:00:00");
        assert_eq!(parsed["payload"]["type"], "ENTERPRISE");
        assert_eq!(parsed["payload"]["seats"], 50);
    }
}
