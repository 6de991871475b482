//! Plain text display block.
//!
//! ```text
//!
//! License Token:
//! <token>
//!
//! License Information:
//!   Issued to: a@example.com
//!   License type: TEAM
//!   Seats: 5
//!   Expires: 2026-02-01 00:00:00
//!
//! ```

use crate::license::DecodedLicense;
use crate::output::{DisplayZone, LicenseRenderer, RenderError};

/// Text renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer {
    pub zone: DisplayZone,
}

impl LicenseRenderer for TextRenderer {
    fn render(&self, license: &DecodedLicense) -> Result<String, RenderError> {
        let claims = &license.claims;
        Ok(format!(
            "\nLicense Token:\n{token}\n\nLicense Information:\n  Issued to: {sub}\n  License type: {typ}\n  Seats: {num}\n  Expires: {exp}\n",
            token = license.token,
            sub = claims.subject,
            typ = claims.license_type,
            num = claims.seats,
            exp = self.zone.format(claims.expires_at),
        ))
    }
}
