//! Output renderers for an issued license: plain text block and JSON.

pub mod json;
pub mod text;

use chrono::{DateTime, Local, Utc};
use thiserror::Error;

use crate::constants::TIMESTAMP_FORMAT;
use crate::license::{DecodeError, DecodedLicense, decode_unverified};

/// Errors while producing the display output.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("failed to serialize license document")]
    Json(#[from] serde_json::Error),
}

/// Trait for rendering a decoded license to an output format.
pub trait LicenseRenderer {
    /// Render the license to a string.
    fn render(&self, license: &DecodedLicense) -> Result<String, RenderError>;
}

/// Time zone used for human-readable timestamps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayZone {
    /// The executing machine's local zone.
    #[default]
    Local,
    Utc,
}

impl DisplayZone {
    /// Format Unix seconds as `YYYY-MM-DD HH:MM:SS` in this zone.
    ///
    /// Values chrono cannot represent fall back to the raw integer.
    pub fn format(self, secs: i64) -> String {
        let Some(utc) = DateTime::<Utc>::from_timestamp(secs, 0) else {
            return secs.to_string();
        };
        match self {
            DisplayZone::Local => utc.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string(),
            DisplayZone::Utc => utc.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

/// Decode `token` for display and render it with `renderer`.
///
/// The signature is not checked.
pub fn render(token: &str, renderer: &dyn LicenseRenderer) -> Result<String, RenderError> {
    let license = decode_unverified(token)?;
    renderer.render(&license)
}
