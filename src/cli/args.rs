//! Clap argument types and value validation.

use clap::builder::NonEmptyStringValueParser;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use licgen::license::{IssueRequest, LicenseType};
use licgen::output::{DisplayZone, LicenseRenderer, json::JsonRenderer, text::TextRenderer};

/// Issue a signed license token.
#[derive(Parser, Debug)]
#[command(
    name = "licgen",
    version = licgen::constants::VERSION,
    about = "Issue an RS512-signed license token for a licensee",
)]
pub struct Cli {
    /// Email address of the licensee.
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    pub email: String,

    /// License type.
    #[arg(long = "type", value_enum, ignore_case = true)]
    pub license_type: LicenseType,

    /// Number of seats.
    #[arg(long, allow_negative_numbers = true)]
    pub seats: i64,

    /// Number of days until the license expires.
    #[arg(long, allow_negative_numbers = true)]
    pub days: i64,

    /// Path to the PEM-encoded RSA private key.
    /// Falls back to LICGEN_KEY, then `[signing] key` in config.
    #[arg(long)]
    pub key: Option<PathBuf>,

    /// Also write the raw token to this file (overwritten if it exists).
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Display format.
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Print diagnostic logs to stderr.
    #[arg(long, short = 'v', default_value_t = false)]
    pub verbose: bool,
}

/// Display formats for the issued license.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    /// The renderer for this format.
    pub fn renderer(self, zone: DisplayZone) -> Box<dyn LicenseRenderer> {
        match self {
            OutputFormat::Text => Box::new(TextRenderer { zone }),
            OutputFormat::Json => Box::new(JsonRenderer { zone }),
        }
    }
}

impl Cli {
    /// Combine the parsed flags with the resolved key path.
    pub fn issue_request(&self, private_key_path: PathBuf) -> IssueRequest {
        IssueRequest {
            email: self.email.clone(),
            license_type: self.license_type,
            seats: self.seats,
            expiry_days: self.days,
            private_key_path,
        }
    }
}
