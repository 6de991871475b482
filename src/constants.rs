//! App-wide constants.
//!
//! Centralises the tool name, config paths, environment variable names,
//! and the fixed token parameters so a rename only requires changing this file.

/// Display name of the tool (lowercase).
pub const APP_NAME: &str = "licgen";

/// Crate version, baked in at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Local config filename (e.g. `.licgen.toml` in the working directory).
pub const CONFIG_FILENAME: &str = ".licgen.toml";

/// Directory name under `~/.config/` for global config.
pub const CONFIG_DIR: &str = "licgen";

// ── Token parameters ────────────────────────────────────────────────

/// Issuer claim. Existing verifiers compare against this exact value.
pub const ISSUER: &str = "tabbyml.com";

pub const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// `strftime` pattern for every human-readable timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ── Environment variable names ──────────────────────────────────────

pub const ENV_KEY: &str = "LICGEN_KEY";
pub const ENV_DISPLAY_UTC: &str = "LICGEN_DISPLAY_UTC";
