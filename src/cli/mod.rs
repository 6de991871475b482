//! CLI command definitions and argument parsing.
//!
//! Uses clap derive macros for ergonomic argument definitions.

pub mod args;

use std::path::Path;

/// Confirmation line printed after the token has been written to disk.
pub fn written_message(path: &Path) -> String {
    use colored::Colorize;
    format!("License written to {}", path.display().to_string().bold())
}
