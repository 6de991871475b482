//! Environment variable abstraction for testability.
//!
//! Production code uses [`Env::real()`] which delegates to [`std::env::var`].
//! Tests use [`Env::mock()`] backed by a `HashMap`, so config resolution can
//! be exercised without touching the process environment.

use std::collections::HashMap;
use std::path::PathBuf;

/// Environment variable reader.
#[derive(Clone, Debug)]
pub struct Env {
    overrides: Option<HashMap<String, String>>,
}

impl Env {
    /// Create an `Env` that reads from the real process environment.
    pub fn real() -> Self {
        Self { overrides: None }
    }

    /// Create an `Env` backed by explicit key-value pairs.
    #[cfg(test)]
    pub fn mock(vars: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>) -> Self {
        Self {
            overrides: Some(
                vars.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Look up an environment variable by name.
    pub fn var(&self, name: &str) -> Result<String, std::env::VarError> {
        match &self.overrides {
            Some(map) => map.get(name).cloned().ok_or(std::env::VarError::NotPresent),
            None => std::env::var(name),
        }
    }

    /// Look up a variable holding a filesystem path. Empty values count as unset.
    pub fn path(&self, name: &str) -> Option<PathBuf> {
        self.var(name)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
    }

    /// Look up a boolean switch.
    ///
    /// Returns `Err` with the raw value when it is present but not one of the
    /// recognised spellings, so callers can warn about it.
    pub fn flag(&self, name: &str) -> Result<Option<bool>, String> {
        let Ok(val) = self.var(name) else {
            return Ok(None);
        };
        match val.to_lowercase().as_str() {
            "false" | "0" | "no" | "off" => Ok(Some(false)),
            "true" | "1" | "yes" | "on" => Ok(Some(true)),
            _ => Err(val),
        }
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::real()
    }
}
