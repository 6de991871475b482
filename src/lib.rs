//! licgen — offline issuer for RS512-signed license tokens (library crate).
//!
//! Re-exports public modules for integration tests and external use.

pub mod config;
pub mod constants;
pub mod env;
pub mod license;
pub mod logging;
pub mod output;
