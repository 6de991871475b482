//! licgen — offline issuer for RS512-signed license tokens.
//!
//! Entry point and error handling boundary. Uses `anyhow` for
//! ergonomic error propagation and user-facing messages.

mod cli;

use licgen::config::Config;
use licgen::env::Env;
use licgen::license;
use licgen::logging;
use licgen::output::{self, DisplayZone};

use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use cli::args::Cli;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let env = Env::real();

    logging::init(cli.verbose, &env);

    let work_dir = std::env::current_dir().ok();
    let config = match Config::load(work_dir.as_deref(), &env) {
        Ok(config) => config,
        // With --key on the command line nothing in the config is required.
        Err(err) if cli.key.is_some() => {
            eprintln!(
                "Warning: ignoring configuration: {:#}",
                anyhow::Error::from(err)
            );
            Config::default()
        }
        Err(err) => return Err(err).context("failed to load configuration"),
    };

    let key_path = cli
        .key
        .clone()
        .or(config.signing.key)
        .with_context(|| {
            format!(
                "no private key configured: pass --key or set {}",
                licgen::constants::ENV_KEY
            )
        })?;

    let token = license::issue(&cli.issue_request(key_path))?;

    let zone = if config.display.utc {
        DisplayZone::Utc
    } else {
        DisplayZone::Local
    };
    let renderer = cli.format.renderer(zone);
    let rendered =
        output::render(&token, renderer.as_ref()).context("failed to decode issued license")?;

    if let Some(path) = &cli.output {
        std::fs::write(path, &token)
            .with_context(|| format!("failed to write license to {}", path.display()))?;
        tracing::debug!(path = %path.display(), "wrote license token");
        println!("{}", cli::written_message(path));
    }

    println!("{rendered}");
    Ok(())
}
