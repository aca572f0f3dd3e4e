//! TOML configuration file parsing
//!
//! Example file:
//!
//! ```toml
//! [range]
//! upper_bound = 100000000
//!
//! [workers]
//! threads = 8
//! cpu_cores = "0-7"
//!
//! [output]
//! sink_path = "primes.txt"
//! json_output = "primes.json"
//! ```

use super::cli::Cli;
use super::cli_convert::apply_cli;
use super::Config;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parse TOML configuration file
pub fn parse_toml_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_toml_string(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse TOML configuration from string
///
/// Missing sections and fields fall back to their defaults.
pub fn parse_toml_string(contents: &str) -> Result<Config> {
    let config: Config = ::toml::from_str(contents)
        .context("Failed to parse TOML configuration")?;

    Ok(config)
}

/// Build the effective configuration for a CLI invocation
///
/// Starts from the TOML file given with `--config` (or the defaults) and
/// applies the CLI flags on top. CLI takes precedence.
pub fn load_config(cli: &Cli) -> Result<Config> {
    let base = match cli.config {
        Some(ref path) => parse_toml_file(path)?,
        None => Config::default(),
    };

    apply_cli(cli, base)
}
