//! CLI to Config conversion utilities

use crate::config::cli::Cli;
use crate::config::Config;
use anyhow::{Context, Result};

/// Parse a count string to an integer
///
/// Accepts plain integers with optional `_` separators ("100_000_000"),
/// decimal suffixes k/m/g ("100m" = 100,000,000) and powers of ten ("1e8").
pub fn parse_count(s: &str) -> Result<u64> {
    let s = s.trim().to_lowercase().replace('_', "");

    if let Some((mantissa, exponent)) = s.split_once('e') {
        let mantissa: u64 = mantissa
            .parse()
            .with_context(|| format!("Invalid count format: {}", s))?;
        let exponent: u32 = exponent
            .parse()
            .with_context(|| format!("Invalid count exponent: {}", s))?;
        return 10u64
            .checked_pow(exponent)
            .and_then(|p| mantissa.checked_mul(p))
            .with_context(|| format!("Count too large: {}", s));
    }

    let (num_str, multiplier) = if let Some(n) = s.strip_suffix('k') {
        (n, 1_000u64)
    } else if let Some(n) = s.strip_suffix('m') {
        (n, 1_000_000)
    } else if let Some(n) = s.strip_suffix('g') {
        (n, 1_000_000_000)
    } else {
        (s.as_str(), 1)
    };

    let num: u64 = num_str
        .parse()
        .with_context(|| format!("Invalid count format: {}", s))?;

    num.checked_mul(multiplier)
        .with_context(|| format!("Count too large: {}", s))
}

/// Apply explicitly given CLI values on top of a configuration
///
/// Flags that were not given leave the configuration untouched, so values
/// from a TOML file survive unless overridden on the command line.
pub fn apply_cli(cli: &Cli, mut config: Config) -> Result<Config> {
    if let Some(ref bound) = cli.upper_bound {
        config.range.upper_bound = parse_count(bound).context("Invalid upper bound")?;
    }
    if let Some(threads) = cli.threads {
        config.workers.threads = threads;
    }
    if let Some(ref cores) = cli.cpu_cores {
        config.workers.cpu_cores = Some(cores.clone());
    }

    if let Some(ref path) = cli.output {
        config.output.sink_path = path.clone();
    }
    if cli.no_sink {
        config.output.no_sink = true;
    }
    if let Some(ref path) = cli.json_output {
        config.output.json_output = Some(path.clone());
    }
    if cli.per_worker {
        config.output.per_worker = true;
    }

    if cli.dry_run {
        config.runtime.dry_run = true;
    }
    if cli.debug {
        config.runtime.debug = true;
    }

    Ok(config)
}
