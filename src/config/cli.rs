//! CLI argument parsing using clap

use clap::Parser;
use std::path::PathBuf;

/// PrimePulse - Parallel prime counting and summing
///
/// Counts the primes in [1, N] and sums them using a fixed number of worker
/// threads, then writes "elapsed_us count sum" to the sink file.
#[derive(Parser, Debug, Default)]
#[command(name = "primepulse")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Upper bound N of the range [1, N] (e.g. 100000000, 100m, 1e8) [default: 100m]
    #[arg(short = 'n', long, env = "PRIMEPULSE_UPPER_BOUND")]
    pub upper_bound: Option<String>,

    /// Number of worker threads [default: 8]
    #[arg(short = 't', long, env = "PRIMEPULSE_THREADS")]
    pub threads: Option<usize>,

    /// CPU cores to pin workers to (e.g. "0-3,8"), assigned round-robin
    #[arg(long)]
    pub cpu_cores: Option<String>,

    /// Sink file receiving "elapsed_us count sum" [default: primes.txt]
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Do not write the sink file
    #[arg(long)]
    pub no_sink: bool,

    /// Write a JSON result document to this path
    #[arg(long)]
    pub json_output: Option<PathBuf>,

    /// Print the per-worker breakdown
    #[arg(long)]
    pub per_worker: bool,

    /// TOML configuration file (CLI flags take precedence)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Validate and print the configuration without running
    #[arg(long)]
    pub dry_run: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate CLI arguments
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.threads == Some(0) {
            anyhow::bail!("threads must be at least 1");
        }

        if self.no_sink && self.output.is_some() {
            anyhow::bail!("--output cannot be combined with --no-sink");
        }

        Ok(())
    }
}
