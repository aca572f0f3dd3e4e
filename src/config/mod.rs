//! Configuration module
//!
//! Handles CLI argument parsing, TOML configuration files, and validation.
//!
//! A run needs only two parameters, the upper bound `N` and the worker count
//! `W`. Everything else controls where results go and how much is printed.

pub mod cli;
pub mod cli_convert;
pub mod toml;
pub mod validator;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Default upper bound N (10^8)
pub const DEFAULT_UPPER_BOUND: u64 = 100_000_000;

/// Default number of workers
pub const DEFAULT_THREADS: usize = 8;

/// Default sink file
pub const DEFAULT_SINK_PATH: &str = "primes.txt";

/// Complete run configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub range: RangeConfig,
    #[serde(default)]
    pub workers: WorkerConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub runtime: RuntimeConfig,
}

/// Range to scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeConfig {
    /// Upper bound N of the range [1, N]
    #[serde(default = "default_upper_bound")]
    pub upper_bound: u64,
}

fn default_upper_bound() -> u64 {
    DEFAULT_UPPER_BOUND
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            upper_bound: default_upper_bound(),
        }
    }
}

/// Worker configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Number of worker threads
    #[serde(default = "default_threads")]
    pub threads: usize,
    /// CPU cores to pin workers to (e.g. "0-3,8"), assigned round-robin
    pub cpu_cores: Option<String>,
}

fn default_threads() -> usize {
    DEFAULT_THREADS
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            threads: default_threads(),
            cpu_cores: None,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// File receiving the "elapsed_us count sum" record
    #[serde(default = "default_sink_path")]
    pub sink_path: PathBuf,
    /// Skip writing the sink file
    #[serde(default)]
    pub no_sink: bool,
    /// JSON result file path
    pub json_output: Option<PathBuf>,
    /// Print the per-worker breakdown
    #[serde(default)]
    pub per_worker: bool,
}

fn default_sink_path() -> PathBuf {
    PathBuf::from(DEFAULT_SINK_PATH)
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            sink_path: default_sink_path(),
            no_sink: false,
            json_output: None,
            per_worker: false,
        }
    }
}

/// Runtime configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Validate and print the configuration without running
    #[serde(default)]
    pub dry_run: bool,
    /// Enable debug output
    #[serde(default)]
    pub debug: bool,
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Range:   [1, {}]", self.range.upper_bound)?;
        write!(f, "Workers: {}", self.workers.threads)?;
        if let Some(ref cores) = self.workers.cpu_cores {
            write!(f, " (cores {})", cores)?;
        }
        writeln!(f)?;
        if self.output.no_sink {
            write!(f, "Sink:    disabled")?;
        } else {
            write!(f, "Sink:    {}", self.output.sink_path.display())?;
        }
        if let Some(ref path) = self.output.json_output {
            write!(f, "\nJSON:    {}", path.display())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.range.upper_bound, 100_000_000);
        assert_eq!(config.workers.threads, 8);
        assert_eq!(config.workers.cpu_cores, None);
        assert_eq!(config.output.sink_path, PathBuf::from("primes.txt"));
        assert!(!config.output.no_sink);
        assert!(!config.runtime.debug);
    }

    #[test]
    fn test_display() {
        let mut config = Config::default();
        config.workers.cpu_cores = Some("0-3".to_string());

        let text = config.to_string();
        assert!(text.contains("Range:   [1, 100000000]"));
        assert!(text.contains("Workers: 8 (cores 0-3)"));
        assert!(text.contains("Sink:    primes.txt"));
    }
}
