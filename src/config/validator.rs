//! Configuration validation

use super::*;
use crate::worker::affinity::{parse_cpu_list, warn_if_oversubscribed};
use anyhow::{Context, Result};

/// Validate complete configuration
pub fn validate_config(config: &Config) -> Result<()> {
    validate_workers(&config.workers)?;
    validate_output(&config.output)?;

    Ok(())
}

/// Validate worker configuration
///
/// Oversubscription (more threads than cores) is allowed but warned about.
pub fn validate_workers(workers: &WorkerConfig) -> Result<()> {
    if workers.threads == 0 {
        anyhow::bail!("threads must be at least 1");
    }

    if let Some(ref cores) = workers.cpu_cores {
        parse_cpu_list(cores).context("Invalid cpu_cores")?;
    }

    warn_if_oversubscribed(workers.threads);

    Ok(())
}

/// Validate output configuration
pub fn validate_output(output: &OutputConfig) -> Result<()> {
    if !output.no_sink && output.sink_path.as_os_str().is_empty() {
        anyhow::bail!("sink_path cannot be empty (use no_sink to disable the sink)");
    }

    if let Some(ref json) = output.json_output {
        if json.as_os_str().is_empty() {
            anyhow::bail!("json_output cannot be empty");
        }
        if !output.no_sink && *json == output.sink_path {
            anyhow::bail!(
                "json_output and sink_path both point to {}",
                json.display()
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_zero_threads() {
        let workers = WorkerConfig {
            threads: 0,
            cpu_cores: None,
        };
        assert!(validate_workers(&workers).is_err());
    }

    #[test]
    fn test_validate_cpu_cores() {
        let mut workers = WorkerConfig {
            threads: 2,
            cpu_cores: Some("0-1".to_string()),
        };
        assert!(validate_workers(&workers).is_ok());

        workers.cpu_cores = Some("zero".to_string());
        assert!(validate_workers(&workers).is_err());
    }

    #[test]
    fn test_validate_empty_sink_path() {
        let mut output = OutputConfig {
            sink_path: PathBuf::new(),
            ..Default::default()
        };
        assert!(validate_output(&output).is_err());

        output.no_sink = true;
        assert!(validate_output(&output).is_ok());
    }

    #[test]
    fn test_validate_json_clashes_with_sink() {
        let output = OutputConfig {
            json_output: Some(PathBuf::from("primes.txt")),
            ..Default::default()
        };
        assert!(validate_output(&output).is_err());
    }
}
