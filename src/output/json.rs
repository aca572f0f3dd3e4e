//! JSON output formatting
//!
//! Writes one JSON document per run with:
//! - Run timestamp and tool version
//! - The configuration that produced the result
//! - Totals (count, sum) and elapsed time
//! - CPU utilization (when measured)
//! - Per-worker ranges and results

use crate::config::Config;
use crate::stats::{FinalResult, PartialResult};
use crate::util::time::format_duration;
use crate::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;

/// Duration with both microseconds and human-readable format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonDuration {
    pub micros: u64,
    pub human: String,
}

impl JsonDuration {
    pub fn from_duration(d: Duration) -> Self {
        Self {
            micros: d.as_micros() as u64,
            human: format_duration(d),
        }
    }
}

/// Configuration echo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonConfig {
    pub upper_bound: u64,
    pub threads: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu_cores: Option<String>,
}

/// Per-worker result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonWorker {
    pub worker_id: usize,
    pub range_start: u64,
    pub range_end: u64,
    pub numbers: u64,
    pub count: u64,
    pub sum: u64,
    pub elapsed: JsonDuration,
}

impl From<&PartialResult> for JsonWorker {
    fn from(partial: &PartialResult) -> Self {
        Self {
            worker_id: partial.worker_id,
            range_start: partial.range.start,
            range_end: partial.range.end,
            numbers: partial.range.len(),
            count: partial.count,
            sum: partial.sum,
            elapsed: JsonDuration::from_duration(partial.elapsed),
        }
    }
}

/// Complete JSON result document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonResult {
    /// RFC 3339 timestamp of when the document was produced
    pub timestamp: String,
    pub version: String,
    pub config: JsonConfig,
    pub count: u64,
    pub sum: u64,
    pub elapsed: JsonDuration,
    pub numbers_per_sec: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu_percent: Option<f64>,
    pub workers: Vec<JsonWorker>,
}

/// Build the JSON document for a run
pub fn build_json(result: &FinalResult, config: &Config, cpu_percent: Option<f64>) -> JsonResult {
    JsonResult {
        timestamp: chrono::Local::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        config: JsonConfig {
            upper_bound: result.upper_bound,
            threads: result.workers,
            cpu_cores: config.workers.cpu_cores.clone(),
        },
        count: result.count,
        sum: result.sum,
        elapsed: JsonDuration::from_duration(result.elapsed),
        numbers_per_sec: result.numbers_per_sec(),
        cpu_percent,
        workers: result.partials.iter().map(JsonWorker::from).collect(),
    }
}

/// Write the JSON document for a run to `output_path`
pub fn write_json(
    output_path: &Path,
    result: &FinalResult,
    config: &Config,
    cpu_percent: Option<f64>,
) -> Result<()> {
    let file = File::create(output_path)
        .with_context(|| format!("Failed to create JSON output: {}", output_path.display()))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &build_json(result, config, cpu_percent))
        .with_context(|| format!("Failed to write JSON output: {}", output_path.display()))?;
    writer.flush()
        .with_context(|| format!("Failed to write JSON output: {}", output_path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinator::compute_primes_in_range;
    use tempfile::TempDir;

    #[test]
    fn test_json_duration() {
        let d = JsonDuration::from_duration(Duration::from_micros(2500));
        assert_eq!(d.micros, 2500);
        assert_eq!(d.human, "2.50ms");
    }

    #[test]
    fn test_build_json() {
        let result = compute_primes_in_range(100, 3).unwrap();
        let json = build_json(&result, &Config::default(), Some(250.0));

        assert_eq!(json.config.upper_bound, 100);
        assert_eq!(json.config.threads, 3);
        assert_eq!(json.count, 25);
        assert_eq!(json.sum, 1060);
        assert_eq!(json.cpu_percent, Some(250.0));
        assert_eq!(json.workers.len(), 3);
        assert_eq!(json.workers[0].range_start, 1);
        assert_eq!(json.workers[2].range_end, 100);

        let numbers: u64 = json.workers.iter().map(|w| w.numbers).sum();
        assert_eq!(numbers, 100);
        assert!(chrono::DateTime::parse_from_rfc3339(&json.timestamp).is_ok());
    }

    #[test]
    fn test_write_json_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("primes.json");
        let result = compute_primes_in_range(10, 2).unwrap();

        write_json(&path, &result, &Config::default(), None).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("cpu_percent"));

        let parsed: JsonResult = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed.count, 4);
        assert_eq!(parsed.sum, 17);
        assert_eq!(parsed.workers.len(), 2);
    }
}
