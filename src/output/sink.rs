//! Result sinks
//!
//! A sink receives exactly one [`SinkRecord`] per run: the elapsed time in
//! microseconds, the prime count and the prime sum, rendered as three
//! whitespace-separated integers in that order.
//!
//! # Example
//!
//! ```
//! use primepulse::output::sink::{MemorySink, ResultSink, SinkRecord};
//!
//! let record = SinkRecord { elapsed_micros: 1250, count: 4, sum: 17 };
//! assert_eq!(record.to_string(), "1250 4 17");
//!
//! let mut sink = MemorySink::new();
//! sink.write(&record).unwrap();
//! assert_eq!(sink.records(), &[record]);
//! ```

use crate::stats::FinalResult;
use crate::Result;
use anyhow::Context;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// The triple handed to a sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkRecord {
    pub elapsed_micros: u64,
    pub count: u64,
    pub sum: u64,
}

impl From<&FinalResult> for SinkRecord {
    fn from(result: &FinalResult) -> Self {
        Self {
            elapsed_micros: result.elapsed_micros(),
            count: result.count,
            sum: result.sum,
        }
    }
}

impl fmt::Display for SinkRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.elapsed_micros, self.count, self.sum)
    }
}

impl FromStr for SinkRecord {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let fields: Vec<&str> = s.split_whitespace().collect();
        if fields.len() != 3 {
            anyhow::bail!("Expected 3 fields (elapsed_us count sum), got {}", fields.len());
        }

        let parse = |name: &str, value: &str| -> Result<u64> {
            value
                .parse()
                .with_context(|| format!("Invalid {} in sink record: '{}'", name, value))
        };

        Ok(Self {
            elapsed_micros: parse("elapsed_us", fields[0])?,
            count: parse("count", fields[1])?,
            sum: parse("sum", fields[2])?,
        })
    }
}

/// Destination for the result of a run
pub trait ResultSink {
    /// Accept the run's single record
    fn write(&mut self, record: &SinkRecord) -> Result<()>;
}

/// Sink writing the record to a file, replacing any previous contents
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read a record back from a sink file
    pub fn read(path: &Path) -> Result<SinkRecord> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read sink file: {}", path.display()))?;
        contents.parse()
    }
}

impl ResultSink for FileSink {
    fn write(&mut self, record: &SinkRecord) -> Result<()> {
        // No trailing newline: the file holds exactly the three integers
        fs::write(&self.path, record.to_string())
            .with_context(|| format!("Failed to write sink file: {}", self.path.display()))
    }
}

/// Sink keeping records in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    records: Vec<SinkRecord>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[SinkRecord] {
        &self.records
    }
}

impl ResultSink for MemorySink {
    fn write(&mut self, record: &SinkRecord) -> Result<()> {
        self.records.push(*record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_record_from_final_result() {
        let mut result = FinalResult::empty(100, 4, Duration::from_micros(4321));
        result.count = 25;
        result.sum = 1060;

        let record = SinkRecord::from(&result);
        assert_eq!(record, SinkRecord { elapsed_micros: 4321, count: 25, sum: 1060 });
        assert_eq!(record.to_string(), "4321 25 1060");
    }

    #[test]
    fn test_parse_record() {
        let record: SinkRecord = " 12 4\t17\n".parse().unwrap();
        assert_eq!(record, SinkRecord { elapsed_micros: 12, count: 4, sum: 17 });

        assert!("12 4".parse::<SinkRecord>().is_err());
        assert!("12 4 x".parse::<SinkRecord>().is_err());
        assert!("1 2 3 4".parse::<SinkRecord>().is_err());
    }

    #[test]
    fn test_file_sink_writes_triple() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("primes.txt");
        let record = SinkRecord { elapsed_micros: 987654, count: 5_761_455, sum: 279_209_790_387_276 };

        let mut sink = FileSink::new(&path);
        sink.write(&record).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "987654 5761455 279209790387276");
        assert_eq!(FileSink::read(&path).unwrap(), record);
    }

    #[test]
    fn test_file_sink_truncates_previous_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("primes.txt");
        fs::write(&path, "an older and much longer line of text").unwrap();

        FileSink::new(&path)
            .write(&SinkRecord { elapsed_micros: 1, count: 0, sum: 0 })
            .unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "1 0 0");
    }

    #[test]
    fn test_file_sink_missing_directory() {
        let dir = TempDir::new().unwrap();
        let mut sink = FileSink::new(dir.path().join("missing").join("primes.txt"));
        assert!(sink.write(&SinkRecord { elapsed_micros: 1, count: 0, sum: 0 }).is_err());
    }
}
