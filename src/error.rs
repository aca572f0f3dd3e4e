//! Errors raised by the prime computation core
//!
//! The core (partitioner, workers, aggregator, coordinator) reports failures with
//! the typed [`ComputeError`]. Everything around it (CLI, config files, sinks,
//! output) uses `anyhow` like the rest of the crate; `ComputeError` converts into
//! `anyhow::Error` through `?`.

use thiserror::Error;

/// Failure of a prime computation
#[derive(Debug, Error)]
pub enum ComputeError {
    /// The requested configuration cannot be run (e.g. zero workers)
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A count or sum exceeded the width of `u64`
    #[error("arithmetic overflow while accumulating primes{}", worker_suffix(.worker_id))]
    ArithmeticOverflow {
        /// Worker that overflowed, or `None` when the merge step overflowed
        worker_id: Option<usize>,
    },

    /// A worker thread panicked before publishing its partial result
    #[error("worker {worker_id} panicked")]
    WorkerPanicked { worker_id: usize },

    /// The OS refused to create a worker thread
    #[error("failed to spawn worker {worker_id}")]
    Spawn {
        worker_id: usize,
        #[source]
        source: std::io::Error,
    },
}

fn worker_suffix(worker_id: &Option<usize>) -> String {
    match worker_id {
        Some(id) => format!(" in worker {}", id),
        None => " while merging partial results".to_string(),
    }
}

/// Result type for the computation core
pub type ComputeResult<T> = std::result::Result<T, ComputeError>;
