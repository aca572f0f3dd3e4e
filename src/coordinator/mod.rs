//! Coordinator module
//!
//! Orchestrates a run: partitions `[1, N]`, spawns one worker thread per range,
//! waits for all of them, aggregates their partial results and measures the
//! wall-clock time of the whole parallel region.
//!
//! # Flow
//!
//! 1. Record the start time
//! 2. Partition `[1, N]` into `W` ranges
//! 3. Spawn exactly `W` worker threads, one per range
//! 4. Join every worker (barrier: nothing is aggregated before all are done)
//! 5. Aggregate the partial results
//! 6. Record the elapsed time and build the [`FinalResult`]
//!
//! Any worker failure aborts the run. A missing partial would silently corrupt
//! the count and sum, so there is no partial answer.
//!
//! # Example
//!
//! ```
//! use primepulse::coordinator::compute_primes_in_range;
//!
//! let result = compute_primes_in_range(100, 4).unwrap();
//! assert_eq!(result.count, 25);
//! assert_eq!(result.sum, 1060);
//! assert_eq!(result.partials.len(), 4);
//! ```

use crate::config::Config;
use crate::error::{ComputeError, ComputeResult};
use crate::output::sink::{ResultSink, SinkRecord};
use crate::partition::{partition, Range};
use crate::stats::aggregator::Aggregator;
use crate::stats::{FinalResult, PartialResult};
use crate::util::time::Timestamp;
use crate::worker::affinity::{core_for_worker, parse_cpu_list};
use crate::worker::RangeWorker;
use anyhow::Context;
use std::thread::{self, JoinHandle};

type WorkerHandle = (usize, JoinHandle<ComputeResult<PartialResult>>);

/// Count and sum the primes in `[1, upper_bound]` with `workers` threads
///
/// # Errors
///
/// - [`ComputeError::InvalidConfiguration`] if `workers` is zero (nothing is
///   spawned)
/// - [`ComputeError::ArithmeticOverflow`] if the sum does not fit in a `u64`
/// - [`ComputeError::WorkerPanicked`] / [`ComputeError::Spawn`] if a worker
///   thread fails
///
/// An `upper_bound` of zero is not an error: the result is zero and no worker
/// is spawned.
pub fn compute_primes_in_range(upper_bound: u64, workers: usize) -> ComputeResult<FinalResult> {
    Coordinator::new(upper_bound, workers).run()
}

/// Run orchestrator
#[derive(Debug, Clone)]
pub struct Coordinator {
    /// Upper bound N of the range [1, N]
    upper_bound: u64,

    /// Number of workers W
    workers: usize,

    /// Cores to pin workers to, round-robin (empty = no pinning)
    cores: Vec<usize>,

    /// Print diagnostics to stderr
    debug: bool,
}

impl Coordinator {
    /// Create a coordinator for `[1, upper_bound]` and `workers` threads
    pub fn new(upper_bound: u64, workers: usize) -> Self {
        Self {
            upper_bound,
            workers,
            cores: Vec::new(),
            debug: false,
        }
    }

    /// Create a coordinator from a full configuration
    pub fn from_config(config: &Config) -> crate::Result<Self> {
        let cores = match config.workers.cpu_cores {
            Some(ref list) => parse_cpu_list(list).context("Invalid cpu_cores")?,
            None => Vec::new(),
        };

        Ok(Self::new(config.range.upper_bound, config.workers.threads)
            .with_cores(cores)
            .with_debug(config.runtime.debug))
    }

    /// Pin workers to these cores, round-robin
    pub fn with_cores(mut self, cores: Vec<usize>) -> Self {
        self.cores = cores;
        self
    }

    /// Enable debug output
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Run the computation
    pub fn run(&self) -> ComputeResult<FinalResult> {
        if self.workers == 0 {
            return Err(ComputeError::InvalidConfiguration(
                "number of workers must be at least 1".to_string(),
            ));
        }

        let start = Timestamp::now();

        if self.upper_bound == 0 {
            if self.debug {
                eprintln!("DEBUG: Empty range [1, 0], no workers spawned");
            }
            return Ok(FinalResult::empty(0, self.workers, start.elapsed()));
        }

        let ranges = partition(self.upper_bound, self.workers)?;
        if self.debug {
            eprintln!(
                "DEBUG: Spawning {} workers over [1, {}]",
                self.workers, self.upper_bound
            );
        }

        let handles = self.spawn_workers(&ranges)?;
        let aggregator = join_workers(handles)?;
        let totals = aggregator.aggregate()?;
        let elapsed = start.elapsed();

        if self.debug {
            eprintln!(
                "DEBUG: All {} workers joined, aggregated in {:.3}s",
                aggregator.num_workers(),
                elapsed.as_secs_f64()
            );
        }

        Ok(FinalResult {
            upper_bound: self.upper_bound,
            workers: self.workers,
            count: totals.count,
            sum: totals.sum,
            elapsed,
            partials: aggregator.into_partials(),
        })
    }

    /// Run the computation and hand the result to `sink`
    pub fn run_with_sink(&self, sink: &mut dyn ResultSink) -> crate::Result<FinalResult> {
        let result = self.run()?;
        sink.write(&SinkRecord::from(&result))
            .context("Failed to write result to sink")?;
        Ok(result)
    }

    /// Spawn one named thread per range
    ///
    /// If the OS refuses a thread, the workers already started are joined
    /// before the error is returned so none is left running detached.
    fn spawn_workers(&self, ranges: &[Range]) -> ComputeResult<Vec<WorkerHandle>> {
        let mut handles = Vec::with_capacity(ranges.len());

        for (worker_id, &range) in ranges.iter().enumerate() {
            let worker = RangeWorker::new(worker_id, range)
                .with_core(core_for_worker(&self.cores, worker_id))
                .with_debug(self.debug);

            let spawned = thread::Builder::new()
                .name(format!("prime-worker-{}", worker_id))
                .spawn(move || worker.run());

            match spawned {
                Ok(handle) => handles.push((worker_id, handle)),
                Err(source) => {
                    // Results are discarded, the run is already failing
                    let _ = join_workers(handles);
                    return Err(ComputeError::Spawn { worker_id, source });
                }
            }
        }

        Ok(handles)
    }
}

/// Join every worker and collect its partial result
///
/// All handles are joined even after a failure; the first failure (in worker
/// order) is returned.
fn join_workers(handles: Vec<WorkerHandle>) -> ComputeResult<Aggregator> {
    let mut aggregator = Aggregator::new();
    let mut first_error = None;

    for (worker_id, handle) in handles {
        let outcome = match handle.join() {
            Ok(result) => result,
            Err(_) => Err(ComputeError::WorkerPanicked { worker_id }),
        };

        match outcome {
            Ok(partial) => aggregator.add_worker(partial),
            Err(e) => {
                first_error.get_or_insert(e);
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(aggregator),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::sink::MemorySink;

    #[test]
    fn test_first_ten_any_worker_count() {
        for workers in [1, 2, 3, 5] {
            let result = compute_primes_in_range(10, workers).unwrap();
            assert_eq!(result.count, 4, "workers={}", workers);
            assert_eq!(result.sum, 17, "workers={}", workers);
        }
    }

    #[test]
    fn test_first_hundred() {
        let result = compute_primes_in_range(100, 8).unwrap();
        assert_eq!(result.count, 25);
        assert_eq!(result.sum, 1060);
        assert_eq!(result.upper_bound, 100);
        assert_eq!(result.workers, 8);
    }

    #[test]
    fn test_result_independent_of_worker_count() {
        let single = compute_primes_in_range(100, 1).unwrap();
        let seven = compute_primes_in_range(100, 7).unwrap();
        assert_eq!((single.count, single.sum), (seven.count, seven.sum));

        let reference = compute_primes_in_range(10_007, 1).unwrap();
        for workers in 2..=16 {
            let result = compute_primes_in_range(10_007, workers).unwrap();
            assert_eq!(result.count, reference.count, "workers={}", workers);
            assert_eq!(result.sum, reference.sum, "workers={}", workers);
        }
    }

    #[test]
    fn test_high_end_prime_not_dropped() {
        // 97 is the last number of [1, 97]; 97 / 8 leaves a remainder of 1
        let result = compute_primes_in_range(97, 8).unwrap();
        assert_eq!(result.count, 25);
        assert_eq!(result.sum, 1060);
    }

    #[test]
    fn test_final_equals_sum_of_partials() {
        let result = compute_primes_in_range(1_000, 6).unwrap();
        assert_eq!(result.partials.len(), 6);

        let count: u64 = result.partials.iter().map(|p| p.count).sum();
        let sum: u64 = result.partials.iter().map(|p| p.sum).sum();
        assert_eq!(result.count, count);
        assert_eq!(result.sum, sum);
        assert_eq!(result.count, 168);
        assert_eq!(result.sum, 76_127);

        let ids: Vec<usize> = result.partials.iter().map(|p| p.worker_id).collect();
        assert_eq!(ids, (0..6).collect::<Vec<_>>());
    }

    #[test]
    fn test_zero_upper_bound() {
        let result = compute_primes_in_range(0, 8).unwrap();
        assert_eq!(result.count, 0);
        assert_eq!(result.sum, 0);
        assert!(result.partials.is_empty());
    }

    #[test]
    fn test_zero_workers_rejected() {
        let err = compute_primes_in_range(100, 0).unwrap_err();
        assert!(matches!(err, ComputeError::InvalidConfiguration(_)));

        // Rejected before the degenerate-range shortcut too
        let err = compute_primes_in_range(0, 0).unwrap_err();
        assert!(matches!(err, ComputeError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_more_workers_than_numbers() {
        let result = compute_primes_in_range(3, 8).unwrap();
        assert_eq!(result.count, 2);
        assert_eq!(result.sum, 5);
        assert_eq!(result.partials.len(), 8);
        assert!(result.partials[3..].iter().all(|p| p.range.is_empty() && p.count == 0));
    }

    #[test]
    fn test_run_with_sink() {
        let mut sink = MemorySink::new();
        let result = Coordinator::new(10, 2).run_with_sink(&mut sink).unwrap();

        assert_eq!(sink.records().len(), 1);
        let record = sink.records()[0];
        assert_eq!(record.count, 4);
        assert_eq!(record.sum, 17);
        assert_eq!(record.elapsed_micros, result.elapsed_micros());
    }

    #[test]
    fn test_from_config() {
        let mut config = Config::default();
        config.range.upper_bound = 50;
        config.workers.threads = 3;
        config.workers.cpu_cores = Some("0".to_string());

        let coordinator = Coordinator::from_config(&config).unwrap();
        let result = coordinator.run().unwrap();
        assert_eq!(result.count, 15);
        assert_eq!(result.sum, 328);

        config.workers.cpu_cores = Some("x".to_string());
        assert!(Coordinator::from_config(&config).is_err());
    }

    #[test]
    fn test_join_reports_panicked_worker() {
        let ok: WorkerHandle = (0, thread::spawn(|| crate::worker::scan_range(0, Range::new(1, 10))));
        let panicked: WorkerHandle = (1, thread::spawn(|| -> ComputeResult<PartialResult> {
            panic!("worker blew up")
        }));

        let err = join_workers(vec![ok, panicked]).unwrap_err();
        assert!(matches!(err, ComputeError::WorkerPanicked { worker_id: 1 }));
    }

    #[test]
    fn test_join_reports_worker_error() {
        let failing: WorkerHandle = (2, thread::spawn(|| -> ComputeResult<PartialResult> {
            Err(ComputeError::ArithmeticOverflow { worker_id: Some(2) })
        }));

        let err = join_workers(vec![failing]).unwrap_err();
        assert!(matches!(err, ComputeError::ArithmeticOverflow { worker_id: Some(2) }));
    }
}
