//! Range workers
//!
//! A [`RangeWorker`] owns one contiguous range, runs the primality oracle over
//! every number in it and returns a [`PartialResult`] holding the count and sum
//! of the primes it found.
//!
//! # Thread Safety
//!
//! Each worker runs on its own thread and accumulates into locals that no other
//! thread can see. It shares nothing mutable with other workers; its only output
//! is the partial result it returns, exactly once, when `run()` completes.
//!
//! # Example
//!
//! ```
//! use primepulse::partition::Range;
//! use primepulse::worker::RangeWorker;
//!
//! let partial = RangeWorker::new(0, Range::new(1, 10)).run().unwrap();
//! assert_eq!(partial.count, 4);
//! assert_eq!(partial.sum, 17);
//! ```

pub mod affinity;

use crate::error::ComputeResult;
use crate::oracle::is_prime;
use crate::partition::Range;
use crate::stats::PartialResult;
use crate::util::time::Timestamp;

/// Worker that scans one range for primes
#[derive(Debug, Clone)]
pub struct RangeWorker {
    /// Worker ID (index into the partition)
    id: usize,

    /// Range owned by this worker
    range: Range,

    /// CPU core to pin to before scanning
    core: Option<usize>,

    /// Print per-worker diagnostics to stderr
    debug: bool,
}

impl RangeWorker {
    /// Create a worker for `range`
    pub fn new(id: usize, range: Range) -> Self {
        Self {
            id,
            range,
            core: None,
            debug: false,
        }
    }

    /// Pin the worker's thread to `core` when it starts running
    pub fn with_core(mut self, core: Option<usize>) -> Self {
        self.core = core;
        self
    }

    /// Enable debug output
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Worker ID
    pub fn id(&self) -> usize {
        self.id
    }

    /// Range owned by this worker
    pub fn range(&self) -> Range {
        self.range
    }

    /// Scan the range and return the partial result
    ///
    /// Must be called on the thread that should do the work: pinning applies
    /// to the calling thread. A failed pin is reported as a warning and the
    /// scan continues, since placement does not change the result.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ComputeError::ArithmeticOverflow`] if the sum of
    /// the primes in the range does not fit in a `u64`.
    pub fn run(self) -> ComputeResult<PartialResult> {
        if let Some(core) = self.core {
            match affinity::set_cpu_affinity(&[core]) {
                Ok(()) if self.debug => {
                    eprintln!("DEBUG: Worker {} pinned to core {}", self.id, core);
                }
                Ok(()) => {}
                Err(e) => eprintln!("Warning: Worker {} could not pin to core {}: {:#}", self.id, core, e),
            }
        }

        let partial = scan_range(self.id, self.range)?;

        if self.debug {
            eprintln!(
                "DEBUG: Worker {} scanned {} ({} numbers): {} primes, sum {}, {:.3}s",
                self.id,
                self.range,
                self.range.len(),
                partial.count,
                partial.sum,
                partial.elapsed.as_secs_f64()
            );
        }

        Ok(partial)
    }
}

/// Count and sum the primes in `range`
///
/// An empty range yields a zero-valued result.
pub fn scan_range(worker_id: usize, range: Range) -> ComputeResult<PartialResult> {
    let start = Timestamp::now();
    let mut partial = PartialResult::new(worker_id, range);

    for n in range.iter() {
        if is_prime(n) {
            partial.record_prime(n)?;
        }
    }

    partial.elapsed = start.elapsed();
    Ok(partial)
}
