//! Result statistics
//!
//! Per-worker partial results and the final combined result of a run.
//!
//! Each worker owns one [`PartialResult`] for its whole lifetime and updates it
//! with plain (non-atomic) arithmetic: nothing else can see it until the worker
//! returns it. Partials are combined once, after every worker has been joined,
//! by the [`aggregator::Aggregator`].
//!
//! # Example
//!
//! ```
//! use primepulse::partition::Range;
//! use primepulse::stats::PartialResult;
//!
//! let mut partial = PartialResult::new(0, Range::new(1, 10));
//! for prime in [2, 3, 5, 7] {
//!     partial.record_prime(prime).unwrap();
//! }
//!
//! assert_eq!(partial.count, 4);
//! assert_eq!(partial.sum, 17);
//! ```

pub mod aggregator;

use crate::error::{ComputeError, ComputeResult};
use crate::partition::Range;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Count and sum of the primes found by one worker over its own range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialResult {
    /// Worker that produced this result
    pub worker_id: usize,
    /// Range the worker scanned
    pub range: Range,
    /// Number of primes found
    pub count: u64,
    /// Sum of the primes found
    pub sum: u64,
    /// Time the worker spent scanning its range
    pub elapsed: Duration,
}

impl PartialResult {
    /// Create a zero-valued partial result for a worker
    pub fn new(worker_id: usize, range: Range) -> Self {
        Self {
            worker_id,
            range,
            count: 0,
            sum: 0,
            elapsed: Duration::ZERO,
        }
    }

    /// Add one prime to the running count and sum
    ///
    /// # Errors
    ///
    /// Returns [`ComputeError::ArithmeticOverflow`] if the sum (or count) no
    /// longer fits in a `u64`. The value is never wrapped.
    #[inline]
    pub fn record_prime(&mut self, prime: u64) -> ComputeResult<()> {
        let worker_id = self.worker_id;
        let overflow = || ComputeError::ArithmeticOverflow {
            worker_id: Some(worker_id),
        };

        self.sum = self.sum.checked_add(prime).ok_or_else(overflow)?;
        self.count = self.count.checked_add(1).ok_or_else(overflow)?;
        Ok(())
    }

    /// Numbers examined per second by this worker
    pub fn numbers_per_sec(&self) -> f64 {
        crate::util::time::calculate_rate(self.range.len(), self.elapsed)
    }
}

/// Combined count and sum across all workers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub count: u64,
    pub sum: u64,
}

impl Totals {
    /// Fold one partial result into the totals
    ///
    /// # Errors
    ///
    /// Returns [`ComputeError::ArithmeticOverflow`] with no worker id if the
    /// combined values overflow.
    pub fn merge(&mut self, partial: &PartialResult) -> ComputeResult<()> {
        let overflow = || ComputeError::ArithmeticOverflow { worker_id: None };

        self.count = self.count.checked_add(partial.count).ok_or_else(overflow)?;
        self.sum = self.sum.checked_add(partial.sum).ok_or_else(overflow)?;
        Ok(())
    }
}

/// Final result of one run
///
/// `count` and `sum` equal the exact sums of the corresponding fields over
/// `partials`. `elapsed` covers spawning, joining and aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalResult {
    /// Upper bound N of the scanned range [1, N]
    pub upper_bound: u64,
    /// Number of workers requested
    pub workers: usize,
    /// Number of primes in [1, N]
    pub count: u64,
    /// Sum of the primes in [1, N]
    pub sum: u64,
    /// Wall-clock duration of the computation
    pub elapsed: Duration,
    /// Per-worker results, ordered by worker id (empty when no worker ran)
    pub partials: Vec<PartialResult>,
}

impl FinalResult {
    /// Result for a degenerate range: nothing to scan, no workers spawned
    pub fn empty(upper_bound: u64, workers: usize, elapsed: Duration) -> Self {
        Self {
            upper_bound,
            workers,
            count: 0,
            sum: 0,
            elapsed,
            partials: Vec::new(),
        }
    }

    /// Elapsed time in whole microseconds
    pub fn elapsed_micros(&self) -> u64 {
        self.elapsed.as_micros() as u64
    }

    /// Numbers examined per second across all workers
    pub fn numbers_per_sec(&self) -> f64 {
        crate::util::time::calculate_rate(self.upper_bound, self.elapsed)
    }
}
