//! Partial result aggregation
//!
//! Combines the per-worker partial results of a run into a single count and sum.
//! The aggregator keeps each worker's partial result (keyed by worker id) so the
//! per-worker breakdown stays available for output after the totals are taken.
//!
//! The aggregator is only fed after every worker thread has been joined; the join
//! is what orders the workers' writes before the aggregator's reads, so no lock
//! is involved.
//!
//! # Example
//!
//! ```
//! use primepulse::partition::Range;
//! use primepulse::stats::{PartialResult, aggregator::Aggregator};
//!
//! let mut low = PartialResult::new(0, Range::new(1, 5));
//! low.record_prime(2).unwrap();
//! low.record_prime(3).unwrap();
//! low.record_prime(5).unwrap();
//!
//! let mut high = PartialResult::new(1, Range::new(6, 10));
//! high.record_prime(7).unwrap();
//!
//! let mut aggregator = Aggregator::new();
//! aggregator.add_worker(low);
//! aggregator.add_worker(high);
//!
//! let totals = aggregator.aggregate().unwrap();
//! assert_eq!(totals.count, 4);
//! assert_eq!(totals.sum, 17);
//! ```

use crate::error::ComputeResult;
use crate::stats::{PartialResult, Totals};
use std::collections::HashMap;

/// Aggregator for per-worker partial results
///
/// # Usage
///
/// 1. Create aggregator with `new()`
/// 2. Add each worker's partial result with `add_worker()`
/// 3. Get the combined totals with `aggregate()`
/// 4. Take the per-worker view with `into_partials()`
#[derive(Debug, Default)]
pub struct Aggregator {
    /// Per-worker partial results (worker_id → partial)
    workers: HashMap<usize, PartialResult>,
}

impl Aggregator {
    /// Create an empty aggregator
    pub fn new() -> Self {
        Self {
            workers: HashMap::new(),
        }
    }

    /// Take ownership of a worker's partial result
    ///
    /// A second result for the same worker id replaces the first, so a worker
    /// can never be counted twice.
    pub fn add_worker(&mut self, partial: PartialResult) {
        self.workers.insert(partial.worker_id, partial);
    }

    /// Number of workers whose results have been added
    pub fn num_workers(&self) -> usize {
        self.workers.len()
    }

    /// Sum counts and sums across all workers
    ///
    /// Reads the stored partials without modifying them, so repeated calls
    /// return the same totals.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ComputeError::ArithmeticOverflow`] if the
    /// combined count or sum does not fit in a `u64`.
    pub fn aggregate(&self) -> ComputeResult<Totals> {
        aggregate(self.workers.values())
    }

    /// Partial result for a specific worker
    pub fn worker_stats(&self, worker_id: usize) -> Option<&PartialResult> {
        self.workers.get(&worker_id)
    }

    /// Sorted list of worker IDs
    pub fn worker_ids(&self) -> Vec<usize> {
        let mut ids: Vec<usize> = self.workers.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Consume the aggregator, returning partials ordered by worker id
    pub fn into_partials(self) -> Vec<PartialResult> {
        let mut partials: Vec<PartialResult> = self.workers.into_values().collect();
        partials.sort_unstable_by_key(|p| p.worker_id);
        partials
    }
}

/// Sum counts and sums over any collection of partial results
///
/// Order does not matter: all arithmetic is exact integer addition.
pub fn aggregate<'a, I>(partials: I) -> ComputeResult<Totals>
where
    I: IntoIterator<Item = &'a PartialResult>,
{
    let mut totals = Totals::default();
    for partial in partials {
        totals.merge(partial)?;
    }
    Ok(totals)
}
