//! Range partitioning
//!
//! Splits `[1, N]` into `W` contiguous, non-overlapping inclusive ranges, one per
//! worker. Each worker gets `N / W` numbers and the last worker also takes the
//! remainder, so its range always ends at exactly `N`.
//!
//! # Example
//!
//! ```
//! use primepulse::partition::{partition, Range};
//!
//! let ranges = partition(10, 3).unwrap();
//! assert_eq!(ranges, vec![Range::new(1, 3), Range::new(4, 6), Range::new(7, 10)]);
//! ```

use crate::error::{ComputeError, ComputeResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Contiguous inclusive span of integers assigned to one worker
///
/// A range with `end < start` is empty. Empty ranges are valid and show up when
/// there are more workers than numbers, or when `N` is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start: u64,
    pub end: u64,
}

impl Range {
    /// Create a range covering `start..=end`
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    /// Whether the range holds no numbers
    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    /// Number of integers in the range
    pub fn len(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            self.end - self.start + 1
        }
    }

    /// Iterate every integer in the range
    pub fn iter(&self) -> std::ops::RangeInclusive<u64> {
        self.start..=self.end
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "[empty]")
        } else {
            write!(f, "[{}, {}]", self.start, self.end)
        }
    }
}

/// Split `[1, upper_bound]` into `workers` ranges
///
/// Worker `i` gets `[i * block + 1, (i + 1) * block]` with `block = N / W`, and
/// the last worker's range is extended to `N`. When `W > N` the block is one
/// number wide: the first `N` workers get one number each and the rest get an
/// empty range.
///
/// # Errors
///
/// Returns [`ComputeError::InvalidConfiguration`] when `workers` is zero.
pub fn partition(upper_bound: u64, workers: usize) -> ComputeResult<Vec<Range>> {
    if workers == 0 {
        return Err(ComputeError::InvalidConfiguration(
            "number of workers must be at least 1".to_string(),
        ));
    }

    let w = workers as u64;
    let block = (upper_bound / w).max(1);

    let ranges = (0..w)
        .map(|i| {
            // Clamp so ranges past N stay empty instead of running beyond it
            let start = i.saturating_mul(block).saturating_add(1).min(upper_bound.saturating_add(1));
            let end = if i == w - 1 {
                upper_bound
            } else {
                (i + 1).saturating_mul(block).min(upper_bound)
            };
            Range::new(start, end)
        })
        .collect();

    Ok(ranges)
}
