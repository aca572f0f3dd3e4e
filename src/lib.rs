//! PrimePulse - Parallel prime counting and summing
//!
//! Counts the primes in `[1, N]` and sums them with a fixed number of worker
//! threads, reporting the wall-clock time of the computation.
//!
//! # Architecture
//!
//! - **Oracle**: naive trial-division primality test, pure and lock-free
//! - **Partition**: splits `[1, N]` into `W` contiguous ranges, last one ending at `N`
//! - **Worker**: scans one range with purely local accumulation
//! - **Aggregator**: merges the `W` partial results once, after all workers finish
//! - **Coordinator**: partitions, spawns, joins, aggregates and times a run
//!
//! # Example
//!
//! ```
//! use primepulse::compute_primes_in_range;
//!
//! let result = compute_primes_in_range(10, 3).unwrap();
//! assert_eq!((result.count, result.sum), (4, 17));
//! ```

pub mod config;
pub mod coordinator;
pub mod error;
pub mod oracle;
pub mod output;
pub mod partition;
pub mod stats;
pub mod util;
pub mod worker;

// Re-export commonly used types
pub use config::Config;
pub use coordinator::{compute_primes_in_range, Coordinator};
pub use error::ComputeError;
pub use stats::{FinalResult, PartialResult};

/// Result type used throughout PrimePulse
pub type Result<T> = anyhow::Result<T>;
