//! CPU affinity for worker threads
//!
//! Workers can be pinned to specific CPU cores so each one keeps its own core
//! for the whole scan instead of migrating. Cores are given as a list such as
//! `"0-3,8"` and handed out to workers round-robin.
//!
//! # Platform Support
//!
//! Pinning uses `sched_setaffinity` and is only supported on Linux.
//!
//! # Example
//!
//! ```no_run
//! use primepulse::worker::affinity::{core_for_worker, parse_cpu_list, set_cpu_affinity};
//!
//! let cores = parse_cpu_list("0,2,4").unwrap();
//! let core = core_for_worker(&cores, 4).unwrap();
//! assert_eq!(core, 2);
//! set_cpu_affinity(&[core]).unwrap();
//! ```

use crate::Result;
use anyhow::Context;

/// Highest core id representable in a `cpu_set_t`
const MAX_CORE_ID: usize = 1023;

/// Set CPU affinity for the current thread
///
/// Binds the calling thread to the given cores.
///
/// # Errors
///
/// Returns an error if the list is empty, a core id exceeds 1023, or the
/// syscall fails (e.g. the core is outside the process's allowed set).
#[cfg(target_os = "linux")]
pub fn set_cpu_affinity(cores: &[usize]) -> Result<()> {
    use libc::{cpu_set_t, sched_setaffinity, CPU_SET, CPU_ZERO};
    use std::mem;

    if cores.is_empty() {
        anyhow::bail!("CPU core list cannot be empty");
    }
    if let Some(&core) = cores.iter().find(|&&c| c > MAX_CORE_ID) {
        anyhow::bail!("CPU core ID {} is too large (max {})", core, MAX_CORE_ID);
    }

    // SAFETY: cpu_set_t is plain data; every core id was bounds-checked above
    let result = unsafe {
        let mut cpu_set: cpu_set_t = mem::zeroed();
        CPU_ZERO(&mut cpu_set);
        for &core in cores {
            CPU_SET(core, &mut cpu_set);
        }

        // 0 = calling thread
        sched_setaffinity(0, mem::size_of::<cpu_set_t>(), &cpu_set)
    };

    if result != 0 {
        let err = std::io::Error::last_os_error();
        return Err(err).context(format!("Failed to set CPU affinity to cores {:?}", cores));
    }

    Ok(())
}

#[cfg(not(target_os = "linux"))]
pub fn set_cpu_affinity(_cores: &[usize]) -> Result<()> {
    anyhow::bail!("CPU affinity is only supported on Linux")
}

/// Parse a comma-separated list of CPU cores or ranges
///
/// Accepts `"0,1,2,3"`, `"0-3"` and mixtures like `"0,2-4,7"`. The result is
/// sorted and deduplicated.
///
/// # Example
///
/// ```
/// use primepulse::worker::affinity::parse_cpu_list;
///
/// let cores = parse_cpu_list("0,2-4,7").unwrap();
/// assert_eq!(cores, vec![0, 2, 3, 4, 7]);
/// ```
pub fn parse_cpu_list(list: &str) -> Result<Vec<usize>> {
    let mut cores = Vec::new();

    for part in list.split(',').map(str::trim) {
        match part.split_once('-') {
            Some((first, last)) => {
                let first = parse_core(first)?;
                let last = parse_core(last)?;
                if first > last {
                    anyhow::bail!("Invalid CPU range: start ({}) > end ({})", first, last);
                }
                cores.extend(first..=last);
            }
            None => cores.push(parse_core(part)?),
        }
    }

    cores.sort_unstable();
    cores.dedup();

    Ok(cores)
}

fn parse_core(s: &str) -> Result<usize> {
    s.trim()
        .parse()
        .with_context(|| format!("Invalid CPU core number: '{}'", s))
}

/// Core a worker should pin to, assigning cores round-robin
pub fn core_for_worker(cores: &[usize], worker_id: usize) -> Option<usize> {
    if cores.is_empty() {
        None
    } else {
        Some(cores[worker_id % cores.len()])
    }
}

/// Warn on stderr when more workers than CPU cores are configured
///
/// Returns true if the thread count exceeds the core count.
pub fn warn_if_oversubscribed(thread_count: usize) -> bool {
    let cpu_count = crate::util::resource::available_cores();
    if thread_count > cpu_count {
        eprintln!(
            "Warning: Thread count ({}) exceeds CPU count ({}). \
             Workers will share cores and per-worker times will stretch.",
            thread_count, cpu_count
        );
        true
    } else {
        false
    }
}
