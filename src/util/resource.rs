//! Process CPU utilization tracking
//!
//! Reads `/proc/self/stat` on Linux to measure how much CPU time the process
//! burned during a run. Dividing by wall-clock time shows how many cores the
//! workers actually kept busy (e.g. ~800% for eight saturated workers).

use std::fs;
use std::time::Instant;

/// CPU time snapshot
#[derive(Debug, Clone, Copy)]
pub struct ResourceSnapshot {
    /// CPU time in user mode (microseconds)
    pub cpu_user_us: u64,
    /// CPU time in kernel mode (microseconds)
    pub cpu_system_us: u64,
    /// Wall-clock time when snapshot was taken
    pub timestamp: Instant,
}

impl ResourceSnapshot {
    /// Take a snapshot of current CPU usage
    ///
    /// Returns None if /proc is unavailable (e.g., on non-Linux systems).
    pub fn take() -> Option<Self> {
        let stat = fs::read_to_string("/proc/self/stat").ok()?;
        let (cpu_user_us, cpu_system_us) = parse_cpu_time(&stat)?;

        Some(Self {
            cpu_user_us,
            cpu_system_us,
            timestamp: Instant::now(),
        })
    }

    /// Calculate CPU utilization between two snapshots
    ///
    /// Returns CPU percentage (0.0 - 100.0 * num_cores).
    /// For example, 150.0 means 1.5 cores worth of CPU time.
    pub fn cpu_percent_since(&self, earlier: &ResourceSnapshot) -> f64 {
        let wall_time_us = self.timestamp.duration_since(earlier.timestamp).as_micros() as u64;
        if wall_time_us == 0 {
            return 0.0;
        }

        let cpu_time_us = (self.cpu_user_us + self.cpu_system_us)
            .saturating_sub(earlier.cpu_user_us + earlier.cpu_system_us);

        (cpu_time_us as f64 / wall_time_us as f64) * 100.0
    }
}

/// Parse (user_us, system_us) from the contents of /proc/self/stat
fn parse_cpu_time(stat: &str) -> Option<(u64, u64)> {
    // pid (comm) state ppid ... utime stime ...
    // comm may contain spaces, so split after the closing paren
    let after_comm = &stat[stat.rfind(')')? + 1..];
    let fields: Vec<&str> = after_comm.split_whitespace().collect();

    // utime and stime are fields 14 and 15 overall, 12 and 13 after comm
    if fields.len() < 13 {
        return None;
    }
    let utime_ticks: u64 = fields[11].parse().ok()?;
    let stime_ticks: u64 = fields[12].parse().ok()?;

    // USER_HZ is 100 on Linux
    let ticks_per_sec = 100;
    Some((
        utime_ticks * 1_000_000 / ticks_per_sec,
        stime_ticks * 1_000_000 / ticks_per_sec,
    ))
}

/// Number of logical CPUs available to the process
pub fn available_cores() -> usize {
    num_cpus::get()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_parse_cpu_time() {
        let stat = "1234 (prime worker) R 1 1234 1234 0 -1 4194560 100 0 0 0 250 50 0 0 20 0 9 0";
        let (user, system) = parse_cpu_time(stat).unwrap();
        assert_eq!(user, 2_500_000);
        assert_eq!(system, 500_000);
    }

    #[test]
    fn test_parse_cpu_time_truncated() {
        assert!(parse_cpu_time("1234 (x) R 1").is_none());
        assert!(parse_cpu_time("garbage").is_none());
    }

    #[test]
    fn test_cpu_percent_since() {
        let earlier = ResourceSnapshot {
            cpu_user_us: 0,
            cpu_system_us: 0,
            timestamp: Instant::now(),
        };
        let later = ResourceSnapshot {
            cpu_user_us: 150_000,
            cpu_system_us: 50_000,
            timestamp: earlier.timestamp + Duration::from_millis(100),
        };

        let percent = later.cpu_percent_since(&earlier);
        assert!((percent - 200.0).abs() < 0.01);
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn test_snapshot_on_linux() {
        assert!(ResourceSnapshot::take().is_some());
    }

    #[test]
    fn test_available_cores() {
        assert!(available_cores() >= 1);
    }
}
