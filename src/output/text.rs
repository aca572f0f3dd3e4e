//! Human-readable text output

use crate::stats::FinalResult;
use crate::util::resource::available_cores;
use crate::util::time::{format_duration, format_rate};
use std::fmt::Write;

/// Print run results to the console
///
/// Displays:
/// - Range and worker count
/// - Prime count and sum
/// - Elapsed time and numbers examined per second
/// - CPU utilization (if measured)
/// - Per-worker breakdown (if requested)
pub fn print_results(result: &FinalResult, cpu_percent: Option<f64>, per_worker: bool) {
    print!("{}", format_results(result, cpu_percent, per_worker));
}

/// Render run results as the text `print_results` prints
pub fn format_results(result: &FinalResult, cpu_percent: Option<f64>, per_worker: bool) -> String {
    // Writing to a String cannot fail
    let mut out = String::new();

    let _ = writeln!(out, "═══════════════════════════════════════════════════════════");
    let _ = writeln!(out, "                    RESULTS");
    let _ = writeln!(out, "═══════════════════════════════════════════════════════════");
    let _ = writeln!(out);

    let _ = writeln!(out, "Range:        [1, {}]", format_number(result.upper_bound));
    let _ = writeln!(out, "Workers:      {}", result.workers);
    let _ = writeln!(out, "Primes found: {}", format_number(result.count));
    let _ = writeln!(out, "Sum:          {}", format_number(result.sum));
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Elapsed Time: {:.3}s ({} us)",
        result.elapsed.as_secs_f64(),
        result.elapsed_micros()
    );
    let _ = writeln!(out, "Rate:         {} numbers/s", format_rate(result.numbers_per_sec()));

    if let Some(cpu) = cpu_percent {
        let workers = result.workers.max(1) as f64;
        let _ = writeln!(out);
        let _ = writeln!(out, "CPU Utilization:");
        let _ = writeln!(out, "  {:.0}% total, {:.0}% per worker avg", cpu, cpu / workers);
        let _ = writeln!(
            out,
            "  {:.1}% of system capacity ({} cores)",
            cpu / available_cores() as f64,
            available_cores()
        );
    }

    if per_worker && !result.partials.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Per-Worker:");
        let _ = writeln!(
            out,
            "  {:>6}  {:>27}  {:>12}  {:>20}  {:>10}",
            "worker", "range", "primes", "sum", "time"
        );
        for partial in &result.partials {
            let _ = writeln!(
                out,
                "  {:>6}  {:>27}  {:>12}  {:>20}  {:>10}",
                partial.worker_id,
                partial.range.to_string(),
                partial.count,
                partial.sum,
                format_duration(partial.elapsed)
            );
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "═══════════════════════════════════════════════════════════");
    out
}

/// Format a number with thousands separators
fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();

    for (count, c) in s.chars().rev().enumerate() {
        if count > 0 && count % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::Range;
    use crate::stats::PartialResult;
    use std::time::Duration;

    fn sample_result() -> FinalResult {
        let mut low = PartialResult::new(0, Range::new(1, 50));
        low.count = 15;
        low.sum = 328;
        let mut high = PartialResult::new(1, Range::new(51, 100));
        high.count = 10;
        high.sum = 732;

        FinalResult {
            upper_bound: 100,
            workers: 2,
            count: 25,
            sum: 1060,
            elapsed: Duration::from_micros(1500),
            partials: vec![low, high],
        }
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(100_000_000), "100,000,000");
    }

    #[test]
    fn test_format_results_summary() {
        let text = format_results(&sample_result(), None, false);
        assert!(text.contains("Range:        [1, 100]"));
        assert!(text.contains("Primes found: 25"));
        assert!(text.contains("Sum:          1,060"));
        assert!(text.contains("(1500 us)"));
        assert!(!text.contains("Per-Worker"));
        assert!(!text.contains("CPU Utilization"));
    }

    #[test]
    fn test_format_results_per_worker_and_cpu() {
        let text = format_results(&sample_result(), Some(180.0), true);
        assert!(text.contains("Per-Worker:"));
        assert!(text.contains("[51, 100]"));
        assert!(text.contains("732"));
        assert!(text.contains("180% total, 90% per worker avg"));
    }
}
