//! Synthetic processing timeline.
//!
//! There is no real work behind a job: progress is purely a function of
//! wall-clock time elapsed since creation, recomputed on every poll. That
//! makes concurrent polls for the same job benign last-write-wins races.

/// Whether the simulated window has elapsed.
pub fn is_complete(elapsed_secs: f64, total_secs: f64) -> bool {
    elapsed_secs >= total_secs
}

/// Progress percentage for an in-flight job.
///
/// Maps elapsed time onto `[10, 100)`: the 90-point span above the initial
/// progress scales linearly with elapsed/total, capped at 95 before the
/// constant offset. Only meaningful while `elapsed_secs < total_secs`.
pub fn progress_percent(elapsed_secs: f64, total_secs: f64) -> u8 {
    let scaled = (elapsed_secs / total_secs * 90.0).min(95.0);
    (scaled + 10.0).floor() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOTAL: f64 = 10.0;

    #[test]
    fn test_progress_starts_at_initial() {
        assert_eq!(progress_percent(0.0, TOTAL), 10);
    }

    #[test]
    fn test_progress_is_monotonic_and_below_completion() {
        let mut last = 0;
        for tenths in 0..100 {
            let elapsed = tenths as f64 / 10.0;
            let pct = progress_percent(elapsed, TOTAL);
            assert!(pct >= last, "progress regressed at {elapsed}s");
            assert!((10u8..100).contains(&pct));
            last = pct;
        }
    }

    #[test]
    fn test_midpoint_progress() {
        // 5s of 10s: 45 scaled points over the initial 10
        assert_eq!(progress_percent(5.0, TOTAL), 55);
    }

    #[test]
    fn test_completion_boundary() {
        assert!(!is_complete(9.999, TOTAL));
        assert!(is_complete(10.0, TOTAL));
        assert!(is_complete(11.0, TOTAL));
        // A zero-length window completes immediately
        assert!(is_complete(0.0, 0.0));
    }
}
