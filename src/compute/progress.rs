//! Iteration counting and throughput accounting.
//!
//! The tracker keeps a wall-clock baseline so elapsed time and steps/s stay
//! continuous across a pause: resuming offsets the baseline backwards by the
//! previously accumulated elapsed time.

use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Recompute elapsed time and throughput every this many iterations.
pub const REPORT_INTERVAL: u64 = 10;

/// Point-in-time progress figures, serializable for snapshots and
/// continuation state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressState {
    /// Steps completed so far, including any resumed-from prior count.
    pub iterations: u64,
    /// Wall-clock seconds since the logical start of the run.
    pub elapsed_seconds: f64,
    /// iterations / elapsed_seconds, 0 until elapsed time is positive.
    pub steps_per_sec: f64,
}

impl fmt::Display for ProgressState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "t={:.1}s itn={} ips={:.1}",
            self.elapsed_seconds, self.iterations, self.steps_per_sec
        )
    }
}

/// Tracks iteration count against a wall-clock baseline.
#[derive(Debug)]
pub struct ProgressTracker {
    baseline: Instant,
    count: u64,
}

impl ProgressTracker {
    /// Fresh run: count 0, baseline now.
    pub fn fresh() -> Self {
        Self {
            baseline: Instant::now(),
            count: 0,
        }
    }

    /// Resume a run: carry the prior count and shift the baseline backwards
    /// by the prior elapsed time so the clock keeps accumulating.
    pub fn resumed(prior: &ProgressState) -> Self {
        let now = Instant::now();
        let offset = Duration::from_secs_f64(prior.elapsed_seconds.max(0.0));
        Self {
            baseline: now.checked_sub(offset).unwrap_or(now),
            count: prior.iterations,
        }
    }

    /// Record one completed step. Returns a report every
    /// [`REPORT_INTERVAL`] iterations.
    pub fn increment(&mut self) -> Option<ProgressState> {
        self.count += 1;
        (self.count % REPORT_INTERVAL == 0).then(|| self.state())
    }

    /// Current progress figures.
    pub fn state(&self) -> ProgressState {
        let elapsed = self.baseline.elapsed().as_secs_f64();
        let steps_per_sec = if elapsed > 0.0 {
            self.count as f64 / elapsed
        } else {
            0.0
        };
        ProgressState {
            iterations: self.count,
            elapsed_seconds: elapsed,
            steps_per_sec,
        }
    }

    /// Steps completed so far.
    pub fn count(&self) -> u64 {
        self.count
    }
}
