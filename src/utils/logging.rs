use log::{log_enabled, trace, Level};
use std::time::{Duration, Instant};

/// Timing guard for one broad-phase operation.
///
/// [`ScopedTimer::finish`] stops the clock and hands the elapsed time back so
/// it can be added to [`BroadPhaseStats`](crate::utils::profiling::BroadPhaseStats).
/// A guard dropped without `finish` (early return, rejected input) still logs
/// how long the operation ran before it bailed out.
pub struct ScopedTimer {
    label: &'static str,
    start: Instant,
    finished: bool,
}

impl ScopedTimer {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
            finished: false,
        }
    }

    /// Stops the timer, traces the duration and returns it.
    pub fn finish(mut self) -> Duration {
        let elapsed = self.start.elapsed();
        self.finished = true;
        if log_enabled!(Level::Trace) {
            trace!("{} took {} µs", self.label, elapsed.as_micros());
        }
        elapsed
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        if !self.finished && log_enabled!(Level::Trace) {
            trace!(
                "{} ended early after {} µs",
                self.label,
                self.start.elapsed().as_micros()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finish_reports_at_least_the_time_spent() {
        let timer = ScopedTimer::new("test::sleep");
        std::thread::sleep(Duration::from_millis(2));
        assert!(timer.finish() >= Duration::from_millis(2));
    }
}
