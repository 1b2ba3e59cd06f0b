use std::time::Duration;

/// Running counters for the broad phase, accumulated until [`BroadPhaseStats::reset`].
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct BroadPhaseStats {
    pub create_time: Duration,
    pub destroy_time: Duration,
    pub move_time: Duration,
    pub commit_time: Duration,
    /// Time spent in `query_aabb` / `query_aabb_ids`.
    pub query_time: Duration,

    /// Adjacent bound swaps performed while relocating moved bounds.
    pub bound_swaps: u64,
    pub buffered_adds: u64,
    pub buffered_removes: u64,
    /// Stabbing-count range queries (one per axis per call).
    pub queries: u64,
    pub commits: u64,
    pub pairs_added: u64,
    pub pairs_removed: u64,
}

impl BroadPhaseStats {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Logs a summary at `info` level.
    pub fn report(&self) {
        log::info!(
            "broadphase: {} swaps, {} queries, {} commits",
            self.bound_swaps,
            self.queries,
            self.commits
        );
        log::info!(
            "  buffered +{} / -{}, committed +{} / -{}",
            self.buffered_adds,
            self.buffered_removes,
            self.pairs_added,
            self.pairs_removed
        );
        log::info!(
            "  create {:.3} ms, destroy {:.3} ms, move {:.3} ms, commit {:.3} ms, query {:.3} ms",
            millis(self.create_time),
            millis(self.destroy_time),
            millis(self.move_time),
            millis(self.commit_time),
            millis(self.query_time)
        );
    }
}

fn millis(duration: Duration) -> f32 {
    duration.as_secs_f32() * 1000.0
}
