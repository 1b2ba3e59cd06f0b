//! Stabbing-count range queries over a single axis's bound array.
//!
//! A query runs once per axis against the same generation. The first axis
//! marks every proxy it finds, the second promotes marked proxies into the
//! result set, so only proxies overlapping on both axes are reported. Finishing
//! a batch returns every marked proxy's count to `Zero` and bumps the
//! generation, which invalidates the time stamps without sweeping the pool.

use crate::collision::{
    bound::BoundArray,
    proxy::{OverlapCount, ProxyPool},
};

/// Generation counter and result buffer shared by all queries of one broad phase.
#[derive(Debug)]
pub struct RangeQuery {
    time_stamp: u16,
    results: Vec<u16>,
    /// Every slot marked this generation, found on one axis or both.
    marked: Vec<u16>,
}

impl RangeQuery {
    pub fn new(capacity: usize) -> Self {
        Self {
            time_stamp: 1,
            results: Vec::with_capacity(capacity),
            marked: Vec::with_capacity(capacity),
        }
    }

    pub fn time_stamp(&self) -> u16 {
        self.time_stamp
    }

    /// Slot indices found overlapping on both axes so far this generation.
    pub fn results(&self) -> &[u16] {
        &self.results
    }

    /// Marks every proxy whose interval on `axis` overlaps
    /// `[lower_value, upper_value]` and returns the search positions
    /// `(lower_query, upper_query)` for the two values.
    pub fn query<T>(
        &mut self,
        bounds: &BoundArray,
        proxies: &mut ProxyPool<T>,
        lower_value: u16,
        upper_value: u16,
        axis: usize,
    ) -> (usize, usize) {
        let lower_query = bounds.binary_search(lower_value);
        let upper_query = bounds.binary_search(upper_value);

        // Intervals starting inside the query range.
        for index in lower_query..upper_query {
            let bound = bounds.get(index);
            if bound.is_lower() {
                self.increment_overlap_count(proxies, bound.proxy);
            }
        }

        // Intervals starting before the range and still open at it. The
        // stabbing count just left of the range says how many there are.
        if lower_query > 0 {
            let mut index = lower_query - 1;
            let mut remaining = bounds.get(index).stabbing_count;

            while remaining > 0 {
                let bound = bounds.get(index);
                if bound.is_lower() {
                    let upper_index = proxies.slot(bound.proxy).upper_bounds[axis] as usize;
                    if lower_query <= upper_index {
                        self.increment_overlap_count(proxies, bound.proxy);
                        remaining -= 1;
                    }
                }
                if index == 0 {
                    debug_assert_eq!(remaining, 0, "stabbing count exceeds open intervals");
                    break;
                }
                index -= 1;
            }
        }

        (lower_query, upper_query)
    }

    fn increment_overlap_count<T>(&mut self, proxies: &mut ProxyPool<T>, index: u16) {
        let proxy = proxies.slot_mut(index);
        if proxy.time_stamp < self.time_stamp {
            proxy.time_stamp = self.time_stamp;
            proxy.overlap = OverlapCount::One;
            self.marked.push(index);
        } else {
            proxy.overlap = OverlapCount::Two;
            self.results.push(index);
        }
    }

    /// Ends a query batch: clears the marks and results and advances the
    /// generation.
    pub fn finish<T>(&mut self, proxies: &mut ProxyPool<T>) {
        for &index in &self.marked {
            proxies.slot_mut(index).overlap = OverlapCount::Zero;
        }
        self.marked.clear();
        self.results.clear();
        self.increment_time_stamp(proxies);
    }

    fn increment_time_stamp<T>(&mut self, proxies: &mut ProxyPool<T>) {
        if self.time_stamp == u16::MAX {
            proxies.reset_time_stamps();
            self.time_stamp = 1;
        } else {
            self.time_stamp += 1;
        }
    }
}
