//! Sweep-and-prune broad phase over quantized 2D bounds.
//!
//! Each axis keeps every live proxy's lower and upper bound in one sorted
//! array. Creating and destroying a proxy splices its bounds in or out and
//! runs a stabbing-count range query to find the proxies it overlaps. Moving a
//! proxy relocates its bounds by adjacent swaps and reports an overlap
//! transition whenever a bound crosses a bound of the opposite role.

use log::{debug, error, warn};

use crate::{
    collision::{
        aabb::Aabb,
        bound::{Bound, BoundArray, BoundKind},
        pair_manager::{
            BufferedPairManager, NoopCallback, PairCallback, PairEvent, PairEventKind, PairManager,
        },
        proxy::ProxyPool,
        quantizer::{QuantizedAabb, Quantizer},
        query::RangeQuery,
    },
    config::BroadPhaseConfig,
    error::{BroadPhaseError, Result},
    utils::{allocator::ProxyId, logging::ScopedTimer, profiling::BroadPhaseStats},
};

/// Broad phase driver owning the proxy pool, both bound arrays and the pair manager.
pub struct BroadPhase<T, P = BufferedPairManager>
where
    P: PairManager,
{
    config: BroadPhaseConfig,
    quantizer: Quantizer,
    proxies: ProxyPool<T>,
    bounds: [BoundArray; 2],
    query: RangeQuery,
    pair_manager: P,
    callback: Box<dyn PairCallback<T> + Send>,
    stats: BroadPhaseStats,
}

impl<T> BroadPhase<T, BufferedPairManager> {
    /// Broad phase over `world` with room for `max_proxies` proxies.
    pub fn new(world: Aabb, max_proxies: usize) -> Result<Self> {
        Self::with_config(BroadPhaseConfig::new(world, max_proxies))
    }

    pub fn with_config(config: BroadPhaseConfig) -> Result<Self> {
        Self::with_pair_manager(config, BufferedPairManager::new())
    }
}

impl<T, P> BroadPhase<T, P>
where
    P: PairManager,
{
    pub fn with_pair_manager(config: BroadPhaseConfig, mut pair_manager: P) -> Result<Self> {
        config.validate()?;
        let quantizer = Quantizer::new(config.world)?;
        let bound_capacity = 2 * config.max_proxies;
        pair_manager.initialize(config.max_proxies);

        Ok(Self {
            config,
            quantizer,
            proxies: ProxyPool::new(config.max_proxies),
            bounds: [
                BoundArray::with_capacity(bound_capacity),
                BoundArray::with_capacity(bound_capacity),
            ],
            query: RangeQuery::new(config.max_proxies),
            pair_manager,
            callback: Box::new(NoopCallback),
            stats: BroadPhaseStats::default(),
        })
    }

    /// Installs the hook that receives committed pair transitions.
    pub fn set_callback<C>(&mut self, callback: C)
    where
        C: PairCallback<T> + Send + 'static,
    {
        self.callback = Box::new(callback);
    }

    pub fn config(&self) -> &BroadPhaseConfig {
        &self.config
    }

    pub fn world(&self) -> &Aabb {
        self.quantizer.world()
    }

    pub fn quantizer(&self) -> &Quantizer {
        &self.quantizer
    }

    pub fn pair_manager(&self) -> &P {
        &self.pair_manager
    }

    pub fn pair_manager_mut(&mut self) -> &mut P {
        &mut self.pair_manager
    }

    pub fn stats(&self) -> &BroadPhaseStats {
        &self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    pub fn proxy_count(&self) -> usize {
        self.proxies.len()
    }

    pub fn capacity(&self) -> usize {
        self.proxies.capacity()
    }

    pub fn is_full(&self) -> bool {
        self.proxies.is_full()
    }

    /// Slot the next `create_proxy` will use, `None` when the pool is full.
    pub fn next_free_slot(&self) -> Option<usize> {
        self.proxies.free_head().map(usize::from)
    }

    /// Sorted bounds of `axis` (0 or 1), for diagnostics.
    pub fn bounds(&self, axis: usize) -> &[Bound] {
        self.bounds[axis].as_slice()
    }

    pub fn contains(&self, id: ProxyId) -> bool {
        self.proxies.resolve(id).is_some()
    }

    pub fn proxy_ids(&self) -> impl Iterator<Item = ProxyId> + '_ {
        self.proxies.ids()
    }

    pub fn user_data(&self, id: ProxyId) -> Option<&T> {
        self.proxies.user_data(id)
    }

    pub fn user_data_mut(&mut self, id: ProxyId) -> Option<&mut T> {
        self.proxies
            .get_mut(id)
            .and_then(|proxy| proxy.user_data.as_mut())
    }

    /// Whether the box last stored for `id` had to be clamped into the world.
    pub fn is_clamped(&self, id: ProxyId) -> Option<bool> {
        self.proxies.get(id).map(|proxy| proxy.clamped)
    }

    /// Whether `aabb` touches the world at all, edges included.
    pub fn in_range(&self, aabb: &Aabb) -> bool {
        self.quantizer.in_range(aabb)
    }

    /// Quantized bounds currently stored for `id`.
    pub fn fat_bounds(&self, id: ProxyId) -> Option<QuantizedAabb> {
        let index = self.proxies.resolve(id)?;
        Some(self.stored_values(index))
    }

    /// Registers `aabb` and reports every existing proxy it overlaps as a new
    /// pair. Commits the pair manager before returning.
    pub fn create_proxy(&mut self, aabb: Aabb, user_data: T) -> Result<ProxyId> {
        let timer = ScopedTimer::new("broadphase::create_proxy");
        check_geometry(&aabb)?;
        if self.proxies.is_full() {
            return Err(BroadPhaseError::PoolExhausted {
                capacity: self.proxies.capacity(),
            });
        }

        let values = self.quantizer.quantize(&aabb);
        let id = self
            .proxies
            .allocate(user_data, values.clamped)
            .ok_or_else(|| BroadPhaseError::PoolExhausted {
                capacity: self.config.max_proxies,
            })?;
        let index = id.slot();

        for axis in 0..2 {
            let (lower_index, upper_index) = self.query.query(
                &self.bounds[axis],
                &mut self.proxies,
                values.lower[axis],
                values.upper[axis],
                axis,
            );
            self.stats.queries += 1;

            self.bounds[axis].insert_pair(
                lower_index,
                upper_index,
                Bound::lower(values.lower[axis], index),
                Bound::upper(values.upper[axis], index),
            );
            self.reindex_from(axis, lower_index);
        }

        for &other in self.query.results() {
            self.pair_manager
                .add_buffered_pair(id, self.proxies.id_of(other));
            self.stats.buffered_adds += 1;
        }
        self.query.finish(&mut self.proxies);

        if values.clamped {
            debug!("{id} created outside the world, bounds clamped");
        }
        debug!("created {id}, {} live", self.proxies.len());

        self.commit_pairs();
        self.validate_if_enabled("create_proxy");
        self.stats.create_time += timer.finish();
        Ok(id)
    }

    /// Removes a proxy, reports every pair it was part of as removed and
    /// returns its user data. Commits the pair manager before the slot is
    /// released.
    pub fn destroy_proxy(&mut self, id: ProxyId) -> Result<T> {
        let timer = ScopedTimer::new("broadphase::destroy_proxy");
        let index = self.resolve(id)?;

        for axis in 0..2 {
            let proxy = self.proxies.slot(index);
            let lower_index = proxy.lower_bounds[axis] as usize;
            let upper_index = proxy.upper_bounds[axis] as usize;
            let lower_value = self.bounds[axis].get(lower_index).value;
            let upper_value = self.bounds[axis].get(upper_index).value;

            self.bounds[axis].remove_pair(lower_index, upper_index);
            self.reindex_from(axis, lower_index);

            self.query.query(
                &self.bounds[axis],
                &mut self.proxies,
                lower_value,
                upper_value,
                axis,
            );
            self.stats.queries += 1;
        }

        for &other in self.query.results() {
            self.pair_manager
                .remove_buffered_pair(id, self.proxies.id_of(other));
            self.stats.buffered_removes += 1;
        }
        self.query.finish(&mut self.proxies);

        self.commit_pairs();

        let user_data = self
            .proxies
            .release(index)
            .ok_or(BroadPhaseError::InvalidProxy(id))?;
        debug!("destroyed {id}, {} live", self.proxies.len());

        self.validate_if_enabled("destroy_proxy");
        self.stats.destroy_time += timer.finish();
        Ok(user_data)
    }

    /// Moves a proxy's box, buffering pair additions for overlaps it gains and
    /// removals for overlaps it loses. Does not commit: call [`Self::commit`]
    /// once after all moves of a step.
    pub fn move_proxy(&mut self, id: ProxyId, aabb: Aabb) -> Result<()> {
        let timer = ScopedTimer::new("broadphase::move_proxy");
        let index = self.resolve(id)?;
        check_geometry(&aabb)?;

        let new_values = self.quantizer.quantize(&aabb);
        let old_values = self.stored_values(index);
        self.proxies.slot_mut(index).clamped = new_values.clamped;

        for axis in 0..2 {
            self.relocate_bounds(id, axis, &new_values, &old_values);
        }

        self.validate_if_enabled("move_proxy");
        self.stats.move_time += timer.finish();
        Ok(())
    }

    /// Finalizes every pair transition buffered since the last commit, hands
    /// each to the installed callback and returns them.
    pub fn commit(&mut self) -> Vec<PairEvent> {
        let timer = ScopedTimer::new("broadphase::commit");
        let events = self.commit_pairs();
        self.validate_if_enabled("commit");
        self.stats.commit_time += timer.finish();
        events
    }

    /// User data of up to `max_count` proxies overlapping `aabb`.
    pub fn query_aabb(&mut self, aabb: &Aabb, max_count: usize) -> Result<Vec<T>>
    where
        T: Clone,
    {
        let ids = self.query_aabb_ids(aabb, max_count)?;
        Ok(ids
            .into_iter()
            .filter_map(|id| self.proxies.user_data(id).cloned())
            .collect())
    }

    /// Ids of up to `max_count` proxies overlapping `aabb`. Leaves the bound
    /// arrays untouched.
    pub fn query_aabb_ids(&mut self, aabb: &Aabb, max_count: usize) -> Result<Vec<ProxyId>> {
        let timer = ScopedTimer::new("broadphase::query_aabb");
        check_geometry(aabb)?;

        let values = self.quantizer.quantize(aabb);
        for axis in 0..2 {
            self.query.query(
                &self.bounds[axis],
                &mut self.proxies,
                values.lower[axis],
                values.upper[axis],
                axis,
            );
            self.stats.queries += 1;
        }

        let ids = self
            .query
            .results()
            .iter()
            .take(max_count)
            .map(|&other| self.proxies.id_of(other))
            .collect();
        self.query.finish(&mut self.proxies);
        self.stats.query_time += timer.finish();
        Ok(ids)
    }

    /// Re-derives every stabbing count and bound index from scratch and
    /// compares them with the stored state.
    pub fn validate(&self) -> Result<()> {
        for (axis, array) in self.bounds.iter().enumerate() {
            let bounds = array.as_slice();
            if bounds.len() != 2 * self.proxies.len() {
                return Err(corrupted(
                    axis,
                    bounds.len(),
                    format!(
                        "{} bounds for {} live proxies",
                        bounds.len(),
                        self.proxies.len()
                    ),
                ));
            }

            let mut stabbing_count: i64 = 0;
            for (index, bound) in bounds.iter().enumerate() {
                if index > 0 && bounds[index - 1].value > bound.value {
                    return Err(corrupted(axis, index, "values out of order".into()));
                }

                let proxy = match self.proxies.try_slot(bound.proxy) {
                    Some(proxy) if proxy.is_live() => proxy,
                    _ => {
                        return Err(corrupted(
                            axis,
                            index,
                            format!("owned by free slot {}", bound.proxy),
                        ))
                    }
                };

                let (recorded, parity_ok) = match bound.kind {
                    BoundKind::Lower => {
                        stabbing_count += 1;
                        (proxy.lower_bounds[axis], bound.value & 1 == 0)
                    }
                    BoundKind::Upper => {
                        stabbing_count -= 1;
                        (proxy.upper_bounds[axis], bound.value & 1 == 1)
                    }
                };
                if recorded as usize != index {
                    return Err(corrupted(
                        axis,
                        index,
                        format!(
                            "{:?} bound of slot {} recorded at {recorded}",
                            bound.kind, bound.proxy
                        ),
                    ));
                }
                if !parity_ok {
                    return Err(corrupted(
                        axis,
                        index,
                        format!("{:?} bound has value {}", bound.kind, bound.value),
                    ));
                }
                if i64::from(bound.stabbing_count) != stabbing_count {
                    return Err(corrupted(
                        axis,
                        index,
                        format!(
                            "stabbing count {} but {stabbing_count} intervals open",
                            bound.stabbing_count
                        ),
                    ));
                }
            }
        }
        Ok(())
    }

    fn resolve(&self, id: ProxyId) -> Result<u16> {
        self.proxies
            .resolve(id)
            .ok_or(BroadPhaseError::InvalidProxy(id))
    }

    fn stored_values(&self, index: u16) -> QuantizedAabb {
        let proxy = self.proxies.slot(index);
        let mut values = QuantizedAabb {
            clamped: proxy.clamped,
            ..QuantizedAabb::default()
        };
        for axis in 0..2 {
            values.lower[axis] = self.bounds[axis].get(proxy.lower_bounds[axis] as usize).value;
            values.upper[axis] = self.bounds[axis].get(proxy.upper_bounds[axis] as usize).value;
        }
        values
    }

    /// Points every proxy owning a bound at or after `start` back at it.
    fn reindex_from(&mut self, axis: usize, start: usize) {
        for (index, bound) in self.bounds[axis].as_slice().iter().enumerate().skip(start) {
            let proxy = self.proxies.slot_mut(bound.proxy);
            match bound.kind {
                BoundKind::Lower => proxy.lower_bounds[axis] = index as u16,
                BoundKind::Upper => proxy.upper_bounds[axis] = index as u16,
            }
        }
    }

    /// Overlap of `values` with the bounds currently stored for slot `other`.
    fn test_overlap(&self, values: &QuantizedAabb, other: u16) -> bool {
        let proxy = self.proxies.slot(other);
        (0..2).all(|axis| {
            let bounds = &self.bounds[axis];
            values.lower[axis] <= bounds.get(proxy.upper_bounds[axis] as usize).value
                && values.upper[axis] >= bounds.get(proxy.lower_bounds[axis] as usize).value
        })
    }

    /// Writes the new values for one axis and bubbles both bounds to their
    /// sorted positions. Expansion runs before shrinking.
    fn relocate_bounds(
        &mut self,
        id: ProxyId,
        axis: usize,
        new_values: &QuantizedAabb,
        old_values: &QuantizedAabb,
    ) {
        let index = id.slot();
        let lower_index = self.proxies.slot(index).lower_bounds[axis] as usize;
        let upper_index = self.proxies.slot(index).upper_bounds[axis] as usize;
        let lower_value = new_values.lower[axis];
        let upper_value = new_values.upper[axis];
        let bound_count = self.bounds[axis].len();

        self.bounds[axis].get_mut(lower_index).value = lower_value;
        self.bounds[axis].get_mut(upper_index).value = upper_value;

        // Lower bound moving down: passing an upper bound may start an overlap.
        if lower_value < old_values.lower[axis] {
            let mut current = lower_index;
            while current > 0 && lower_value < self.bounds[axis].get(current - 1).value {
                let prev = *self.bounds[axis].get(current - 1);
                self.bounds[axis].get_mut(current - 1).stabbing_count += 1;

                if prev.is_upper() {
                    if self.test_overlap(new_values, prev.proxy) {
                        self.buffer_add(id, prev.proxy);
                    }
                    self.proxies.slot_mut(prev.proxy).upper_bounds[axis] += 1;
                    self.bounds[axis].get_mut(current).stabbing_count += 1;
                } else {
                    self.proxies.slot_mut(prev.proxy).lower_bounds[axis] += 1;
                    self.bounds[axis].get_mut(current).stabbing_count -= 1;
                }

                self.proxies.slot_mut(index).lower_bounds[axis] -= 1;
                self.bounds[axis].swap(current, current - 1);
                self.stats.bound_swaps += 1;
                current -= 1;
            }
        }

        // Upper bound moving up: passing a lower bound may start an overlap.
        if upper_value > old_values.upper[axis] {
            let mut current = upper_index;
            while current + 1 < bound_count
                && self.bounds[axis].get(current + 1).value <= upper_value
            {
                let next = *self.bounds[axis].get(current + 1);
                self.bounds[axis].get_mut(current + 1).stabbing_count += 1;

                if next.is_lower() {
                    if self.test_overlap(new_values, next.proxy) {
                        self.buffer_add(id, next.proxy);
                    }
                    self.proxies.slot_mut(next.proxy).lower_bounds[axis] -= 1;
                    self.bounds[axis].get_mut(current).stabbing_count += 1;
                } else {
                    self.proxies.slot_mut(next.proxy).upper_bounds[axis] -= 1;
                    self.bounds[axis].get_mut(current).stabbing_count -= 1;
                }

                self.proxies.slot_mut(index).upper_bounds[axis] += 1;
                self.bounds[axis].swap(current, current + 1);
                self.stats.bound_swaps += 1;
                current += 1;
            }
        }

        // Lower bound moving up: passing an upper bound may end an overlap.
        if lower_value > old_values.lower[axis] {
            let mut current = lower_index;
            while current + 1 < bound_count
                && self.bounds[axis].get(current + 1).value <= lower_value
            {
                let next = *self.bounds[axis].get(current + 1);
                self.bounds[axis].get_mut(current + 1).stabbing_count -= 1;

                if next.is_upper() {
                    if self.test_overlap(old_values, next.proxy) {
                        self.buffer_remove(id, next.proxy);
                    }
                    self.proxies.slot_mut(next.proxy).upper_bounds[axis] -= 1;
                    self.bounds[axis].get_mut(current).stabbing_count -= 1;
                } else {
                    self.proxies.slot_mut(next.proxy).lower_bounds[axis] -= 1;
                    self.bounds[axis].get_mut(current).stabbing_count += 1;
                }

                self.proxies.slot_mut(index).lower_bounds[axis] += 1;
                self.bounds[axis].swap(current, current + 1);
                self.stats.bound_swaps += 1;
                current += 1;
            }
        }

        // Upper bound moving down: passing a lower bound may end an overlap.
        if upper_value < old_values.upper[axis] {
            let mut current = upper_index;
            while current > 0 && upper_value < self.bounds[axis].get(current - 1).value {
                let prev = *self.bounds[axis].get(current - 1);
                self.bounds[axis].get_mut(current - 1).stabbing_count -= 1;

                if prev.is_lower() {
                    if self.test_overlap(old_values, prev.proxy) {
                        self.buffer_remove(id, prev.proxy);
                    }
                    self.proxies.slot_mut(prev.proxy).lower_bounds[axis] += 1;
                    self.bounds[axis].get_mut(current).stabbing_count -= 1;
                } else {
                    self.proxies.slot_mut(prev.proxy).upper_bounds[axis] += 1;
                    self.bounds[axis].get_mut(current).stabbing_count += 1;
                }

                self.proxies.slot_mut(index).upper_bounds[axis] -= 1;
                self.bounds[axis].swap(current, current - 1);
                self.stats.bound_swaps += 1;
                current -= 1;
            }
        }
    }

    fn buffer_add(&mut self, id: ProxyId, other: u16) {
        let other = self.proxies.id_of(other);
        self.pair_manager.add_buffered_pair(id, other);
        self.stats.buffered_adds += 1;
    }

    fn buffer_remove(&mut self, id: ProxyId, other: u16) {
        let other = self.proxies.id_of(other);
        self.pair_manager.remove_buffered_pair(id, other);
        self.stats.buffered_removes += 1;
    }

    fn commit_pairs(&mut self) -> Vec<PairEvent> {
        let events = self.pair_manager.commit();
        self.stats.commits += 1;

        for event in &events {
            let pair = event.pair;
            let (Some(a), Some(b)) = (
                self.proxies.user_data(pair.a),
                self.proxies.user_data(pair.b),
            ) else {
                warn!(
                    "committed {:?} for {} / {} without live user data",
                    event.kind, pair.a, pair.b
                );
                continue;
            };
            match event.kind {
                PairEventKind::Added => {
                    self.stats.pairs_added += 1;
                    self.callback.pair_added(pair, a, b);
                }
                PairEventKind::Removed => {
                    self.stats.pairs_removed += 1;
                    self.callback.pair_removed(pair, a, b);
                }
            }
        }

        events
    }

    fn validate_if_enabled(&self, operation: &str) {
        if !self.config.validate_each_operation {
            return;
        }
        if let Err(err) = self.validate() {
            error!("broad phase invalid after {operation}: {err}");
        }
    }
}

fn check_geometry(aabb: &Aabb) -> Result<()> {
    if aabb.is_valid() {
        Ok(())
    } else {
        Err(BroadPhaseError::InvalidGeometry {
            min: aabb.min,
            max: aabb.max,
        })
    }
}

fn corrupted(axis: usize, index: usize, reason: String) -> BroadPhaseError {
    BroadPhaseError::Corrupted {
        axis,
        index,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn world() -> Aabb {
        Aabb::from_coords(0.0, 0.0, 100.0, 100.0)
    }

    #[test]
    fn move_keeps_bound_indices_in_sync() {
        let mut broadphase: BroadPhase<u32> = BroadPhase::new(world(), 8).unwrap();
        let a = broadphase
            .create_proxy(Aabb::from_coords(10.0, 10.0, 20.0, 20.0), 0)
            .unwrap();
        let b = broadphase
            .create_proxy(Aabb::from_coords(50.0, 50.0, 60.0, 60.0), 1)
            .unwrap();

        broadphase
            .move_proxy(a, Aabb::from_coords(70.0, 5.0, 80.0, 15.0))
            .unwrap();
        broadphase.validate().unwrap();

        let proxy = broadphase.proxies.slot(a.slot());
        assert_eq!(proxy.lower_bounds[0], 2);
        assert_eq!(proxy.upper_bounds[0], 3);
        assert_eq!(proxy.lower_bounds[1], 0);
        assert_eq!(proxy.upper_bounds[1], 1);
        assert!(broadphase.stats().bound_swaps >= 2);
        assert!(broadphase.contains(b));
    }

    #[test]
    fn failed_operations_leave_state_untouched() {
        let mut broadphase: BroadPhase<u32> = BroadPhase::new(world(), 1).unwrap();
        let a = broadphase
            .create_proxy(Aabb::from_coords(10.0, 10.0, 20.0, 20.0), 0)
            .unwrap();
        let before: Vec<Bound> = broadphase.bounds(0).to_vec();

        assert!(broadphase
            .move_proxy(a, Aabb::from_coords(30.0, 30.0, 30.0, 40.0))
            .is_err());
        assert!(broadphase
            .create_proxy(Aabb::from_coords(1.0, 1.0, 2.0, 2.0), 1)
            .is_err());

        assert_eq!(broadphase.bounds(0), before.as_slice());
        assert_eq!(broadphase.query.time_stamp(), 2);
        broadphase.validate().unwrap();
    }

    #[test]
    fn operation_timings_accumulate_only_on_success() {
        let mut broadphase: BroadPhase<u32> = BroadPhase::new(world(), 4).unwrap();
        let a = broadphase
            .create_proxy(Aabb::from_coords(10.0, 10.0, 20.0, 20.0), 0)
            .unwrap();

        assert!(broadphase
            .move_proxy(a, Aabb::from_coords(5.0, 5.0, 5.0, 5.0))
            .is_err());
        assert_eq!(broadphase.stats().move_time, Duration::ZERO);

        broadphase
            .move_proxy(a, Aabb::from_coords(30.0, 30.0, 40.0, 40.0))
            .unwrap();
        broadphase.commit();
        broadphase.query_aabb_ids(&world(), usize::MAX).unwrap();
        broadphase.destroy_proxy(a).unwrap();

        let stats = *broadphase.stats();
        assert!(stats.create_time > Duration::ZERO);
        assert!(stats.move_time > Duration::ZERO);
        assert!(stats.commit_time > Duration::ZERO);
        assert!(stats.query_time > Duration::ZERO);
        assert!(stats.destroy_time > Duration::ZERO);

        broadphase.reset_stats();
        assert_eq!(*broadphase.stats(), BroadPhaseStats::default());
    }

    #[test]
    fn validate_reports_corrupted_stabbing_count() {
        let mut broadphase: BroadPhase<()> = BroadPhase::new(world(), 4).unwrap();
        broadphase
            .create_proxy(Aabb::from_coords(10.0, 10.0, 20.0, 20.0), ())
            .unwrap();
        broadphase.bounds[1].get_mut(0).stabbing_count = 5;

        match broadphase.validate() {
            Err(BroadPhaseError::Corrupted { axis, index, .. }) => {
                assert_eq!((axis, index), (1, 0));
            }
            other => panic!("expected corruption, got {other:?}"),
        }
    }
}
