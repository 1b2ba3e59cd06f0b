//! Boundary between the broad phase and the component that owns the overlap set.
//!
//! The broad phase only ever says "add (a, b)" or "remove (a, b)". A pair
//! manager buffers those intents for the step and turns them into finalized
//! transitions on [`PairManager::commit`].

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use crate::utils::allocator::ProxyId;

/// Unordered proxy pair, stored with the lower slot first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProxyPair {
    pub a: ProxyId,
    pub b: ProxyId,
}

impl ProxyPair {
    pub fn new(a: ProxyId, b: ProxyId) -> Self {
        if a <= b {
            Self { a, b }
        } else {
            Self { a: b, b: a }
        }
    }

    pub fn contains(&self, id: ProxyId) -> bool {
        self.a == id || self.b == id
    }

    /// The partner of `id`, if `id` is part of this pair.
    pub fn other(&self, id: ProxyId) -> Option<ProxyId> {
        if self.a == id {
            Some(self.b)
        } else if self.b == id {
            Some(self.a)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PairEventKind {
    Added,
    Removed,
}

/// A finalized overlap transition produced by a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PairEvent {
    pub pair: ProxyPair,
    pub kind: PairEventKind,
}

/// Receives overlap transitions from the broad phase.
pub trait PairManager {
    /// Called once when the broad phase is built.
    fn initialize(&mut self, _proxy_capacity: usize) {}

    /// A new overlap was detected. Repeated adds within a step collapse.
    fn add_buffered_pair(&mut self, a: ProxyId, b: ProxyId);

    /// An overlap ended. An add and a remove of the same pair within one step
    /// cancel out.
    fn remove_buffered_pair(&mut self, a: ProxyId, b: ProxyId);

    /// Flushes buffered intents into the overlap set and returns what changed.
    fn commit(&mut self) -> Vec<PairEvent>;
}

/// Reference pair manager: an authoritative pair set plus a per-step buffer in
/// which the last intent for a pair wins.
#[derive(Debug, Default)]
pub struct BufferedPairManager {
    pairs: HashSet<ProxyPair>,
    buffer: HashMap<ProxyPair, PairEventKind>,
}

impl BufferedPairManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, a: ProxyId, b: ProxyId) -> bool {
        self.pairs.contains(&ProxyPair::new(a, b))
    }

    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }

    /// Committed pairs in ascending order.
    pub fn pairs(&self) -> Vec<ProxyPair> {
        let mut pairs: Vec<_> = self.pairs.iter().copied().collect();
        pairs.sort_unstable();
        pairs
    }

    /// Intents waiting for the next commit.
    pub fn buffered_count(&self) -> usize {
        self.buffer.len()
    }
}

impl PairManager for BufferedPairManager {
    fn initialize(&mut self, proxy_capacity: usize) {
        self.pairs.reserve(proxy_capacity);
        self.buffer.reserve(proxy_capacity);
    }

    fn add_buffered_pair(&mut self, a: ProxyId, b: ProxyId) {
        debug_assert_ne!(a, b);
        self.buffer.insert(ProxyPair::new(a, b), PairEventKind::Added);
    }

    fn remove_buffered_pair(&mut self, a: ProxyId, b: ProxyId) {
        debug_assert_ne!(a, b);
        self.buffer.insert(ProxyPair::new(a, b), PairEventKind::Removed);
    }

    fn commit(&mut self) -> Vec<PairEvent> {
        let mut events: Vec<PairEvent> = self
            .buffer
            .drain()
            .filter_map(|(pair, kind)| {
                let changed = match kind {
                    PairEventKind::Added => self.pairs.insert(pair),
                    PairEventKind::Removed => self.pairs.remove(&pair),
                };
                changed.then_some(PairEvent { pair, kind })
            })
            .collect();
        events.sort_unstable_by_key(|event| event.pair);
        events
    }
}

/// User hook invoked for each committed transition, with both proxies' data.
pub trait PairCallback<T> {
    fn pair_added(&mut self, pair: ProxyPair, a: &T, b: &T);
    fn pair_removed(&mut self, pair: ProxyPair, a: &T, b: &T);
}

/// Callback that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCallback;

impl<T> PairCallback<T> for NoopCallback {
    fn pair_added(&mut self, _pair: ProxyPair, _a: &T, _b: &T) {}
    fn pair_removed(&mut self, _pair: ProxyPair, _a: &T, _b: &T) {}
}

/// Records committed events behind a shared handle.
///
/// Install one clone on the broad phase and keep another to read events back.
#[derive(Debug, Default, Clone)]
pub struct PairEventLog {
    events: Arc<Mutex<Vec<PairEvent>>>,
}

impl PairEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes every recorded event, oldest first.
    pub fn drain(&self) -> Vec<PairEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    fn push(&self, pair: ProxyPair, kind: PairEventKind) {
        self.events.lock().push(PairEvent { pair, kind });
    }
}

impl<T> PairCallback<T> for PairEventLog {
    fn pair_added(&mut self, pair: ProxyPair, _a: &T, _b: &T) {
        self.push(pair, PairEventKind::Added);
    }

    fn pair_removed(&mut self, pair: ProxyPair, _a: &T, _b: &T) {
        self.push(pair, PairEventKind::Removed);
    }
}
