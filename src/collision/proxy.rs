//! Proxy bookkeeping and the fixed-capacity pool that owns it.

use crate::{
    collision::bound::INVALID_BOUND,
    utils::allocator::{ProxyId, NULL_PROXY},
};

/// How many axes a proxy has been found overlapping during the current query.
///
/// Outside a query batch every live proxy reads `Zero`; `Invalid` marks a free
/// slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapCount {
    Zero,
    One,
    Two,
    /// Slot is free.
    Invalid,
}

/// Per-proxy state. Slot indices are stable for the proxy's lifetime.
#[derive(Debug, Clone)]
pub struct Proxy<T> {
    pub lower_bounds: [u16; 2],
    pub upper_bounds: [u16; 2],
    pub overlap: OverlapCount,
    pub time_stamp: u16,
    /// Free-list link, only meaningful while the slot is free.
    pub next: u16,
    pub generation: u32,
    /// The last box stored for this proxy was clamped into the world.
    pub clamped: bool,
    pub user_data: Option<T>,
}

impl<T> Proxy<T> {
    fn free(next: u16) -> Self {
        Self {
            lower_bounds: [INVALID_BOUND; 2],
            upper_bounds: [INVALID_BOUND; 2],
            overlap: OverlapCount::Invalid,
            time_stamp: 0,
            next,
            generation: 0,
            clamped: false,
            user_data: None,
        }
    }

    pub fn is_live(&self) -> bool {
        self.overlap != OverlapCount::Invalid
    }
}

/// Fixed pool of proxy slots with a singly linked free list threaded through
/// [`Proxy::next`].
#[derive(Debug)]
pub struct ProxyPool<T> {
    proxies: Vec<Proxy<T>>,
    free_head: u16,
    live: usize,
}

impl<T> ProxyPool<T> {
    /// All slots start free and chained in index order.
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity < NULL_PROXY as usize);
        let proxies = (0..capacity)
            .map(|index| {
                let next = if index + 1 < capacity {
                    (index + 1) as u16
                } else {
                    NULL_PROXY
                };
                Proxy::free(next)
            })
            .collect();

        Self {
            proxies,
            free_head: if capacity == 0 { NULL_PROXY } else { 0 },
            live: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.proxies.len()
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn is_full(&self) -> bool {
        self.free_head == NULL_PROXY
    }

    /// Head of the free list, `None` when exhausted.
    pub fn free_head(&self) -> Option<u16> {
        (self.free_head != NULL_PROXY).then_some(self.free_head)
    }

    /// Pops a free slot and marks it live. Bound indices are left for the
    /// caller to fill in.
    pub fn allocate(&mut self, user_data: T, clamped: bool) -> Option<ProxyId> {
        let index = self.free_head()?;
        let proxy = &mut self.proxies[index as usize];
        self.free_head = proxy.next;

        proxy.next = NULL_PROXY;
        proxy.overlap = OverlapCount::Zero;
        proxy.time_stamp = 0;
        proxy.clamped = clamped;
        proxy.user_data = Some(user_data);
        self.live += 1;

        Some(ProxyId::new(index, proxy.generation))
    }

    /// Returns a live slot to the free list and hands back its user data.
    pub fn release(&mut self, index: u16) -> Option<T> {
        let proxy = self.proxies.get_mut(index as usize)?;
        if !proxy.is_live() {
            return None;
        }

        proxy.lower_bounds = [INVALID_BOUND; 2];
        proxy.upper_bounds = [INVALID_BOUND; 2];
        proxy.overlap = OverlapCount::Invalid;
        proxy.clamped = false;
        proxy.generation = proxy.generation.wrapping_add(1);
        proxy.next = self.free_head;
        self.free_head = index;
        self.live -= 1;

        proxy.user_data.take()
    }

    /// Slot index for `id` if it names a live proxy of the current generation.
    pub fn resolve(&self, id: ProxyId) -> Option<u16> {
        let proxy = self.proxies.get(id.index())?;
        (proxy.is_live() && proxy.generation == id.generation()).then_some(id.slot())
    }

    pub fn get(&self, id: ProxyId) -> Option<&Proxy<T>> {
        self.resolve(id).map(|index| &self.proxies[index as usize])
    }

    pub fn get_mut(&mut self, id: ProxyId) -> Option<&mut Proxy<T>> {
        let index = self.resolve(id)?;
        Some(&mut self.proxies[index as usize])
    }

    pub fn user_data(&self, id: ProxyId) -> Option<&T> {
        self.get(id).and_then(|proxy| proxy.user_data.as_ref())
    }

    /// Current id for a slot index.
    #[inline]
    pub fn id_of(&self, index: u16) -> ProxyId {
        ProxyId::new(index, self.proxies[index as usize].generation)
    }

    /// Unchecked slot access for the bound arrays' internal indices.
    #[inline]
    pub fn slot(&self, index: u16) -> &Proxy<T> {
        &self.proxies[index as usize]
    }

    #[inline]
    pub fn slot_mut(&mut self, index: u16) -> &mut Proxy<T> {
        &mut self.proxies[index as usize]
    }

    pub fn try_slot(&self, index: u16) -> Option<&Proxy<T>> {
        self.proxies.get(index as usize)
    }

    /// Ids of all live proxies in slot order.
    pub fn ids(&self) -> impl Iterator<Item = ProxyId> + '_ {
        self.proxies
            .iter()
            .enumerate()
            .filter(|(_, proxy)| proxy.is_live())
            .map(|(index, proxy)| ProxyId::new(index as u16, proxy.generation))
    }

    pub fn reset_time_stamps(&mut self) {
        for proxy in &mut self.proxies {
            proxy.time_stamp = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocation_follows_free_list_and_exhausts() {
        let mut pool: ProxyPool<&str> = ProxyPool::new(2);
        assert_eq!(pool.free_head(), Some(0));

        let a = pool.allocate("a", false).unwrap();
        let b = pool.allocate("b", false).unwrap();
        assert_eq!((a.index(), b.index()), (0, 1));
        assert!(pool.is_full());
        assert!(pool.allocate("c", false).is_none());
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn release_recycles_slot_and_invalidates_old_id() {
        let mut pool: ProxyPool<u32> = ProxyPool::new(4);
        let a = pool.allocate(7, false).unwrap();
        let _b = pool.allocate(8, false).unwrap();

        assert_eq!(pool.release(a.slot()), Some(7));
        assert_eq!(pool.free_head(), Some(0));
        assert!(pool.resolve(a).is_none());
        assert!(pool.release(a.slot()).is_none());

        let c = pool.allocate(9, false).unwrap();
        assert_eq!(c.index(), a.index());
        assert_ne!(c.generation(), a.generation());
        assert_eq!(pool.user_data(c), Some(&9));
        assert_eq!(pool.user_data(a), None);

        let proxy = pool.slot(c.slot());
        assert_eq!(proxy.overlap, OverlapCount::Zero);
    }

    #[test]
    fn released_slot_has_invalid_bounds() {
        let mut pool: ProxyPool<()> = ProxyPool::new(1);
        let id = pool.allocate((), true).unwrap();
        pool.slot_mut(id.slot()).lower_bounds = [0, 0];
        pool.release(id.slot());

        let proxy = pool.slot(id.slot());
        assert_eq!(proxy.lower_bounds, [INVALID_BOUND; 2]);
        assert_eq!(proxy.upper_bounds, [INVALID_BOUND; 2]);
        assert!(!proxy.is_live());
        assert_eq!(pool.ids().count(), 0);
    }
}
