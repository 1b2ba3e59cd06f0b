use serde::{Deserialize, Serialize};
use std::fmt;

/// Slot index marking "no proxy" in free-list links and bound owners.
pub const NULL_PROXY: u16 = u16::MAX;

/// Proxy identifier with generation tracking to reject stale references.
///
/// The index is the proxy's slot in the fixed pool and stays compact so it can
/// key pairs and query results directly. The generation is bumped every time a
/// slot is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct ProxyId {
    index: u16,
    generation: u32,
}

impl ProxyId {
    pub fn new(index: u16, generation: u32) -> Self {
        Self { index, generation }
    }

    pub fn index(&self) -> usize {
        self.index as usize
    }

    pub(crate) fn slot(&self) -> u16 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn is_null(&self) -> bool {
        self.index == NULL_PROXY
    }
}

impl Default for ProxyId {
    fn default() -> Self {
        Self::new(NULL_PROXY, 0)
    }
}

impl fmt::Display for ProxyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "proxy#null")
        } else {
            write!(f, "proxy#{}v{}", self.index, self.generation)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_order_by_slot_first() {
        let a = ProxyId::new(1, 9);
        let b = ProxyId::new(2, 0);
        assert!(a < b);
        assert_eq!(a.index(), 1);
        assert_eq!(a.generation(), 9);
    }

    #[test]
    fn default_id_is_null() {
        assert!(ProxyId::default().is_null());
        assert_eq!(ProxyId::default().to_string(), "proxy#null");
        assert_eq!(ProxyId::new(3, 2).to_string(), "proxy#3v2");
    }
}
