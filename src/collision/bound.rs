//! Quantized interval endpoints and the per-axis sorted bound array.

use std::cmp::Ordering;

/// Sentinel for bound indices of a free proxy.
pub const INVALID_BOUND: u16 = u16::MAX;

/// Which end of a proxy's interval a bound represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundKind {
    Lower,
    Upper,
}

/// One endpoint of a proxy's extent on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bound {
    pub value: u16,
    /// Slot index of the owning proxy.
    pub proxy: u16,
    /// Intervals open immediately after this position in sweep order.
    /// A lower bound counts its own interval, an upper bound does not.
    pub stabbing_count: u16,
    pub kind: BoundKind,
}

impl Bound {
    pub fn lower(value: u16, proxy: u16) -> Self {
        Self {
            value,
            proxy,
            stabbing_count: 0,
            kind: BoundKind::Lower,
        }
    }

    pub fn upper(value: u16, proxy: u16) -> Self {
        Self {
            value,
            proxy,
            stabbing_count: 0,
            kind: BoundKind::Upper,
        }
    }

    #[inline]
    pub fn is_lower(&self) -> bool {
        self.kind == BoundKind::Lower
    }

    #[inline]
    pub fn is_upper(&self) -> bool {
        self.kind == BoundKind::Upper
    }
}

/// Bounds of every live proxy on one axis, kept sorted by value.
///
/// Storage is reserved once for the full pool so splicing never reallocates.
#[derive(Debug, Clone, Default)]
pub struct BoundArray {
    bounds: Vec<Bound>,
}

impl BoundArray {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bounds: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    pub fn as_slice(&self) -> &[Bound] {
        &self.bounds
    }

    #[inline]
    pub fn get(&self, index: usize) -> &Bound {
        &self.bounds[index]
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> &mut Bound {
        &mut self.bounds[index]
    }

    #[inline]
    pub fn swap(&mut self, a: usize, b: usize) {
        self.bounds.swap(a, b);
    }

    /// Index of a bound with exactly `value`, or the insertion point that keeps
    /// the array sorted. Among equal values any match may be returned.
    pub fn binary_search(&self, value: u16) -> usize {
        let mut low = 0;
        let mut high = self.bounds.len();
        while low < high {
            let mid = (low + high) / 2;
            match self.bounds[mid].value.cmp(&value) {
                Ordering::Greater => high = mid,
                Ordering::Less => low = mid + 1,
                Ordering::Equal => return mid,
            }
        }
        low
    }

    /// Splices a lower/upper pair in at positions found against the current
    /// array (`lower_index <= upper_index`) and fixes stabbing counts for the new
    /// interval. Returns the final index of the upper bound.
    pub fn insert_pair(
        &mut self,
        lower_index: usize,
        upper_index: usize,
        mut lower: Bound,
        mut upper: Bound,
    ) -> usize {
        debug_assert!(lower_index <= upper_index);
        debug_assert!(lower.value < upper.value);

        self.bounds.insert(upper_index, upper);
        self.bounds.insert(lower_index, lower);
        let upper_index = upper_index + 1;

        lower.stabbing_count = if lower_index == 0 {
            0
        } else {
            self.bounds[lower_index - 1].stabbing_count
        };
        self.bounds[lower_index] = lower;
        upper.stabbing_count = self.bounds[upper_index - 1].stabbing_count;
        self.bounds[upper_index] = upper;

        for bound in &mut self.bounds[lower_index..upper_index] {
            bound.stabbing_count += 1;
        }

        upper_index
    }

    /// Removes a proxy's lower/upper pair and drops its interval from the
    /// stabbing counts of the bounds that sat between them.
    pub fn remove_pair(&mut self, lower_index: usize, upper_index: usize) {
        debug_assert!(lower_index < upper_index);

        self.bounds.remove(upper_index);
        self.bounds.remove(lower_index);

        for bound in &mut self.bounds[lower_index..upper_index - 1] {
            bound.stabbing_count -= 1;
        }
    }
}
