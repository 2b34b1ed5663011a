use alloc::vec::Vec;

use crate::fenwick::Fenwick;
use crate::units::extent_from_host;

/// Per-index item extents for lists whose items are measured after paint.
///
/// Every index has an extent: either a recorded measurement, a seeded hint, or the default
/// extent. Indexes past [`ExtentStore::len`] read as the default.
///
/// Prefix sums are kept in a Fenwick tree, so offsets, totals and offset → index lookups are
/// `O(log n)` and a measurement update is `O(log n)`.
#[derive(Clone, Debug)]
pub struct ExtentStore {
    default_extent: u32,
    extents: Vec<u32>,
    measured: Vec<bool>,
    sums: Fenwick,
}

impl ExtentStore {
    /// Creates a store of `len` unmeasured items, all at `default_extent`.
    pub fn new(len: usize, default_extent: u32) -> Self {
        Self::with_hints(len, default_extent, |_| None)
    }

    /// Creates a store of `len` unmeasured items, seeding each index from `hint(i)`.
    ///
    /// Indexes for which `hint` returns `None` start at `default_extent`.
    pub fn with_hints(
        len: usize,
        default_extent: u32,
        hint: impl Fn(usize) -> Option<u32>,
    ) -> Self {
        let mut store = Self {
            default_extent,
            extents: Vec::new(),
            measured: Vec::new(),
            sums: Fenwick::default(),
        };
        store.reset_with(len, hint);
        store
    }

    pub fn len(&self) -> usize {
        self.extents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extents.is_empty()
    }

    pub fn default_extent(&self) -> u32 {
        self.default_extent
    }

    /// Returns the extent of `index`, falling back to the default extent.
    pub fn get(&self, index: usize) -> u32 {
        self.extents
            .get(index)
            .copied()
            .unwrap_or(self.default_extent)
    }

    /// Records a measured extent and returns the change applied to the total.
    ///
    /// Indexes at or past `len()` are ignored and return `0`.
    pub fn set(&mut self, index: usize, extent: u32) -> i64 {
        let Some(slot) = self.extents.get_mut(index) else {
            return 0;
        };
        self.measured[index] = true;
        let delta = extent as i64 - *slot as i64;
        if delta != 0 {
            *slot = extent;
            self.sums.add(index, delta);
        }
        delta
    }

    /// Records a measurement reported by a host.
    ///
    /// Negative and non-finite measurements are rejected and leave the store untouched
    /// (`None`). Fractional values round to the nearest whole unit.
    pub fn set_measured(&mut self, index: usize, extent: f64) -> Option<i64> {
        let Some(extent) = extent_from_host(extent) else {
            vwarn!(index, extent, "ExtentStore: rejected measurement");
            return None;
        };
        if index >= self.len() {
            return None;
        }
        Some(self.set(index, extent))
    }

    pub fn is_measured(&self, index: usize) -> bool {
        self.measured.get(index).copied().unwrap_or(false)
    }

    pub fn measured_count(&self) -> usize {
        self.measured.iter().filter(|m| **m).count()
    }

    /// Sum of `get(i)` for `i` in `0..item_count`.
    pub fn total_extent(&self, item_count: usize) -> u64 {
        self.offset_of(item_count)
    }

    /// Start offset of `index`: the sum of every extent before it.
    pub fn offset_of(&self, index: usize) -> u64 {
        let len = self.len();
        if index <= len {
            return self.sums.prefix_sum(index);
        }
        let tail = ((index - len) as u64).saturating_mul(self.default_extent as u64);
        self.sums.total().saturating_add(tail)
    }

    /// Returns the index of the item whose span contains `offset`.
    ///
    /// Offsets at or past the end map to the last item. Returns `None` for an empty store.
    pub fn index_at_offset(&self, offset: u64) -> Option<usize> {
        let len = self.len();
        if len == 0 {
            return None;
        }
        Some(self.sums.lower_bound(offset).min(len - 1))
    }

    /// Grows or shrinks to `len` items, keeping the extents of surviving indexes.
    pub fn resize(&mut self, len: usize) {
        self.resize_with(len, |_| None);
    }

    /// Like [`ExtentStore::resize`], seeding appended indexes from `hint(i)`.
    pub fn resize_with(&mut self, len: usize, hint: impl Fn(usize) -> Option<u32>) {
        let cur = self.len();
        if len <= cur {
            self.extents.truncate(len);
            self.measured.truncate(len);
            self.sums.truncate(len);
            return;
        }
        self.extents.reserve_exact(len - cur);
        self.measured.reserve_exact(len - cur);
        for i in cur..len {
            let extent = hint(i).unwrap_or(self.default_extent);
            self.extents.push(extent);
            self.measured.push(false);
            self.sums.push(extent);
        }
        debug_assert_eq!(self.sums.len(), self.extents.len());
    }

    /// Discards every measurement and reseeds `len` items from `hint(i)`.
    pub fn reset_with(&mut self, len: usize, hint: impl Fn(usize) -> Option<u32>) {
        let default_extent = self.default_extent;
        self.extents.clear();
        self.measured.clear();
        self.extents
            .extend((0..len).map(|i| hint(i).unwrap_or(default_extent)));
        self.measured.resize(len, false);
        self.sums = Fenwick::from_extents(&self.extents);
        vdebug!(len, total = self.sums.total(), "ExtentStore::reset_with");
    }
}
