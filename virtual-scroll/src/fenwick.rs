use alloc::vec::Vec;
use core::cmp;

/// Prefix sums over per-item extents.
///
/// `tree[i]` (1-indexed) holds the sum of the `lsb(i)` extents ending at item `i - 1`.
#[derive(Clone, Debug)]
pub(crate) struct Fenwick {
    tree: Vec<u64>,
    total: u64,
    top_bit: usize,
}

impl Default for Fenwick {
    fn default() -> Self {
        Self::from_extents(&[])
    }
}

impl Fenwick {
    pub(crate) fn from_extents(extents: &[u32]) -> Self {
        let n = extents.len();
        let mut tree = alloc::vec![0u64; n + 1];
        let mut total = 0u64;
        for i in 1..=n {
            let v = extents[i - 1] as u64;
            total = total.saturating_add(v);
            tree[i] = tree[i].saturating_add(v);
            let parent = i + lsb(i);
            if parent <= n {
                tree[parent] = tree[parent].saturating_add(tree[i]);
            }
        }
        Self {
            tree,
            total,
            top_bit: top_bit(n),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.tree.len().saturating_sub(1)
    }

    pub(crate) fn total(&self) -> u64 {
        self.total
    }

    /// Drops every item at or after `len`.
    pub(crate) fn truncate(&mut self, len: usize) {
        if len >= self.len() {
            return;
        }
        self.total = self.prefix_sum(len);
        self.tree.truncate(len + 1);
        self.top_bit = top_bit(len);
    }

    /// Appends one item in `O(log n)`.
    pub(crate) fn push(&mut self, extent: u32) {
        let value = extent as u64;
        let i = self.len() + 1;
        // The new node covers (i - lsb(i), i]; everything but the new item is already summed.
        let covered = self
            .prefix_sum(i - 1)
            .saturating_sub(self.prefix_sum(i - lsb(i)));
        self.tree.push(covered.saturating_add(value));
        self.total = self.total.saturating_add(value);
        self.top_bit = top_bit(i);
    }

    pub(crate) fn add(&mut self, index: usize, delta: i64) {
        let n = self.len();
        if index >= n || delta == 0 {
            return;
        }
        self.total = apply_delta(self.total, delta);
        let mut i = index + 1;
        while i <= n {
            self.tree[i] = apply_delta(self.tree[i], delta);
            i += lsb(i);
        }
    }

    /// Sum of the first `count` extents.
    pub(crate) fn prefix_sum(&self, count: usize) -> u64 {
        let mut i = cmp::min(count, self.len());
        let mut sum = 0u64;
        while i > 0 {
            sum = sum.saturating_add(self.tree[i]);
            i &= i - 1;
        }
        sum
    }

    /// Returns the largest `count` such that `prefix_sum(count) <= target`.
    ///
    /// With non-negative extents this is the index of the first item whose end lies past
    /// `target`, i.e. the item containing offset `target` (or `len` past the end).
    pub(crate) fn lower_bound(&self, mut target: u64) -> usize {
        let n = self.len();
        let mut idx = 0usize;
        let mut bit = self.top_bit;
        while bit != 0 {
            let next = idx + bit;
            if next <= n && self.tree[next] <= target {
                target -= self.tree[next];
                idx = next;
            }
            bit >>= 1;
        }
        idx
    }
}

fn apply_delta(value: u64, delta: i64) -> u64 {
    if delta >= 0 {
        value.saturating_add(delta as u64)
    } else {
        debug_assert!(
            value >= delta.unsigned_abs(),
            "Fenwick underflow (value={value}, delta={delta})"
        );
        value.saturating_sub(delta.unsigned_abs())
    }
}

fn lsb(i: usize) -> usize {
    i & i.wrapping_neg()
}

fn top_bit(n: usize) -> usize {
    if n == 0 {
        0
    } else {
        1 << (usize::BITS - 1 - n.leading_zeros())
    }
}
