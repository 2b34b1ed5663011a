//! Pure window computation.
//!
//! Nothing here holds state or fails: given the extents, a scroll offset, a viewport length and
//! an overscan count, it produces the contiguous window of items to paint.

use crate::{ExtentStore, ItemPosition, VisibleItem, VisibleRange};

/// Where item extents come from for a single computation.
#[derive(Clone, Copy, Debug)]
pub enum Layout<'a> {
    Fixed { extent: u32 },
    Dynamic(&'a ExtentStore),
}

/// Inputs that change from frame to frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Window {
    pub item_count: usize,
    pub scroll_offset: u64,
    pub viewport_extent: u32,
    pub overscan: usize,
}

impl Layout<'_> {
    pub fn extent_of(&self, index: usize) -> u32 {
        match *self {
            Self::Fixed { extent } => extent,
            Self::Dynamic(store) => store.get(index),
        }
    }

    pub fn offset_of(&self, index: usize) -> u64 {
        match *self {
            Self::Fixed { extent } => (index as u64).saturating_mul(extent as u64),
            Self::Dynamic(store) => store.offset_of(index),
        }
    }

    pub fn total_extent(&self, item_count: usize) -> u64 {
        self.offset_of(item_count)
    }

    pub fn position_of(&self, index: usize) -> ItemPosition {
        ItemPosition {
            top: self.offset_of(index),
            height: self.extent_of(index),
        }
    }

    /// Largest scroll offset that still fills the viewport.
    pub fn max_scroll_offset(&self, item_count: usize, viewport_extent: u32) -> u64 {
        self.total_extent(item_count)
            .saturating_sub(viewport_extent as u64)
    }

    pub fn compute(&self, window: Window) -> VisibleRange {
        let mut out = VisibleRange::default();
        self.compute_into(window, 0, &mut out);
        out
    }

    /// Computes the window into `out`, reusing its item buffer.
    ///
    /// `spare` extra slots are reserved beyond the window length.
    pub fn compute_into(&self, window: Window, spare: usize, out: &mut VisibleRange) {
        out.clear();
        let n = window.item_count;
        if n == 0 {
            return;
        }

        let scroll_offset = window
            .scroll_offset
            .min(self.max_scroll_offset(n, window.viewport_extent));
        let (start, last) = match *self {
            Self::Fixed { extent } => {
                fixed_bounds(n, extent, scroll_offset, window.viewport_extent, window.overscan)
            }
            Self::Dynamic(store) => {
                dynamic_bounds(store, n, scroll_offset, window.viewport_extent, window.overscan)
            }
        };
        debug_assert!(start <= last && last < n, "bad window {start}..={last} (n={n})");

        out.start_index = start;
        out.end_index = last + 1;
        out.items.reserve(out.len().saturating_add(spare));

        let mut offset = self.offset_of(start);
        for index in start..=last {
            let extent = self.extent_of(index);
            out.items.push(VisibleItem {
                index,
                offset,
                extent,
            });
            offset = offset.saturating_add(extent as u64);
        }
    }
}

/// Returns the inclusive `(start, last)` window for uniform extents.
fn fixed_bounds(
    n: usize,
    extent: u32,
    scroll_offset: u64,
    viewport_extent: u32,
    overscan: usize,
) -> (usize, usize) {
    // A zero extent is refused at construction; stay total anyway.
    let extent = extent.max(1) as u64;
    let first = to_index(scroll_offset / extent);
    let past = to_index(
        scroll_offset
            .saturating_add(viewport_extent as u64)
            .div_ceil(extent),
    );
    let last = past.saturating_add(overscan).min(n - 1);
    let start = first.saturating_sub(overscan).min(last);
    (start, last)
}

/// Returns the inclusive `(start, last)` window for measured extents.
///
/// The start is the item containing `scroll_offset`, backed off by `overscan`. From there,
/// extents accumulate until they exceed the viewport plus `overscan` default-sized items; the
/// item where that happens, pushed forward by `overscan`, is the last one.
fn dynamic_bounds(
    store: &ExtentStore,
    n: usize,
    scroll_offset: u64,
    viewport_extent: u32,
    overscan: usize,
) -> (usize, usize) {
    debug_assert!(store.len() >= n, "extent store shorter than item count");
    let first = store
        .index_at_offset(scroll_offset)
        .unwrap_or(0)
        .min(n - 1);
    let start = first.saturating_sub(overscan);

    let budget = (viewport_extent as u64)
        .saturating_add((overscan as u64).saturating_mul(store.default_extent() as u64));
    let mut filled = 0u64;
    let mut last = n - 1;
    for index in start..n {
        filled = filled.saturating_add(store.get(index) as u64);
        if filled > budget {
            last = index.saturating_add(overscan).min(n - 1);
            break;
        }
    }
    (start, last)
}

fn to_index(v: u64) -> usize {
    usize::try_from(v).unwrap_or(usize::MAX)
}
