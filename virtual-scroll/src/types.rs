use alloc::vec::Vec;

/// One item of the rendered window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleItem {
    pub index: usize,
    /// Start offset along the scroll axis.
    pub offset: u64,
    /// Size along the scroll axis.
    pub extent: u32,
}

impl VisibleItem {
    pub fn end(&self) -> u64 {
        self.offset.saturating_add(self.extent as u64)
    }
}

/// The contiguous window of items a rendering layer should paint, overscan included.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleRange {
    pub start_index: usize,
    pub end_index: usize, // exclusive
    /// Items `start_index..end_index`, ascending by index.
    pub items: Vec<VisibleItem>,
}

impl VisibleRange {
    pub fn is_empty(&self) -> bool {
        self.start_index >= self.end_index
    }

    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }

    /// Inclusive index of the last item, or `None` for an empty window.
    pub fn last_index(&self) -> Option<usize> {
        (!self.is_empty()).then(|| self.end_index - 1)
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.start_index..self.end_index).contains(&index)
    }

    pub(crate) fn clear(&mut self) {
        self.start_index = 0;
        self.end_index = 0;
        self.items.clear();
    }
}

/// Layout of a single item, independent of the current window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemPosition {
    pub top: u64,
    pub height: u32,
}

impl ItemPosition {
    pub fn bottom(&self) -> u64 {
        self.top.saturating_add(self.height as u64)
    }
}

/// Scroll activity state. `Idle → Scrolling` on a passive scroll event, back to `Idle` once the
/// settle delay elapses without further events.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollPhase {
    #[default]
    Idle,
    Scrolling,
}

/// Counters for the render path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutStats {
    /// Number of range recomputations since construction.
    pub recompute_count: u64,
    pub item_count: usize,
    pub visible_item_count: usize,
    /// Items with a recorded measurement (always `0` for fixed extents).
    pub measured_count: usize,
}
