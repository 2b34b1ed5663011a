use alloc::sync::Arc;

use crate::{ConfigError, ScrollPhase, VisibleRange};

/// Fired after every delivered range recomputation.
pub type RenderCallback = Arc<dyn Fn(&VisibleRange) + Send + Sync>;

/// Fired with the applied scroll offset: once per flushed frame of passive scrolling, and once
/// per programmatic scroll.
pub type ScrollCallback = Arc<dyn Fn(u64) + Send + Sync>;

/// Fired on `Idle ↔ Scrolling` transitions.
pub type PhaseCallback = Arc<dyn Fn(ScrollPhase) + Send + Sync>;

/// Seeds the extent of item `i` before it is measured. `None` falls back to the default extent.
pub type ExtentHint = Arc<dyn Fn(usize) -> Option<u32> + Send + Sync>;

/// How item extents are determined. Chosen once, at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExtentMode {
    /// Every item has the same extent; all layout math is `O(1)`.
    Fixed { extent: u32 },
    /// Items report measured extents after paint; unmeasured items use `default_extent`.
    Dynamic { default_extent: u32 },
}

impl ExtentMode {
    /// The extent assumed for an item with no measurement.
    pub fn default_extent(&self) -> u32 {
        match *self {
            Self::Fixed { extent } => extent,
            Self::Dynamic { default_extent } => default_extent,
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, Self::Dynamic { .. })
    }
}

impl Default for ExtentMode {
    fn default() -> Self {
        Self::Fixed { extent: 50 }
    }
}

/// Configuration for [`crate::VirtualScroll`].
///
/// Cheap to clone: callbacks live behind `Arc`s.
pub struct ScrollOptions {
    pub item_count: usize,
    /// Visible length of the scroll container along the scroll axis.
    pub viewport_extent: u32,
    pub mode: ExtentMode,
    /// Extra items rendered on each side of the visible window.
    pub overscan: usize,
    /// Spare capacity (in items) reserved in the visible-item buffer, so small window growth
    /// does not reallocate while scrolling.
    pub buffer_size: usize,
    pub initial_scroll_offset: u64,
    /// Passive scroll events are coalesced and applied at most once per this many milliseconds.
    pub frame_budget_ms: u64,
    /// Quiet period after the last scroll event before the phase returns to `Idle`.
    pub settle_delay_ms: u64,
    /// Initial extents for unmeasured items (dynamic mode only).
    pub extent_hint: Option<ExtentHint>,
    pub on_render: Option<RenderCallback>,
    pub on_scroll: Option<ScrollCallback>,
    pub on_phase_change: Option<PhaseCallback>,
}

impl Clone for ScrollOptions {
    fn clone(&self) -> Self {
        Self {
            item_count: self.item_count,
            viewport_extent: self.viewport_extent,
            mode: self.mode,
            overscan: self.overscan,
            buffer_size: self.buffer_size,
            initial_scroll_offset: self.initial_scroll_offset,
            frame_budget_ms: self.frame_budget_ms,
            settle_delay_ms: self.settle_delay_ms,
            extent_hint: self.extent_hint.clone(),
            on_render: self.on_render.clone(),
            on_scroll: self.on_scroll.clone(),
            on_phase_change: self.on_phase_change.clone(),
        }
    }
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self::new(0, ExtentMode::default())
    }
}

impl ScrollOptions {
    pub fn new(item_count: usize, mode: ExtentMode) -> Self {
        Self {
            item_count,
            viewport_extent: 400,
            mode,
            overscan: 3,
            buffer_size: 5,
            initial_scroll_offset: 0,
            frame_budget_ms: 16,
            settle_delay_ms: 150,
            extent_hint: None,
            on_render: None,
            on_scroll: None,
            on_phase_change: None,
        }
    }

    /// Options for a list where every item is `extent` units long.
    pub fn fixed(item_count: usize, extent: u32) -> Self {
        Self::new(item_count, ExtentMode::Fixed { extent })
    }

    /// Options for a list of measured items, estimated at `default_extent` until measured.
    pub fn dynamic(item_count: usize, default_extent: u32) -> Self {
        Self::new(item_count, ExtentMode::Dynamic { default_extent })
    }

    /// Checks that the options describe a usable layout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.mode {
            ExtentMode::Fixed { extent: 0 } => Err(ConfigError::ZeroFixedExtent),
            ExtentMode::Dynamic { default_extent: 0 } => Err(ConfigError::ZeroDefaultExtent),
            _ => Ok(()),
        }
    }

    pub fn with_viewport_extent(mut self, viewport_extent: u32) -> Self {
        self.viewport_extent = viewport_extent;
        self
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    pub fn with_initial_scroll_offset(mut self, offset: u64) -> Self {
        self.initial_scroll_offset = offset;
        self
    }

    pub fn with_frame_budget_ms(mut self, frame_budget_ms: u64) -> Self {
        self.frame_budget_ms = frame_budget_ms;
        self
    }

    pub fn with_settle_delay_ms(mut self, settle_delay_ms: u64) -> Self {
        self.settle_delay_ms = settle_delay_ms;
        self
    }

    pub fn with_extent_hint(
        mut self,
        hint: Option<impl Fn(usize) -> Option<u32> + Send + Sync + 'static>,
    ) -> Self {
        self.extent_hint = hint.map(|f| Arc::new(f) as ExtentHint);
        self
    }

    pub fn with_on_render(
        mut self,
        on_render: Option<impl Fn(&VisibleRange) + Send + Sync + 'static>,
    ) -> Self {
        self.on_render = on_render.map(|f| Arc::new(f) as RenderCallback);
        self
    }

    pub fn with_on_scroll(mut self, on_scroll: Option<impl Fn(u64) + Send + Sync + 'static>) -> Self {
        self.on_scroll = on_scroll.map(|f| Arc::new(f) as ScrollCallback);
        self
    }

    pub fn with_on_phase_change(
        mut self,
        on_phase_change: Option<impl Fn(ScrollPhase) + Send + Sync + 'static>,
    ) -> Self {
        self.on_phase_change = on_phase_change.map(|f| Arc::new(f) as PhaseCallback);
        self
    }
}

impl core::fmt::Debug for ScrollOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScrollOptions")
            .field("item_count", &self.item_count)
            .field("viewport_extent", &self.viewport_extent)
            .field("mode", &self.mode)
            .field("overscan", &self.overscan)
            .field("buffer_size", &self.buffer_size)
            .field("initial_scroll_offset", &self.initial_scroll_offset)
            .field("frame_budget_ms", &self.frame_budget_ms)
            .field("settle_delay_ms", &self.settle_delay_ms)
            .finish_non_exhaustive()
    }
}
