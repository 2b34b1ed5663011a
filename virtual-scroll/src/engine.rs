use alloc::sync::Arc;

use crate::range::{Layout, Window};
use crate::scroll::{ScrollController, TickOutcome};
use crate::units::{extent_from_host, offset_from_host};
use crate::{
    ConfigError, ExtentMode, ExtentStore, ItemPosition, LayoutStats, RenderCallback, ScrollCallback,
    ScrollOptions, ScrollPhase, ViewportState, VisibleItem, VisibleRange,
};

/// A headless windowed-range engine.
///
/// This type is UI-agnostic:
/// - It holds no UI objects and never touches a real scroll container.
/// - The host feeds it scroll/resize events and measurements, and calls [`VirtualScroll::tick`]
///   from its frame loop so coalesced scroll events and the settle timer can fire.
/// - The current window is recomputed synchronously after every state change and exposed via
///   [`VirtualScroll::visible_range`]; passive scroll events are the one exception, they are
///   applied once per frame budget.
///
/// For host wiring (subscriptions, writing programmatic scrolls back to the container), see
/// the `virtual-scroll-adapter` crate.
#[derive(Clone, Debug)]
pub struct VirtualScroll {
    options: ScrollOptions,
    viewport_extent: u32,
    extents: ExtentStore, // dynamic mode only; empty in fixed mode
    scroll: ScrollController,
    range: VisibleRange,
    recompute_count: u64,

    batch_depth: usize,
    relayout_pending: bool,
    disposed: bool,
}

impl VirtualScroll {
    /// Creates an engine from options.
    ///
    /// Fails if the options cannot describe a layout (zero item extent). The initial window is
    /// computed immediately; `on_render` is not called for it.
    pub fn new(options: ScrollOptions) -> Result<Self, ConfigError> {
        options.validate()?;
        vdebug!(
            item_count = options.item_count,
            viewport_extent = options.viewport_extent,
            overscan = options.overscan,
            dynamic = options.mode.is_dynamic(),
            "VirtualScroll::new"
        );

        let extents = match options.mode {
            ExtentMode::Fixed { extent } => ExtentStore::new(0, extent),
            ExtentMode::Dynamic { default_extent } => match &options.extent_hint {
                Some(hint) => ExtentStore::with_hints(options.item_count, default_extent, |i| {
                    hint(i)
                }),
                None => ExtentStore::new(options.item_count, default_extent),
            },
        };

        let mut v = Self {
            viewport_extent: options.viewport_extent,
            extents,
            scroll: ScrollController::new(
                options.initial_scroll_offset,
                options.frame_budget_ms,
                options.settle_delay_ms,
            ),
            range: VisibleRange::default(),
            recompute_count: 0,
            batch_depth: 0,
            relayout_pending: false,
            disposed: false,
            options,
        };
        let max = v.max_scroll_offset();
        v.scroll.clamp_to(max);
        v.recompute();
        Ok(v)
    }

    pub fn options(&self) -> &ScrollOptions {
        &self.options
    }

    pub fn mode(&self) -> ExtentMode {
        self.options.mode
    }

    pub fn item_count(&self) -> usize {
        self.options.item_count
    }

    pub fn viewport_extent(&self) -> u32 {
        self.viewport_extent
    }

    pub fn extents(&self) -> &ExtentStore {
        &self.extents
    }

    fn layout(&self) -> Layout<'_> {
        match self.options.mode {
            ExtentMode::Fixed { extent } => Layout::Fixed { extent },
            ExtentMode::Dynamic { .. } => Layout::Dynamic(&self.extents),
        }
    }


    pub fn visible_range(&self) -> &VisibleRange {
        &self.range
    }

    pub fn visible_items(&self) -> &[VisibleItem] {
        &self.range.items
    }

    pub fn start_index(&self) -> usize {
        self.range.start_index
    }

    /// Exclusive end of the window.
    pub fn end_index(&self) -> usize {
        self.range.end_index
    }

    /// Inclusive last index of the window, `None` when there is nothing to paint.
    pub fn last_index(&self) -> Option<usize> {
        self.range.last_index()
    }

    /// Current scroll offset, including passive updates not yet flushed to the window.
    pub fn scroll_top(&self) -> u64 {
        self.scroll.offset()
    }

    pub fn total_height(&self) -> u64 {
        self.layout().total_extent(self.options.item_count)
    }

    pub fn max_scroll_offset(&self) -> u64 {
        self.layout()
            .max_scroll_offset(self.options.item_count, self.viewport_extent)
    }

    pub fn clamp_scroll_offset(&self, offset: u64) -> u64 {
        offset.min(self.max_scroll_offset())
    }

    /// Distance between the bottom of the viewport and the end of the content.
    pub fn distance_to_end(&self) -> u64 {
        self.max_scroll_offset().saturating_sub(self.scroll.offset())
    }

    pub fn item_position(&self, index: usize) -> Option<ItemPosition> {
        (index < self.options.item_count).then(|| self.layout().position_of(index))
    }

    pub fn phase(&self) -> ScrollPhase {
        self.scroll.phase()
    }

    pub fn is_scrolling(&self) -> bool {
        self.scroll.is_scrolling()
    }

    /// Earliest pending timer deadline, if any.
    pub fn next_deadline_ms(&self) -> Option<u64> {
        self.scroll.next_deadline_ms()
    }

    pub fn stats(&self) -> LayoutStats {
        LayoutStats {
            recompute_count: self.recompute_count,
            item_count: self.options.item_count,
            visible_item_count: self.range.len(),
            measured_count: self.extents.measured_count(),
        }
    }

    /// Snapshot of the viewport. The offset is clamped to the current maximum, which can be
    /// lower than [`VirtualScroll::scroll_top`] after the viewport grew.
    pub fn viewport_state(&self) -> ViewportState {
        ViewportState {
            viewport_extent: self.viewport_extent,
            scroll_offset: self.clamp_scroll_offset(self.scroll.offset()),
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }


    /// Records a passive scroll event reported by the host.
    ///
    /// The offset is clamped to `[0, max_scroll_offset]` and stored right away; the window is
    /// recomputed by the next [`VirtualScroll::tick`] once the frame budget has elapsed, using
    /// only the latest offset. Non-finite offsets are ignored.
    pub fn on_scroll(&mut self, raw_offset: f64, now_ms: u64) {
        if self.disposed {
            return;
        }
        let Some(offset) = offset_from_host(raw_offset) else {
            vwarn!(raw_offset, "VirtualScroll::on_scroll: ignoring non-finite offset");
            return;
        };
        let offset = self.clamp_scroll_offset(offset);
        vtrace!(offset, now_ms, "VirtualScroll::on_scroll");
        if self.scroll.on_scroll(offset, now_ms) {
            self.notify_phase(ScrollPhase::Scrolling);
        }
    }

    /// Fires due timers: applies a coalesced scroll frame and/or settles to `Idle`.
    pub fn tick(&mut self, now_ms: u64) -> TickOutcome {
        let out = self.scroll.tick(now_ms);
        if let Some(offset) = out.flushed_offset {
            vtrace!(offset, now_ms, "VirtualScroll::tick: flush");
            self.relayout();
            self.notify_scroll(offset);
        }
        if out.settled {
            vtrace!(now_ms, "VirtualScroll::tick: settled");
            self.notify_phase(ScrollPhase::Idle);
        }
        out
    }

    /// Records a container resize reported by the host. Non-finite sizes are ignored.
    pub fn on_resize(&mut self, viewport_extent: f64) {
        let Some(extent) = extent_from_host(viewport_extent) else {
            vwarn!(viewport_extent, "VirtualScroll::on_resize: ignoring invalid size");
            return;
        };
        self.set_viewport_extent(extent);
    }

    /// Updates the viewport length and relayouts. The scroll offset is left untouched; a host
    /// whose container clamped its offset after growing reports it through `on_scroll`.
    pub fn set_viewport_extent(&mut self, viewport_extent: u32) {
        if self.disposed || self.viewport_extent == viewport_extent {
            return;
        }
        self.viewport_extent = viewport_extent;
        self.relayout();
    }


    /// Scrolls so that `index` starts at the top of the viewport.
    ///
    /// Out-of-range indexes clamp to the nearest item. Returns the applied offset.
    pub fn scroll_to_index(&mut self, index: usize) -> u64 {
        let count = self.options.item_count;
        if count == 0 {
            return self.scroll_to_position(0);
        }
        let index = index.min(count - 1);
        let target = self.layout().offset_of(index);
        self.scroll_to_position(target)
    }

    /// Scrolls to `position` immediately (no frame delay), dropping any pending passive scroll.
    ///
    /// Returns the applied (clamped) offset.
    pub fn scroll_to_position(&mut self, position: u64) -> u64 {
        if self.disposed {
            return self.scroll.offset();
        }
        let offset = self.clamp_scroll_offset(position);
        vtrace!(position, offset, "VirtualScroll::scroll_to_position");
        self.scroll.scroll_to(offset);
        self.relayout();
        self.notify_scroll(offset);
        offset
    }

    pub fn scroll_to_top(&mut self) -> u64 {
        self.scroll_to_position(0)
    }

    pub fn scroll_to_bottom(&mut self) -> u64 {
        self.scroll_to_position(self.max_scroll_offset())
    }

    /// Records a measured item extent and relayouts.
    ///
    /// Returns `false` (and changes nothing) in fixed mode, for out-of-range indexes, and for
    /// negative or non-finite extents.
    pub fn update_item_height(&mut self, index: usize, extent: f64) -> bool {
        if self.disposed {
            return false;
        }
        if !self.options.mode.is_dynamic() {
            vdebug!(index, "update_item_height: ignored for fixed extents");
            return false;
        }
        if index >= self.options.item_count {
            return false;
        }
        let Some(_delta) = self.extents.set_measured(index, extent) else {
            return false;
        };
        vtrace!(index, extent, delta = _delta, "update_item_height");
        self.after_extent_change();
        true
    }

    /// Records several measurements with a single relayout. Returns how many were accepted.
    pub fn update_item_heights(&mut self, measurements: impl IntoIterator<Item = (usize, f64)>) -> usize {
        let mut accepted = 0usize;
        self.batch_update(|v| {
            for (index, extent) in measurements {
                if v.update_item_height(index, extent) {
                    accepted += 1;
                }
            }
        });
        accepted
    }

    pub fn is_measured(&self, index: usize) -> bool {
        self.extents.is_measured(index)
    }

    /// Forces a recomputation with no input change (e.g. after fonts load).
    pub fn recalculate_layout(&mut self) {
        if self.disposed {
            return;
        }
        self.relayout();
    }

    /// Changes the item count, keeping measurements of surviving items (pagination).
    pub fn set_item_count(&mut self, item_count: usize) {
        self.set_item_count_with(item_count, |_| None);
    }

    /// Like [`VirtualScroll::set_item_count`], seeding appended items from `hint(i)`.
    pub fn set_item_count_with(&mut self, item_count: usize, hint: impl Fn(usize) -> Option<u32>) {
        if self.disposed || self.options.item_count == item_count {
            return;
        }
        vdebug!(from = self.options.item_count, to = item_count, "set_item_count");
        self.options.item_count = item_count;
        if self.options.mode.is_dynamic() {
            self.extents.resize_with(item_count, hint);
        }
        self.after_extent_change();
    }

    /// Replaces the whole collection: measurements are discarded and every item is reseeded from
    /// `hint(i)` (falling back to the default extent).
    pub fn replace_items(&mut self, item_count: usize, hint: impl Fn(usize) -> Option<u32>) {
        if self.disposed {
            return;
        }
        vdebug!(item_count, "replace_items");
        self.options.item_count = item_count;
        if self.options.mode.is_dynamic() {
            self.extents.reset_with(item_count, hint);
        }
        self.after_extent_change();
    }

    /// Restores a snapshot taken with [`VirtualScroll::viewport_state`].
    pub fn restore_viewport_state(&mut self, state: ViewportState) {
        self.batch_update(|v| {
            v.set_viewport_extent(state.viewport_extent);
            v.scroll_to_position(state.scroll_offset);
        });
    }

    pub fn set_on_render(
        &mut self,
        on_render: Option<impl Fn(&VisibleRange) + Send + Sync + 'static>,
    ) {
        self.options.on_render = on_render.map(|f| Arc::new(f) as RenderCallback);
    }

    pub fn set_on_scroll(&mut self, on_scroll: Option<impl Fn(u64) + Send + Sync + 'static>) {
        self.options.on_scroll = on_scroll.map(|f| Arc::new(f) as ScrollCallback);
    }

    /// Batches several updates into a single recomputation and `on_render` notification.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        self.batch_depth = self.batch_depth.saturating_add(1);
        f(self);
        debug_assert!(self.batch_depth > 0, "batch_depth underflow");
        self.batch_depth = self.batch_depth.saturating_sub(1);

        if self.batch_depth == 0 && core::mem::take(&mut self.relayout_pending) {
            self.relayout();
        }
    }

    /// Tears the engine down: timers are cancelled, callbacks dropped, and every later command
    /// becomes a no-op. Queries keep returning the last state.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        vdebug!("VirtualScroll::dispose");
        self.scroll.dispose();
        self.options.on_render = None;
        self.options.on_scroll = None;
        self.options.on_phase_change = None;
        self.relayout_pending = false;
        self.disposed = true;
    }


    fn after_extent_change(&mut self) {
        let max = self.max_scroll_offset();
        self.scroll.clamp_to(max);
        self.relayout();
    }

    fn relayout(&mut self) {
        if self.disposed {
            return;
        }
        if self.batch_depth > 0 {
            self.relayout_pending = true;
            return;
        }
        self.recompute();
        if let Some(cb) = &self.options.on_render {
            cb(&self.range);
        }
    }

    fn recompute(&mut self) {
        let window = Window {
            item_count: self.options.item_count,
            scroll_offset: self.scroll.offset(),
            viewport_extent: self.viewport_extent,
            overscan: self.options.overscan,
        };
        let mut range = core::mem::take(&mut self.range);
        self.layout()
            .compute_into(window, self.options.buffer_size, &mut range);
        self.range = range;
        self.recompute_count = self.recompute_count.saturating_add(1);
        vtrace!(
            start = self.range.start_index,
            end = self.range.end_index,
            offset = window.scroll_offset,
            "recompute"
        );
    }

    fn notify_scroll(&self, offset: u64) {
        if let Some(cb) = &self.options.on_scroll {
            cb(offset);
        }
    }

    fn notify_phase(&self, phase: ScrollPhase) {
        if let Some(cb) = &self.options.on_phase_change {
            cb(phase);
        }
    }
}
