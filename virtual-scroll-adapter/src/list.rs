use alloc::boxed::Box;
use alloc::vec::Vec;

use virtual_scroll::{ConfigError, ExtentHint, ScrollOptions, VisibleItem};

use crate::{Controller, PumpOutcome, ScrollHost};

/// Pagination settings for [`VirtualList`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EndReachedOptions {
    /// Distance from the end of the content (in layout units) at which `on_end_reached` fires.
    pub threshold: u64,
    /// After firing, the trigger stays disarmed for this long.
    pub rearm_ms: u64,
}

impl Default for EndReachedOptions {
    fn default() -> Self {
        Self {
            threshold: 100,
            rearm_ms: 1000,
        }
    }
}

/// A virtualized list that owns its items.
///
/// Item `i` of the data is item `i` of the layout; replacing or appending data keeps the engine's
/// item count in step. When the viewport scrolls close to the end and more data is available,
/// `on_end_reached` fires once, then stays quiet until it re-arms.
pub struct VirtualList<T, H> {
    controller: Controller<H>,
    data: Vec<T>,
    end_reached: EndReachedOptions,
    has_more: bool,
    loading_more: bool,
    end_reached_at: Option<u64>,
    on_end_reached: Option<Box<dyn FnMut()>>,
}

impl<T, H: ScrollHost> VirtualList<T, H> {
    /// Creates a list over `data`. `options.item_count` is replaced by `data.len()`.
    pub fn new(options: ScrollOptions, data: Vec<T>, host: H) -> Result<Self, ConfigError> {
        let mut options = options;
        options.item_count = data.len();
        Ok(Self {
            controller: Controller::new(options, host)?,
            data,
            end_reached: EndReachedOptions::default(),
            has_more: true,
            loading_more: false,
            end_reached_at: None,
            on_end_reached: None,
        })
    }

    pub fn with_end_reached(mut self, options: EndReachedOptions) -> Self {
        self.end_reached = options;
        self
    }

    pub fn set_on_end_reached(&mut self, on_end_reached: Option<impl FnMut() + 'static>) {
        self.on_end_reached = on_end_reached.map(|f| Box::new(f) as Box<dyn FnMut()>);
    }

    pub fn set_has_more(&mut self, has_more: bool) {
        self.has_more = has_more;
    }

    pub fn set_loading_more(&mut self, loading_more: bool) {
        self.loading_more = loading_more;
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading_more(&self) -> bool {
        self.loading_more
    }

    pub fn controller(&self) -> &Controller<H> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut Controller<H> {
        &mut self.controller
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.data.get(index)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Replaces every item. Measurements are discarded.
    pub fn set_data(&mut self, data: Vec<T>) {
        self.data = data;
        let hint = self.extent_hint();
        self.controller
            .replace_items(self.data.len(), |i| hint.as_ref().and_then(|h| h(i)));
    }

    /// Appends items (pagination). Existing measurements are kept.
    pub fn append(&mut self, items: impl IntoIterator<Item = T>) {
        self.data.extend(items);
        let hint = self.extent_hint();
        self.controller
            .set_item_count_with(self.data.len(), |i| hint.as_ref().and_then(|h| h(i)));
    }

    /// Inclusive `(start, last)` of the painted window, or `None` when the list is empty.
    pub fn visible_range(&self) -> Option<(usize, usize)> {
        let range = self.controller.engine().visible_range();
        range.last_index().map(|last| (range.start_index, last))
    }

    /// Visits every item of the painted window with its layout.
    pub fn for_each_visible(&self, mut f: impl FnMut(&T, VisibleItem)) {
        for item in self.controller.engine().visible_items() {
            if let Some(value) = self.data.get(item.index) {
                f(value, *item);
            }
        }
    }

    pub fn update_item_height(&mut self, index: usize, extent: f64) -> bool {
        self.controller.update_item_height(index, extent)
    }

    pub fn scroll_to_index(&mut self, index: usize) -> u64 {
        self.controller.scroll_to_index(index)
    }

    pub fn scroll_to_top(&mut self) -> u64 {
        self.controller.scroll_to_top()
    }

    pub fn scroll_to_bottom(&mut self) -> u64 {
        self.controller.scroll_to_bottom()
    }

    /// Pumps the controller, then checks whether the end of the content was reached.
    pub fn pump(&mut self, now_ms: u64) -> PumpOutcome {
        let out = self.controller.pump(now_ms);

        let rearm_at = self
            .end_reached_at
            .map(|at| at.saturating_add(self.end_reached.rearm_ms));
        if rearm_at.is_some_and(|at| now_ms >= at) {
            self.end_reached_at = None;
        }
        if out.scrolled() {
            self.check_end_reached(now_ms);
        }
        out
    }

    pub fn dispose(&mut self) {
        self.on_end_reached = None;
        self.controller.dispose();
    }

    fn check_end_reached(&mut self, now_ms: u64) {
        if !self.has_more || self.loading_more || self.end_reached_at.is_some() {
            return;
        }
        let distance = self.controller.engine().distance_to_end();
        if distance > self.end_reached.threshold {
            return;
        }
        let Some(cb) = self.on_end_reached.as_mut() else {
            return;
        };
        vdebug!(distance, now_ms, "VirtualList: end reached");
        self.end_reached_at = Some(now_ms);
        cb();
    }

    fn extent_hint(&self) -> Option<ExtentHint> {
        self.controller.engine().options().extent_hint.clone()
    }
}

impl<T, H: core::fmt::Debug> core::fmt::Debug for VirtualList<T, H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VirtualList")
            .field("controller", &self.controller)
            .field("len", &self.data.len())
            .field("has_more", &self.has_more)
            .field("loading_more", &self.loading_more)
            .field("end_reached_at", &self.end_reached_at)
            .finish_non_exhaustive()
    }
}
