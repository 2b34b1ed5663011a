use virtual_scroll::{ConfigError, ScrollOptions, TickOutcome, VirtualScroll};

use crate::{EventSink, HostEvent, ScrollHost, Subscription};

/// What a call to [`Controller::pump`] processed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PumpOutcome {
    pub scroll_events: usize,
    pub resize_events: usize,
    pub tick: TickOutcome,
}

impl PumpOutcome {
    pub fn scrolled(&self) -> bool {
        self.scroll_events > 0
    }
}

/// Binds a [`VirtualScroll`] engine to a real scroll container.
///
/// The controller subscribes to the host on construction. Adapters then drive it by calling
/// [`Controller::pump`] from their frame callback: queued host events are applied in arrival
/// order, then due timers fire. Programmatic scrolls are written back to the host.
#[derive(Debug)]
pub struct Controller<H> {
    v: VirtualScroll,
    host: H,
    sink: EventSink,
    subscription: Subscription,
}

impl<H: ScrollHost> Controller<H> {
    pub fn new(options: ScrollOptions, mut host: H) -> Result<Self, ConfigError> {
        let v = VirtualScroll::new(options)?;
        let sink = EventSink::new();
        let subscription = host.subscribe(sink.downgrade());
        if v.scroll_top() != 0 {
            host.set_scroll_offset(v.scroll_top());
        }
        vdebug!(
            item_count = v.item_count(),
            scroll_top = v.scroll_top(),
            "Controller::new"
        );
        Ok(Self {
            v,
            host,
            sink,
            subscription,
        })
    }

    pub fn engine(&self) -> &VirtualScroll {
        &self.v
    }

    /// Direct engine access. Offsets changed through it are not written back to the host.
    pub fn engine_mut(&mut self) -> &mut VirtualScroll {
        &mut self.v
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The mailbox the host pushes into. Events can also be queued here directly.
    pub fn sink(&self) -> &EventSink {
        &self.sink
    }

    pub fn is_disposed(&self) -> bool {
        self.v.is_disposed()
    }

    /// Applies queued host events, then fires due timers.
    pub fn pump(&mut self, now_ms: u64) -> PumpOutcome {
        let mut out = PumpOutcome::default();
        while let Some(event) = self.sink.pop() {
            match event {
                HostEvent::Scroll { offset, now_ms } => {
                    self.v.on_scroll(offset, now_ms);
                    out.scroll_events += 1;
                }
                HostEvent::Resize { viewport_extent } => {
                    self.v.on_resize(viewport_extent);
                    out.resize_events += 1;
                }
            }
        }
        out.tick = self.v.tick(now_ms);
        if out.scroll_events > 0 || out.resize_events > 0 || !out.tick.is_noop() {
            vtrace!(
                now_ms,
                scroll_events = out.scroll_events,
                resize_events = out.resize_events,
                flushed = ?out.tick.flushed_offset,
                settled = out.tick.settled,
                "Controller::pump"
            );
        }
        out
    }

    pub fn scroll_to_index(&mut self, index: usize) -> u64 {
        let before = self.v.scroll_top();
        let offset = self.v.scroll_to_index(index);
        self.write_through(before, true);
        offset
    }

    pub fn scroll_to_position(&mut self, position: u64) -> u64 {
        let before = self.v.scroll_top();
        let offset = self.v.scroll_to_position(position);
        self.write_through(before, true);
        offset
    }

    pub fn scroll_to_top(&mut self) -> u64 {
        self.scroll_to_position(0)
    }

    pub fn scroll_to_bottom(&mut self) -> u64 {
        let max = self.v.max_scroll_offset();
        self.scroll_to_position(max)
    }

    pub fn update_item_height(&mut self, index: usize, extent: f64) -> bool {
        let before = self.v.scroll_top();
        let applied = self.v.update_item_height(index, extent);
        self.write_through(before, false);
        applied
    }

    pub fn set_item_count_with(&mut self, item_count: usize, hint: impl Fn(usize) -> Option<u32>) {
        let before = self.v.scroll_top();
        self.v.set_item_count_with(item_count, hint);
        self.write_through(before, false);
    }

    pub fn replace_items(&mut self, item_count: usize, hint: impl Fn(usize) -> Option<u32>) {
        let before = self.v.scroll_top();
        self.v.replace_items(item_count, hint);
        self.write_through(before, false);
    }

    /// Unsubscribes from the host and disposes the engine. Later events are dropped.
    pub fn dispose(&mut self) {
        if self.v.is_disposed() {
            return;
        }
        vdebug!("Controller::dispose");
        self.subscription.unsubscribe();
        // Replacing the sink drops the only strong reference the host's handle points at.
        self.sink = EventSink::new();
        self.v.dispose();
    }

    /// Mirrors the engine offset onto the host. Programmatic scrolls always write; other
    /// changes write only if they moved (clamped) the offset.
    fn write_through(&mut self, before: u64, always: bool) {
        if self.v.is_disposed() {
            return;
        }
        let after = self.v.scroll_top();
        if always || after != before {
            self.host.set_scroll_offset(after);
        }
    }
}
