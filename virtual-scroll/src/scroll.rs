use crate::ScrollPhase;

/// A single-shot, cancellable deadline on the host clock.
///
/// The engine never sleeps: the host calls `tick(now_ms)` from its frame callback or timer, and
/// due timers fire from there.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Timer {
    deadline_ms: Option<u64>,
}

impl Timer {
    pub fn arm(&mut self, now_ms: u64, delay_ms: u64) {
        self.deadline_ms = Some(now_ms.saturating_add(delay_ms));
    }

    pub fn cancel(&mut self) {
        self.deadline_ms = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline_ms.is_some()
    }

    pub fn deadline_ms(&self) -> Option<u64> {
        self.deadline_ms
    }

    /// Disarms and returns `true` if the deadline has passed.
    pub fn fire(&mut self, now_ms: u64) -> bool {
        match self.deadline_ms {
            Some(deadline) if now_ms >= deadline => {
                self.deadline_ms = None;
                true
            }
            _ => false,
        }
    }
}

/// What a call to [`ScrollController::tick`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// The coalesced offset applied by a due frame, if one fired.
    pub flushed_offset: Option<u64>,
    /// `true` if the settle timer fired and the phase returned to `Idle`.
    pub settled: bool,
}

impl TickOutcome {
    pub fn is_noop(&self) -> bool {
        self.flushed_offset.is_none() && !self.settled
    }
}

/// Owns the scroll offset and the scroll timers.
///
/// Passive scroll events update the offset immediately but are only *published* once per frame
/// budget, with the latest value. Programmatic scrolls publish synchronously and drop any
/// pending passive value.
#[derive(Clone, Debug)]
pub struct ScrollController {
    offset: u64,
    pending: bool,
    phase: ScrollPhase,
    frame: Timer,
    settle: Timer,
    frame_budget_ms: u64,
    settle_delay_ms: u64,
    disposed: bool,
}

impl ScrollController {
    pub fn new(initial_offset: u64, frame_budget_ms: u64, settle_delay_ms: u64) -> Self {
        Self {
            offset: initial_offset,
            pending: false,
            phase: ScrollPhase::Idle,
            frame: Timer::default(),
            settle: Timer::default(),
            frame_budget_ms,
            settle_delay_ms,
            disposed: false,
        }
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// `true` while a passive offset is waiting for its frame.
    pub fn has_pending(&self) -> bool {
        self.pending
    }

    pub fn phase(&self) -> ScrollPhase {
        self.phase
    }

    pub fn is_scrolling(&self) -> bool {
        self.phase == ScrollPhase::Scrolling
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Earliest armed deadline; hosts can use it to schedule their next `tick`.
    pub fn next_deadline_ms(&self) -> Option<u64> {
        match (self.frame.deadline_ms(), self.settle.deadline_ms()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Records a passive scroll event. `offset` must already be clamped.
    ///
    /// Returns `true` if this event moved the phase from `Idle` to `Scrolling`.
    pub fn on_scroll(&mut self, offset: u64, now_ms: u64) -> bool {
        if self.disposed {
            return false;
        }
        self.offset = offset;
        self.pending = true;
        if !self.frame.is_armed() {
            self.frame.arm(now_ms, self.frame_budget_ms);
        }
        self.settle.arm(now_ms, self.settle_delay_ms);

        let started = self.phase == ScrollPhase::Idle;
        self.phase = ScrollPhase::Scrolling;
        started
    }

    /// Applies a programmatic scroll. `offset` must already be clamped.
    pub fn scroll_to(&mut self, offset: u64) {
        if self.disposed {
            return;
        }
        self.frame.cancel();
        self.pending = false;
        self.offset = offset;
    }

    /// Re-clamps the offset after the scrollable extent shrank. Returns `true` if it moved.
    pub fn clamp_to(&mut self, max_offset: u64) -> bool {
        if self.offset <= max_offset {
            return false;
        }
        self.offset = max_offset;
        true
    }

    /// Fires due timers. The frame flush is reported before the settle transition.
    pub fn tick(&mut self, now_ms: u64) -> TickOutcome {
        let mut out = TickOutcome::default();
        if self.disposed {
            return out;
        }
        if self.frame.fire(now_ms) && self.pending {
            self.pending = false;
            out.flushed_offset = Some(self.offset);
        }
        if self.settle.fire(now_ms) {
            self.phase = ScrollPhase::Idle;
            out.settled = true;
        }
        out
    }

    pub fn cancel_timers(&mut self) {
        self.frame.cancel();
        self.settle.cancel();
        self.pending = false;
    }

    /// Cancels every timer; later events and ticks are ignored.
    pub fn dispose(&mut self) {
        self.cancel_timers();
        self.phase = ScrollPhase::Idle;
        self.disposed = true;
    }
}
