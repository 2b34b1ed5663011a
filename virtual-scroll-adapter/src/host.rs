use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::rc::{Rc, Weak};
use core::cell::RefCell;

/// A raw event reported by a scroll container.
///
/// Geometry stays in host units (`f64`); the engine sanitizes it on the way in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HostEvent {
    Scroll { offset: f64, now_ms: u64 },
    Resize { viewport_extent: f64 },
}

/// Mailbox between a scroll container's listeners and a [`crate::Controller`].
///
/// Single-threaded: hosts push from their event callbacks, the controller drains on `pump`.
#[derive(Clone, Debug, Default)]
pub struct EventSink {
    queue: Rc<RefCell<VecDeque<HostEvent>>>,
}

impl EventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: HostEvent) {
        self.queue.borrow_mut().push_back(event);
    }

    pub fn pop(&self) -> Option<HostEvent> {
        self.queue.borrow_mut().pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.queue.borrow_mut().clear();
    }

    /// A handle for the host side that does not keep the mailbox alive.
    pub fn downgrade(&self) -> WeakEventSink {
        WeakEventSink {
            queue: Rc::downgrade(&self.queue),
        }
    }
}

/// Host-side handle to an [`EventSink`]. Pushes after the controller is gone are dropped.
#[derive(Clone, Debug, Default)]
pub struct WeakEventSink {
    queue: Weak<RefCell<VecDeque<HostEvent>>>,
}

impl WeakEventSink {
    /// Returns `false` if the event was dropped because the receiver no longer exists.
    pub fn push(&self, event: HostEvent) -> bool {
        let Some(queue) = self.queue.upgrade() else {
            return false;
        };
        queue.borrow_mut().push_back(event);
        true
    }

    pub fn is_connected(&self) -> bool {
        self.queue.strong_count() > 0
    }
}

/// Disposer for a host listener registration.
///
/// The cleanup runs exactly once: on [`Subscription::unsubscribe`] or when dropped.
#[must_use = "dropping a Subscription unregisters the listener immediately"]
#[derive(Default)]
pub struct Subscription {
    cleanup: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cleanup: impl FnOnce() + 'static) -> Self {
        Self {
            cleanup: Some(Box::new(cleanup)),
        }
    }

    /// A subscription with nothing to release.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.cleanup.is_some()
    }

    pub fn unsubscribe(&mut self) {
        if let Some(cleanup) = self.cleanup.take() {
            cleanup();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl core::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

/// A real scroll container (DOM element, native scroll view, terminal pane).
pub trait ScrollHost {
    /// Moves the container to `offset`. Called for programmatic scrolls only.
    fn set_scroll_offset(&mut self, offset: u64);

    /// Starts forwarding scroll and resize events into `sink`.
    ///
    /// The returned subscription must unregister the listeners when released.
    fn subscribe(&mut self, sink: WeakEventSink) -> Subscription;
}
