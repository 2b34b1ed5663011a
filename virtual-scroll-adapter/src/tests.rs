use crate::*;

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::Cell;
use virtual_scroll::ScrollOptions;

#[derive(Debug, Default)]
struct FakeHost {
    sink: Option<WeakEventSink>,
    written: Vec<u64>,
    unsubscribes: Rc<Cell<usize>>,
}

impl FakeHost {
    fn scroll(&self, offset: f64, now_ms: u64) -> bool {
        self.emit(HostEvent::Scroll { offset, now_ms })
    }

    fn resize(&self, viewport_extent: f64) -> bool {
        self.emit(HostEvent::Resize { viewport_extent })
    }

    fn emit(&self, event: HostEvent) -> bool {
        self.sink.as_ref().is_some_and(|s| s.push(event))
    }
}

impl ScrollHost for FakeHost {
    fn set_scroll_offset(&mut self, offset: u64) {
        self.written.push(offset);
    }

    fn subscribe(&mut self, sink: WeakEventSink) -> Subscription {
        self.sink = Some(sink);
        let unsubscribes = Rc::clone(&self.unsubscribes);
        Subscription::new(move || unsubscribes.set(unsubscribes.get() + 1))
    }
}

fn controller(options: ScrollOptions) -> Controller<FakeHost> {
    Controller::new(options, FakeHost::default()).unwrap()
}

fn list_of(count: usize, extent: u32, viewport: u32) -> VirtualList<usize, FakeHost> {
    VirtualList::new(
        ScrollOptions::fixed(0, extent)
            .with_viewport_extent(viewport)
            .with_overscan(0),
        (0..count).collect(),
        FakeHost::default(),
    )
    .unwrap()
}

#[test]
fn pump_applies_host_events_in_order_then_ticks() {
    let mut c = controller(ScrollOptions::fixed(1000, 40).with_viewport_extent(400));
    assert!(c.host().scroll(100.0, 0));
    assert!(c.host().resize(800.0));
    assert!(c.host().scroll(4000.0, 5));

    let out = c.pump(5);
    assert_eq!(out.scroll_events, 2);
    assert_eq!(out.resize_events, 1);
    assert_eq!(out.tick.flushed_offset, None);
    assert_eq!(c.engine().scroll_top(), 4000);
    assert_eq!(c.engine().viewport_extent(), 800);
    assert!(c.sink().is_empty());

    let out = c.pump(16);
    assert!(!out.scrolled());
    assert_eq!(out.tick.flushed_offset, Some(4000));
    assert_eq!(c.engine().start_index(), 97);
    // Passive scrolls come from the host; nothing is written back.
    assert!(c.host().written.is_empty());
}

#[test]
fn programmatic_scrolls_are_written_to_the_host() {
    let mut c = controller(ScrollOptions::fixed(1000, 40).with_viewport_extent(400));
    assert_eq!(c.scroll_to_index(500), 20_000);
    assert_eq!(c.scroll_to_bottom(), 39_600);
    assert_eq!(c.scroll_to_top(), 0);
    assert_eq!(c.host().written, [20_000, 39_600, 0]);
}

#[test]
fn initial_offset_is_applied_to_the_host() {
    let c = controller(
        ScrollOptions::fixed(1000, 40)
            .with_viewport_extent(400)
            .with_initial_scroll_offset(120),
    );
    assert_eq!(c.host().written, [120]);

    let c = controller(ScrollOptions::fixed(1000, 40));
    assert!(c.host().written.is_empty());
}

#[test]
fn shrinking_the_list_writes_the_clamped_offset() {
    let mut c = controller(ScrollOptions::fixed(100, 10).with_viewport_extent(50));
    c.scroll_to_bottom();
    c.set_item_count_with(200, |_| None);
    assert_eq!(c.host().written, [950]);

    c.set_item_count_with(20, |_| None);
    assert_eq!(c.engine().scroll_top(), 150);
    assert_eq!(c.host().written, [950, 150]);
}

#[test]
fn dispose_unsubscribes_once_and_drops_later_events() {
    let mut c = controller(ScrollOptions::fixed(1000, 40));
    let unsubscribes = Rc::clone(&c.host().unsubscribes);
    assert!(c.host().scroll(100.0, 0));

    c.dispose();
    assert!(c.is_disposed());
    assert_eq!(unsubscribes.get(), 1);
    assert!(!c.host().scroll(200.0, 1));
    assert!(c.pump(1000).tick.is_noop());

    c.dispose();
    assert_eq!(c.scroll_to_position(500), c.engine().scroll_top());
    assert!(c.host().written.is_empty());
    drop(c);
    assert_eq!(unsubscribes.get(), 1);
}

#[test]
fn dropping_the_controller_unsubscribes() {
    let unsubscribes;
    {
        let c = controller(ScrollOptions::fixed(10, 10));
        unsubscribes = Rc::clone(&c.host().unsubscribes);
        assert_eq!(unsubscribes.get(), 0);
    }
    assert_eq!(unsubscribes.get(), 1);
}

#[test]
fn subscription_cleanup_runs_exactly_once() {
    let calls = Rc::new(Cell::new(0));
    let mut sub = Subscription::new({
        let calls = Rc::clone(&calls);
        move || calls.set(calls.get() + 1)
    });
    assert!(sub.is_active());
    sub.unsubscribe();
    sub.unsubscribe();
    assert!(!sub.is_active());
    drop(sub);
    assert_eq!(calls.get(), 1);

    let mut empty = Subscription::empty();
    assert!(!empty.is_active());
    empty.unsubscribe();
}

#[test]
fn weak_sink_drops_events_once_the_receiver_is_gone() {
    let sink = EventSink::new();
    let weak = sink.downgrade();
    assert!(weak.is_connected());
    assert!(weak.push(HostEvent::Resize {
        viewport_extent: 10.0
    }));
    assert_eq!(sink.len(), 1);
    assert_eq!(
        sink.pop(),
        Some(HostEvent::Resize {
            viewport_extent: 10.0
        })
    );

    drop(sink);
    assert!(!weak.is_connected());
    assert!(!weak.push(HostEvent::Resize {
        viewport_extent: 10.0
    }));
}

#[test]
fn for_each_visible_pairs_items_with_layout() {
    let mut list = list_of(100, 10, 50);
    list.scroll_to_index(10);
    assert_eq!(list.visible_range(), Some((10, 15)));

    let mut seen = Vec::new();
    list.for_each_visible(|value, item| seen.push((*value, item.offset)));
    assert_eq!(
        seen,
        [(10, 100), (11, 110), (12, 120), (13, 130), (14, 140), (15, 150)]
    );
}

#[test]
fn empty_list_has_no_visible_range() {
    let list = list_of(0, 10, 50);
    assert!(list.is_empty());
    assert_eq!(list.visible_range(), None);
    let mut calls = 0;
    list.for_each_visible(|_, _| calls += 1);
    assert_eq!(calls, 0);
}

#[test]
fn end_reached_fires_once_then_rearms() {
    let fired = Rc::new(Cell::new(0));
    let mut list = list_of(100, 10, 50);
    list.set_on_end_reached(Some({
        let fired = Rc::clone(&fired);
        move || fired.set(fired.get() + 1)
    }));

    // 1000 total, 950 max: 860 leaves 90 to go.
    list.controller().host().scroll(100.0, 0);
    list.pump(0);
    assert_eq!(fired.get(), 0);

    list.controller().host().scroll(860.0, 10);
    list.pump(10);
    assert_eq!(fired.get(), 1);

    list.controller().host().scroll(900.0, 20);
    list.pump(20);
    assert_eq!(fired.get(), 1);

    // Re-armed, but only a scroll event can fire it again.
    list.pump(1010);
    assert_eq!(fired.get(), 1);
    list.controller().host().scroll(910.0, 1020);
    list.pump(1020);
    assert_eq!(fired.get(), 2);
}

#[test]
fn end_reached_waits_for_more_data_and_idle_loading() {
    let fired = Rc::new(Cell::new(0));
    let mut list = list_of(100, 10, 50);
    list.set_on_end_reached(Some({
        let fired = Rc::clone(&fired);
        move || fired.set(fired.get() + 1)
    }));

    list.set_has_more(false);
    list.controller().host().scroll(950.0, 0);
    list.pump(0);
    assert_eq!(fired.get(), 0);

    list.set_has_more(true);
    list.set_loading_more(true);
    list.controller().host().scroll(940.0, 1);
    list.pump(1);
    assert_eq!(fired.get(), 0);

    list.set_loading_more(false);
    list.controller().host().scroll(945.0, 2);
    list.pump(2);
    assert_eq!(fired.get(), 1);
}

#[test]
fn end_reached_threshold_is_configurable() {
    let fired = Rc::new(Cell::new(0));
    let mut list = list_of(100, 10, 50).with_end_reached(EndReachedOptions {
        threshold: 500,
        rearm_ms: 0,
    });
    list.set_on_end_reached(Some({
        let fired = Rc::clone(&fired);
        move || fired.set(fired.get() + 1)
    }));

    list.controller().host().scroll(400.0, 0);
    list.pump(0);
    assert_eq!(fired.get(), 0);
    list.controller().host().scroll(460.0, 1);
    list.pump(1);
    assert_eq!(fired.get(), 1);
    list.controller().host().scroll(470.0, 2);
    list.pump(2);
    assert_eq!(fired.get(), 2);
}

#[test]
fn append_keeps_measurements() {
    let mut list = VirtualList::new(
        ScrollOptions::dynamic(0, 20).with_viewport_extent(100),
        (0..10).collect::<Vec<u32>>(),
        FakeHost::default(),
    )
    .unwrap();
    assert!(list.update_item_height(0, 50.0));
    list.append(10..15);

    assert_eq!(list.len(), 15);
    assert_eq!(list.controller().engine().item_count(), 15);
    assert!(list.controller().engine().is_measured(0));
    assert_eq!(list.controller().engine().total_height(), 50 + 14 * 20);
}

#[test]
fn set_data_replaces_items_and_measurements() {
    let mut list = VirtualList::new(
        ScrollOptions::dynamic(0, 20).with_viewport_extent(100),
        (0..10).collect::<Vec<u32>>(),
        FakeHost::default(),
    )
    .unwrap();
    list.update_item_height(0, 50.0);
    list.set_data(alloc::vec![7, 8, 9]);

    assert_eq!(list.data(), [7, 8, 9]);
    assert!(!list.controller().engine().is_measured(0));
    assert_eq!(list.controller().engine().total_height(), 60);
    assert_eq!(list.visible_range(), Some((0, 2)));
}
