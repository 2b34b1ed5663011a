// Example: a simulated scroll container feeding a paginated list.
use std::cell::Cell;
use std::rc::Rc;

use virtual_scroll::ScrollOptions;
use virtual_scroll_adapter::{HostEvent, ScrollHost, Subscription, VirtualList, WeakEventSink};

#[derive(Default)]
struct Pane {
    sink: Option<WeakEventSink>,
}

impl Pane {
    fn wheel(&self, offset: f64, now_ms: u64) {
        if let Some(sink) = &self.sink {
            sink.push(HostEvent::Scroll { offset, now_ms });
        }
    }
}

impl ScrollHost for Pane {
    fn set_scroll_offset(&mut self, offset: u64) {
        println!("pane: scrolled to {offset}");
    }

    fn subscribe(&mut self, sink: WeakEventSink) -> Subscription {
        self.sink = Some(sink);
        Subscription::new(|| println!("pane: listeners removed"))
    }
}

fn main() {
    let mut list = VirtualList::new(
        ScrollOptions::fixed(0, 24).with_viewport_extent(240),
        (0..50).map(|i| format!("row {i}")).collect(),
        Pane::default(),
    )
    .expect("valid options");

    let wants_more = Rc::new(Cell::new(false));
    list.set_on_end_reached(Some({
        let wants_more = Rc::clone(&wants_more);
        move || wants_more.set(true)
    }));

    let mut now_ms = 0u64;
    for step in 0..20 {
        list.controller().host().wheel((step * 60) as f64, now_ms);
        list.pump(now_ms);
        now_ms += 16;

        if wants_more.replace(false) {
            let from = list.len();
            list.append((from..from + 50).map(|i| format!("row {i}")));
            println!("loaded more: len={}", list.len());
        }
    }

    list.pump(now_ms + 200);
    list.for_each_visible(|row, item| println!("{row} @ {}", item.offset));
    list.scroll_to_top();
    list.dispose();
}
