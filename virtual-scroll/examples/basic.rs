// Example: fixed-extent list, passive scrolling and scroll-to helpers.
use virtual_scroll::{ScrollOptions, VirtualScroll};

fn main() {
    let mut v = VirtualScroll::new(
        ScrollOptions::fixed(1_000_000, 20)
            .with_viewport_extent(400)
            .with_overscan(3),
    )
    .expect("valid options");

    println!("total_height={}", v.total_height());
    println!("first window={:?}", v.visible_range().last_index());

    // A burst of wheel events within one frame is applied once, on the next due tick.
    for (i, now_ms) in (0..10u64).zip(0..) {
        v.on_scroll((i * 300) as f64, now_ms);
    }
    let out = v.tick(16);
    println!(
        "flushed={:?} start={} end={}",
        out.flushed_offset,
        v.start_index(),
        v.end_index()
    );

    let off = v.scroll_to_index(999_999);
    println!("after scroll_to_index: offset={off} last={:?}", v.last_index());
}
