// Example: measured items and batched updates.
use virtual_scroll::{ScrollOptions, VirtualScroll};

fn main() {
    let mut v = VirtualScroll::new(
        ScrollOptions::dynamic(100, 10)
            .with_viewport_extent(30)
            .with_overscan(1)
            .with_on_render(Some(|range: &virtual_scroll::VisibleRange| {
                println!("render {}..{}", range.start_index, range.end_index);
            })),
    )
    .expect("valid options");

    println!("before: total={} visible={}", v.total_height(), v.visible_range().len());

    // One relayout (and one render) for the whole batch.
    let accepted = v.update_item_heights([(0, 30.0), (1, 50.0), (2, 12.5)]);
    println!("accepted={accepted} total={}", v.total_height());

    // Invalid measurements are rejected.
    assert!(!v.update_item_height(3, f64::NAN));

    let to = v.scroll_to_index(10);
    println!(
        "scroll_to_index(10): off={to} item={:?}",
        v.item_position(10)
    );
    println!("stats={:?}", v.stats());
}
