//! A headless windowed-range engine for virtual scrolling.
//!
//! For host wiring (scroll subscriptions, payload-carrying lists), see the
//! `virtual-scroll-adapter` crate.
//!
//! This crate computes which slice of a long list should be painted: given the item extents
//! (one fixed extent, or per-item measurements), a viewport length and a scroll offset, it yields
//! a contiguous, overscanned window of items with their offsets, plus the total scrollable
//! extent. Measured extents are kept in a prefix-sum tree, so offset queries stay `O(log n)`
//! even for very long dynamic lists.
//!
//! It is UI-agnostic. A rendering layer is expected to provide:
//! - the item count and, for measured lists, item extents after paint
//! - the viewport size and passive scroll offsets
//! - a clock (`now_ms`) and periodic [`VirtualScroll::tick`] calls
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod engine;
mod error;
mod extent;
mod fenwick;
mod options;
pub mod range;
mod scroll;
mod state;
mod types;
mod units;


pub use engine::VirtualScroll;
pub use error::ConfigError;
pub use extent::ExtentStore;
pub use options::{
    ExtentHint, ExtentMode, PhaseCallback, RenderCallback, ScrollCallback, ScrollOptions,
};
pub use range::{Layout, Window};
pub use scroll::{ScrollController, TickOutcome, Timer};
pub use state::ViewportState;
pub use types::{ItemPosition, LayoutStats, ScrollPhase, VisibleItem, VisibleRange};
