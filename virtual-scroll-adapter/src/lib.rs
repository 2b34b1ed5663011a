//! Host bindings for the `virtual-scroll` crate.
//!
//! The `virtual-scroll` engine is headless: it never touches a real scroll container. This crate
//! provides the small, framework-neutral glue most adapters need:
//!
//! - A [`ScrollHost`] trait for the real container, with [`Subscription`] disposers so listener
//!   registrations are released exactly once
//! - A [`Controller`] that drains queued host events in order, drives the engine's timers, and
//!   writes programmatic scrolls back to the host
//! - A [`VirtualList`] that owns its items and reports when the end of the content is reached
//!
//! This crate is framework-agnostic (no DOM/egui/ratatui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod host;
mod list;

#[cfg(test)]
mod tests;

pub use controller::{Controller, PumpOutcome};
pub use host::{EventSink, HostEvent, ScrollHost, Subscription, WeakEventSink};
pub use list::{EndReachedOptions, VirtualList};
