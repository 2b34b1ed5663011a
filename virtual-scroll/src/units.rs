//! Conversions for values reported by a host (DOM, native view, terminal).
//!
//! Hosts report geometry as floating point. The engine works in whole layout units, so every
//! host value passes through here exactly once.

/// Converts a measured item extent. Non-finite and negative values are rejected.
pub(crate) fn extent_from_host(value: f64) -> Option<u32> {
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    // `as` saturates, so huge measurements pin to `u32::MAX`.
    Some((value + 0.5) as u32)
}

/// Converts a raw scroll offset. Negative offsets (overscroll bounce) clamp to zero;
/// non-finite offsets are rejected.
pub(crate) fn offset_from_host(value: f64) -> Option<u64> {
    if !value.is_finite() {
        return None;
    }
    if value <= 0.0 {
        return Some(0);
    }
    Some((value + 0.5) as u64)
}
