/// A lightweight, serializable snapshot of the viewport.
///
/// Capture it on unmount and hand it back through `restore_viewport_state` to bring a list back
/// to where the user left it.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportState {
    pub viewport_extent: u32,
    pub scroll_offset: u64,
}
