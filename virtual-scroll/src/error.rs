/// Rejected engine configuration.
///
/// Runtime inputs (scroll offsets, measurements, indexes) never produce errors; they are clamped
/// or ignored instead. Only a configuration that cannot produce a meaningful layout is refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("fixed item extent must be greater than zero")]
    ZeroFixedExtent,
    #[error("default item extent must be greater than zero")]
    ZeroDefaultExtent,
}
