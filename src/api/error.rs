//! Profiler error types.

use thiserror::Error;

/// Errors reported when building a profiler or registering names.
///
/// Nothing on the recording path returns an error: drops are silent.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfilerError {
    /// The ring was configured with no slots.
    #[error("ring capacity must be non-zero")]
    ZeroCapacity,

    /// The ring cannot hold a completed frame next to the active one.
    #[error("ring capacity {0} leaves no completed frame to read (minimum is 2)")]
    CapacityTooSmall(usize),

    /// Frames were configured to hold no zones.
    #[error("max zones per frame must be non-zero")]
    ZeroZonesPerFrame,

    /// Frames were configured to hold more zones than a slot can count.
    #[error("max zones per frame {0} exceeds the per-frame limit of {limit}", limit = u32::MAX)]
    TooManyZonesPerFrame(usize),

    /// Smoothing factor outside `(0, 1]`.
    #[error("EMA smoothing factor {0} must be in (0, 1]")]
    InvalidSmoothing(f64),

    /// Spike clamp multiplier below 1 or not finite.
    #[error("spike clamp multiplier {0} must be finite and at least 1.0")]
    InvalidSpikeClamp(f64),

    /// Every zone id is already in use.
    #[error("zone name table is full ({capacity} names)")]
    NameTableFull {
        /// Number of names the table can hold.
        capacity: usize,
    },
}
