//! Profiler configuration.

use std::time::Duration;

use crate::api::error::ProfilerError;

/// Default number of retained frames (~10 s at 60 Hz).
pub const DEFAULT_RING_CAPACITY: usize = 600;

/// Default zone records kept per frame; later zones are dropped.
pub const DEFAULT_MAX_ZONES_PER_FRAME: usize = 256;

/// Default minimum zone duration in microseconds (0 records everything).
pub const DEFAULT_MIN_ZONE_US: u32 = 0;

/// Default EMA smoothing factor.
pub const DEFAULT_SMOOTHING: f64 = 0.002;

/// Default spike clamp: a sample counts as at most this multiple of the EMA.
pub const DEFAULT_SPIKE_CLAMP: f64 = 2.5;

/// Configuration for a [`Profiler`](crate::Profiler), fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfilerConfig {
    /// Frames retained in the ring (default: 600). One slot is always the
    /// frame being written, so `ring_capacity - 1` frames are readable.
    pub ring_capacity: usize,

    /// Zone records kept per frame (default: 256)
    pub max_zones_per_frame: usize,

    /// Zones shorter than this many microseconds are discarded (default: 0)
    pub min_zone_us: u32,

    /// EMA smoothing factor (default: 0.002)
    pub smoothing: f64,

    /// Spike clamp multiplier (default: 2.5)
    pub spike_clamp: f64,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            ring_capacity: DEFAULT_RING_CAPACITY,
            max_zones_per_frame: DEFAULT_MAX_ZONES_PER_FRAME,
            min_zone_us: DEFAULT_MIN_ZONE_US,
            smoothing: DEFAULT_SMOOTHING,
            spike_clamp: DEFAULT_SPIKE_CLAMP,
        }
    }
}

impl ProfilerConfig {
    /// Small footprint for tests and tools: one second of history at 60 Hz.
    pub fn minimal() -> Self {
        Self {
            ring_capacity: 61,
            max_zones_per_frame: 32,
            ..Self::default()
        }
    }

    /// One minute of history at 60 Hz.
    pub fn long_history() -> Self {
        Self {
            ring_capacity: 3_600,
            ..Self::default()
        }
    }

    /// Builder pattern: set ring capacity.
    pub fn with_ring_capacity(mut self, frames: usize) -> Self {
        self.ring_capacity = frames;
        self
    }

    /// Builder pattern: set max zones per frame.
    pub fn with_max_zones_per_frame(mut self, zones: usize) -> Self {
        self.max_zones_per_frame = zones;
        self
    }

    /// Builder pattern: set minimum recorded zone duration in microseconds.
    pub fn with_min_zone_us(mut self, us: u32) -> Self {
        self.min_zone_us = us;
        self
    }

    /// Builder pattern: set minimum recorded zone duration.
    ///
    /// Saturates at `u32::MAX` microseconds.
    pub fn with_min_zone(self, min: Duration) -> Self {
        let us = u32::try_from(min.as_micros()).unwrap_or(u32::MAX);
        self.with_min_zone_us(us)
    }

    /// Builder pattern: set EMA smoothing factor.
    pub fn with_smoothing(mut self, alpha: f64) -> Self {
        self.smoothing = alpha;
        self
    }

    /// Builder pattern: set spike clamp multiplier.
    pub fn with_spike_clamp(mut self, multiplier: f64) -> Self {
        self.spike_clamp = multiplier;
        self
    }

    /// Check that the configuration describes a usable profiler.
    pub fn validate(&self) -> Result<(), ProfilerError> {
        match self.ring_capacity {
            0 => return Err(ProfilerError::ZeroCapacity),
            1 => return Err(ProfilerError::CapacityTooSmall(1)),
            _ => {}
        }
        if self.max_zones_per_frame == 0 {
            return Err(ProfilerError::ZeroZonesPerFrame);
        }
        if u32::try_from(self.max_zones_per_frame).is_err() {
            return Err(ProfilerError::TooManyZonesPerFrame(self.max_zones_per_frame));
        }
        if !(self.smoothing > 0.0 && self.smoothing <= 1.0) {
            return Err(ProfilerError::InvalidSmoothing(self.smoothing));
        }
        if !(self.spike_clamp.is_finite() && self.spike_clamp >= 1.0) {
            return Err(ProfilerError::InvalidSpikeClamp(self.spike_clamp));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(ProfilerConfig::default().validate().is_ok());
        assert!(ProfilerConfig::minimal().validate().is_ok());
        assert!(ProfilerConfig::long_history().validate().is_ok());
    }

    #[test]
    fn test_invalid_configs_are_rejected() {
        let base = ProfilerConfig::default();
        assert_eq!(
            base.clone().with_ring_capacity(0).validate(),
            Err(ProfilerError::ZeroCapacity)
        );
        assert_eq!(
            base.clone().with_ring_capacity(1).validate(),
            Err(ProfilerError::CapacityTooSmall(1))
        );
        assert_eq!(
            base.clone().with_max_zones_per_frame(0).validate(),
            Err(ProfilerError::ZeroZonesPerFrame)
        );
        #[cfg(target_pointer_width = "64")]
        assert_eq!(
            base.clone().with_max_zones_per_frame(usize::MAX).validate(),
            Err(ProfilerError::TooManyZonesPerFrame(usize::MAX))
        );
        assert_eq!(
            base.clone().with_smoothing(0.0).validate(),
            Err(ProfilerError::InvalidSmoothing(0.0))
        );
        assert!(matches!(
            base.clone().with_smoothing(f64::NAN).validate(),
            Err(ProfilerError::InvalidSmoothing(_))
        ));
        assert_eq!(
            base.with_spike_clamp(0.5).validate(),
            Err(ProfilerError::InvalidSpikeClamp(0.5))
        );
    }

    #[test]
    fn test_min_zone_duration_saturates() {
        let config = ProfilerConfig::default().with_min_zone(Duration::from_millis(2));
        assert_eq!(config.min_zone_us, 2_000);

        let config = ProfilerConfig::default().with_min_zone(Duration::from_secs(u64::MAX));
        assert_eq!(config.min_zone_us, u32::MAX);
    }
}
