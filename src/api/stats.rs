//! Profiler statistics.

use crate::sync::atomics::EventCounter;

/// Counters describing what the profiler kept and what it dropped.
///
/// Drops are never reported to the instrumented code; these counters are
/// the only place they show up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProfilerStats {
    /// Calls to `begin_frame`.
    pub frames_begun: u64,
    /// Zones stored in a frame.
    pub zones_recorded: u64,
    /// Zones shorter than the configured minimum.
    pub zones_dropped_threshold: u64,
    /// Zones that arrived after their frame was full.
    pub zones_dropped_overflow: u64,
}

impl ProfilerStats {
    /// Zones that reached the recorder, kept or not.
    pub fn zones_seen(&self) -> u64 {
        self.zones_recorded + self.zones_dropped_threshold + self.zones_dropped_overflow
    }

    /// Fraction of seen zones that were dropped.
    pub fn drop_ratio(&self) -> f64 {
        let seen = self.zones_seen();
        if seen == 0 {
            return 0.0;
        }
        (self.zones_dropped_threshold + self.zones_dropped_overflow) as f64 / seen as f64
    }
}

impl std::fmt::Display for ProfilerStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Profiler Statistics:")?;
        writeln!(f, "  Frames:            {}", self.frames_begun)?;
        writeln!(f, "  Zones recorded:    {}", self.zones_recorded)?;
        writeln!(f, "  Below threshold:   {}", self.zones_dropped_threshold)?;
        writeln!(f, "  Frame full:        {}", self.zones_dropped_overflow)?;
        Ok(())
    }
}

/// Live counters behind [`ProfilerStats`].
#[derive(Debug, Default)]
pub(crate) struct StatCounters {
    pub frames_begun: EventCounter,
    pub zones_recorded: EventCounter,
    pub zones_dropped_threshold: EventCounter,
    pub zones_dropped_overflow: EventCounter,
}

impl StatCounters {
    pub fn read(&self) -> ProfilerStats {
        ProfilerStats {
            frames_begun: self.frames_begun.get(),
            zones_recorded: self.zones_recorded.get(),
            zones_dropped_threshold: self.zones_dropped_threshold.get(),
            zones_dropped_overflow: self.zones_dropped_overflow.get(),
        }
    }
}
