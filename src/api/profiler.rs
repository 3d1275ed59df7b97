//! The main profiler type.

use std::sync::Arc;

use crate::api::config::ProfilerConfig;
use crate::api::context::ZoneContext;
use crate::api::error::ProfilerError;
use crate::api::snapshot::ProfileSnapshot;
use crate::api::stats::{ProfilerStats, StatCounters};
use crate::core::aggregate::Aggregator;
use crate::core::clock::{Clock, MonotonicClock};
use crate::core::names::{NameTable, ZoneId};
use crate::core::ring::{FrameRing, ZoneRecord};
use crate::diagnostics;

/// State shared by every clone of a [`Profiler`].
struct Shared<C> {
    config: ProfilerConfig,
    clock: C,
    names: NameTable,
    ring: FrameRing,
    aggregator: Aggregator,
    stats: StatCounters,
}

/// In-process frame/zone profiler.
///
/// This is the primary entry point. It is cheap to clone (internally uses
/// `Arc`) and can be shared with any number of reader threads. Exactly one
/// thread should drive frames and record zones.
///
/// # Example
///
/// ```rust
/// use framezone::{Profiler, ProfilerConfig};
///
/// let profiler = Profiler::new(ProfilerConfig::default());
/// let physics = profiler.register("Physics");
/// let ctx = profiler.context();
///
/// // Game loop
/// ctx.begin_frame();
/// {
///     let _zone = ctx.zone(physics);
///     // ... step the simulation ...
/// }
/// ctx.begin_frame();
///
/// // Any thread, any time
/// let snapshot = profiler.snapshot();
/// assert!(snapshot.zone("Physics").is_some());
/// ```
pub struct Profiler<C: Clock = MonotonicClock> {
    inner: Arc<Shared<C>>,
}

impl<C: Clock> Clone for Profiler<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Profiler<MonotonicClock> {
    /// Create a profiler with the given configuration.
    ///
    /// An invalid configuration is reported through diagnostics and replaced
    /// by the defaults. Use [`Profiler::try_new`] to handle it instead.
    pub fn new(config: ProfilerConfig) -> Self {
        Self::with_clock(config, MonotonicClock::new())
    }

    /// Create a profiler, rejecting an invalid configuration.
    pub fn try_new(config: ProfilerConfig) -> Result<Self, ProfilerError> {
        Self::try_with_clock(config, MonotonicClock::new())
    }

    /// Create a profiler with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(ProfilerConfig::default())
    }
}

impl Default for Profiler<MonotonicClock> {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl<C: Clock> Profiler<C> {
    /// Create a profiler that reads time from `clock`.
    pub fn with_clock(config: ProfilerConfig, clock: C) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(_err) => {
                #[cfg(feature = "log")]
                log::debug!("framezone: {_err}");
                diagnostics::emit(&diagnostics::ZP001);
                ProfilerConfig::default()
            }
        };
        Self::build(config, clock)
    }

    /// Create a profiler that reads time from `clock`, rejecting an invalid
    /// configuration.
    pub fn try_with_clock(config: ProfilerConfig, clock: C) -> Result<Self, ProfilerError> {
        config.validate()?;
        Ok(Self::build(config, clock))
    }

    fn build(config: ProfilerConfig, clock: C) -> Self {
        #[cfg(feature = "log")]
        log::debug!(
            "framezone: {} frame slots, {} zones per frame, min zone {}us",
            config.ring_capacity,
            config.max_zones_per_frame,
            config.min_zone_us
        );

        Self {
            inner: Arc::new(Shared {
                names: NameTable::new(),
                ring: FrameRing::new(config.ring_capacity, config.max_zones_per_frame),
                aggregator: Aggregator::new(config.smoothing, config.spike_clamp),
                stats: StatCounters::default(),
                clock,
                config,
            }),
        }
    }

    /// The configuration in effect.
    pub fn config(&self) -> &ProfilerConfig {
        &self.inner.config
    }

    /// The time source.
    pub fn clock(&self) -> &C {
        &self.inner.clock
    }

    /// Close the current frame and start the next one.
    ///
    /// Call once per tick from the writer thread. This does not reset any
    /// nesting depth; prefer [`ZoneContext::begin_frame`] on the writer's
    /// context, which does both.
    pub fn begin_frame(&self) {
        let now = self.inner.clock.now_us();
        self.inner.ring.begin_frame(now);
        self.inner.stats.frames_begun.bump();
        diagnostics::tracy::frame_mark();
    }

    /// Sequence of the frame being written, 0 before the first frame.
    pub fn current_frame(&self) -> u64 {
        self.inner.ring.active_sequence()
    }

    /// Intern a zone name.
    ///
    /// Call once per call site and keep the id. Once every id is taken the
    /// last id is returned and diagnostic `ZP301` is emitted.
    pub fn register(&self, name: &str) -> ZoneId {
        match self.inner.names.try_register(name) {
            Ok(id) => id,
            Err(_) => {
                diagnostics::emit(&diagnostics::ZP301);
                ZoneId(u16::MAX)
            }
        }
    }

    /// Intern a zone name, failing once every id is taken.
    pub fn try_register(&self, name: &str) -> Result<ZoneId, ProfilerError> {
        self.inner.names.try_register(name)
    }

    /// Name registered for `zone`.
    pub fn zone_name(&self, zone: ZoneId) -> Option<Arc<str>> {
        self.inner.names.name(zone)
    }

    /// Number of registered zone names.
    pub fn zone_count(&self) -> usize {
        self.inner.names.len()
    }

    /// Create a nesting-depth context for the calling thread or task.
    pub fn context(&self) -> ZoneContext<C> {
        ZoneContext::new(self.clone())
    }

    /// Aggregate completed frames into a snapshot.
    ///
    /// Safe to call from any thread at any time; never blocks the writer.
    pub fn snapshot(&self) -> ProfileSnapshot {
        self.inner
            .aggregator
            .snapshot(&self.inner.ring, &self.inner.names)
    }

    /// Unrounded EMA for `zone` as of the last snapshot.
    pub fn ema(&self, zone: ZoneId) -> Option<f64> {
        self.inner.aggregator.ema(zone)
    }

    /// Counters for kept and dropped zones.
    pub fn stats(&self) -> ProfilerStats {
        self.inner.stats.read()
    }

    #[inline]
    pub(crate) fn now_us(&self) -> u64 {
        self.inner.clock.now_us()
    }

    /// Store a finished zone in the active frame, or drop it.
    pub(crate) fn record_zone(&self, zone: ZoneId, depth: u16, duration_us: u64) {
        let stats = &self.inner.stats;
        if duration_us < u64::from(self.inner.config.min_zone_us) {
            stats.zones_dropped_threshold.bump();
            return;
        }

        let record = ZoneRecord {
            zone,
            depth,
            duration_us: u32::try_from(duration_us).unwrap_or(u32::MAX),
        };
        if self.inner.ring.record(record) {
            stats.zones_recorded.bump();
        } else {
            stats.zones_dropped_overflow.bump();
        }
    }
}

impl<C: Clock> std::fmt::Debug for Profiler<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Profiler")
            .field("config", &self.inner.config)
            .field("current_frame", &self.current_frame())
            .field("zones", &self.zone_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::ManualClock;

    fn manual(config: ProfilerConfig) -> (Profiler<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        (Profiler::with_clock(config, clock.clone()), clock)
    }

    #[test]
    fn test_try_new_rejects_invalid_config() {
        let err = Profiler::try_new(ProfilerConfig::default().with_ring_capacity(0)).unwrap_err();
        assert_eq!(err, ProfilerError::ZeroCapacity);
    }

    #[test]
    fn test_new_falls_back_to_defaults() {
        diagnostics::suppress_diagnostics(true);
        let profiler = Profiler::new(ProfilerConfig::default().with_max_zones_per_frame(0));
        diagnostics::suppress_diagnostics(false);
        assert_eq!(profiler.config(), &ProfilerConfig::default());
    }

    #[test]
    fn test_threshold_drop_is_counted() {
        let (profiler, _clock) = manual(ProfilerConfig::minimal().with_min_zone_us(100));
        let zone = profiler.register("Tiny");
        profiler.begin_frame();
        profiler.record_zone(zone, 0, 99);
        profiler.record_zone(zone, 0, 100);
        profiler.begin_frame();

        let stats = profiler.stats();
        assert_eq!(stats.frames_begun, 2);
        assert_eq!(stats.zones_recorded, 1);
        assert_eq!(stats.zones_dropped_threshold, 1);

        let snap = profiler.snapshot();
        assert_eq!(snap.zone("Tiny").unwrap().history, vec![0.1]);
    }

    #[test]
    fn test_long_zone_saturates() {
        let (profiler, _clock) = manual(ProfilerConfig::minimal());
        let zone = profiler.register("Hitch");
        profiler.begin_frame();
        profiler.record_zone(zone, 0, u64::MAX);
        profiler.begin_frame();

        let snap = profiler.snapshot();
        let expected = u32::MAX as f32 / 1000.0;
        assert_eq!(snap.zone("Hitch").unwrap().history, vec![expected]);
    }

    #[test]
    fn test_clones_share_state() {
        let (profiler, clock) = manual(ProfilerConfig::minimal());
        let reader = profiler.clone();
        profiler.begin_frame();
        clock.advance_ms(16);
        profiler.begin_frame();

        assert_eq!(reader.current_frame(), 2);
        let snap = reader.snapshot();
        assert_eq!(snap.frames.len(), 1);
        assert_eq!(snap.frames[0].duration_us, 16_000);
        assert_eq!(snap.head_sequence, 2);
    }
}
