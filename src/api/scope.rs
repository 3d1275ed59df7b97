//! Zone scope guards.

use std::time::Duration;

use crate::api::context::ZoneContext;
use crate::core::clock::{Clock, MonotonicClock};
use crate::core::names::ZoneId;

/// A guard that represents an open zone.
///
/// When dropped, the elapsed time is recorded into the active frame and the
/// context's depth is restored. This happens on every exit path, including
/// early returns and unwinding.
///
/// # Example
///
/// ```rust
/// use framezone::Profiler;
///
/// let profiler = Profiler::with_defaults();
/// let ai = profiler.register("AI");
/// let ctx = profiler.context();
///
/// ctx.begin_frame();
/// {
///     let _zone = ctx.zone(ai);
///     // ... measured work ...
/// } // recorded here
/// ```
#[must_use = "the zone closes as soon as the guard is dropped"]
pub struct ZoneGuard<'a, C: Clock = MonotonicClock> {
    ctx: &'a ZoneContext<C>,
    zone: ZoneId,
    depth: u16,
    start_us: u64,
    closed: bool,
}

impl<'a, C: Clock> ZoneGuard<'a, C> {
    pub(crate) fn enter(ctx: &'a ZoneContext<C>, zone: ZoneId) -> Self {
        let depth = ctx.push();
        let start_us = ctx.profiler().now_us();
        Self {
            ctx,
            zone,
            depth,
            start_us,
            closed: false,
        }
    }

    /// The zone being measured.
    pub fn zone(&self) -> ZoneId {
        self.zone
    }

    /// Nesting level the zone was opened at.
    pub fn depth(&self) -> u16 {
        self.depth
    }

    /// Time spent in the zone so far.
    pub fn elapsed(&self) -> Duration {
        let now = self.ctx.profiler().now_us();
        Duration::from_micros(now.saturating_sub(self.start_us))
    }

    /// Close the zone now and return its measured duration.
    ///
    /// The duration is returned even if the zone was too short to be kept
    /// or the frame was full.
    pub fn finish(mut self) -> Duration {
        Duration::from_micros(self.close())
    }

    fn close(&mut self) -> u64 {
        let elapsed = self.ctx.profiler().now_us().saturating_sub(self.start_us);
        self.closed = true;
        self.ctx.pop();
        self.ctx.profiler().record_zone(self.zone, self.depth, elapsed);
        elapsed
    }
}

impl<'a, C: Clock> Drop for ZoneGuard<'a, C> {
    fn drop(&mut self) {
        if !self.closed {
            self.close();
        }
    }
}
