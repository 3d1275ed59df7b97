//! Per-thread zone nesting.
//!
//! Nesting depth belongs to a [`ZoneContext`], not to a hidden thread-local.
//! Each thread (or task) that brackets zones owns its own context, so depth
//! counters never interfere. All contexts of a profiler write into the same
//! active frame.

use std::cell::Cell;

use crate::api::profiler::Profiler;
use crate::api::scope::ZoneGuard;
use crate::core::clock::{Clock, MonotonicClock};
use crate::core::names::ZoneId;
use crate::diagnostics;

/// Nesting-depth state for one thread of instrumented code.
///
/// Not `Sync`: share the [`Profiler`], not the context.
///
/// # Example
///
/// ```rust
/// use framezone::Profiler;
///
/// let profiler = Profiler::with_defaults();
/// let update = profiler.register("Update");
/// let physics = profiler.register("Physics");
/// let ctx = profiler.context();
///
/// ctx.begin_frame();
/// {
///     let _update = ctx.zone(update);
///     assert_eq!(ctx.depth(), 1);
///     let _physics = ctx.zone(physics);
///     assert_eq!(ctx.depth(), 2);
/// }
/// assert_eq!(ctx.depth(), 0);
/// ```
pub struct ZoneContext<C: Clock = MonotonicClock> {
    profiler: Profiler<C>,
    depth: Cell<u16>,
}

impl<C: Clock> ZoneContext<C> {
    /// Create a context recording into `profiler`.
    pub fn new(profiler: Profiler<C>) -> Self {
        Self {
            profiler,
            depth: Cell::new(0),
        }
    }

    /// The profiler this context records into.
    pub fn profiler(&self) -> &Profiler<C> {
        &self.profiler
    }

    /// Number of zones currently open on this context.
    pub fn depth(&self) -> u16 {
        self.depth.get()
    }

    /// Advance the profiler to a new frame and reset this context's depth.
    ///
    /// This is the writer's frame boundary. Zones still open here are
    /// reported as `ZP202`.
    pub fn begin_frame(&self) {
        let open = self.depth.replace(0);
        if open != 0 {
            diagnostics::emit(&diagnostics::ZP202);
        }
        self.profiler.begin_frame();
    }

    /// Open a zone; it closes when the guard is dropped.
    #[inline]
    pub fn zone(&self, zone: ZoneId) -> ZoneGuard<'_, C> {
        ZoneGuard::enter(self, zone)
    }

    /// Register `name` and open a zone for it.
    ///
    /// Takes the name-table lock on every call; cache the id from
    /// [`Profiler::register`] on hot paths.
    pub fn zone_named(&self, name: &str) -> ZoneGuard<'_, C> {
        let zone = self.profiler.register(name);
        self.zone(zone)
    }

    /// Run `f` inside a zone.
    pub fn scoped<R>(&self, zone: ZoneId, f: impl FnOnce() -> R) -> R {
        let _guard = self.zone(zone);
        f()
    }

    /// Enter one nesting level, returning the depth the zone was opened at.
    #[inline]
    pub(crate) fn push(&self) -> u16 {
        let depth = self.depth.get();
        self.depth.set(depth.saturating_add(1));
        depth
    }

    /// Leave one nesting level.
    #[inline]
    pub(crate) fn pop(&self) {
        self.depth.set(self.depth.get().saturating_sub(1));
    }
}

impl<C: Clock> std::fmt::Debug for ZoneContext<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZoneContext")
            .field("depth", &self.depth.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::ProfilerConfig;
    use crate::core::clock::ManualClock;
    use std::sync::{Arc, Barrier};
    use std::thread;

    #[test]
    fn test_depth_tracks_nesting() {
        let profiler = Profiler::with_clock(ProfilerConfig::minimal(), ManualClock::new());
        let outer = profiler.register("Outer");
        let inner = profiler.register("Inner");
        let ctx = profiler.context();

        ctx.begin_frame();
        let a = ctx.zone(outer);
        let b = ctx.zone(inner);
        assert_eq!(ctx.depth(), 2);
        drop(b);
        assert_eq!(ctx.depth(), 1);
        drop(a);
        assert_eq!(ctx.depth(), 0);
    }

    #[test]
    fn test_scoped_returns_value() {
        let profiler = Profiler::with_clock(ProfilerConfig::minimal(), ManualClock::new());
        let zone = profiler.register("Work");
        let ctx = profiler.context();
        ctx.begin_frame();
        let value = ctx.scoped(zone, || {
            assert_eq!(ctx.depth(), 1);
            7
        });
        assert_eq!(value, 7);
        assert_eq!(ctx.depth(), 0);
    }

    #[test]
    fn test_begin_frame_resets_depth() {
        diagnostics::suppress_diagnostics(true);
        let profiler = Profiler::with_clock(ProfilerConfig::minimal(), ManualClock::new());
        let ctx = profiler.context();
        ctx.push();
        ctx.push();
        ctx.begin_frame();
        diagnostics::suppress_diagnostics(false);
        assert_eq!(ctx.depth(), 0);
    }

    #[test]
    fn test_zone_named_interns_once() {
        let clock = ManualClock::new();
        let profiler = Profiler::with_clock(ProfilerConfig::minimal(), clock.clone());
        let ctx = profiler.context();

        ctx.begin_frame();
        let first = {
            let guard = ctx.zone_named("Loader");
            clock.advance_ms(2);
            guard.zone()
        };
        {
            let again = ctx.zone_named("Loader");
            assert_eq!(again.zone(), first);
        }
        ctx.begin_frame();

        assert_eq!(profiler.zone_count(), 1);
        assert_eq!(profiler.register("Loader"), first);

        let snap = profiler.snapshot();
        assert_eq!(snap.frames[0].zone_count, 2);
        assert_eq!(snap.zone("Loader").unwrap().history, vec![2.0]);
    }

    #[test]
    fn test_threads_do_not_share_depth() {
        let profiler = Profiler::with_clock(ProfilerConfig::minimal(), ManualClock::new());
        let barrier = Arc::new(Barrier::new(2));

        let handles: Vec<_> = (0..2u16)
            .map(|t| {
                let profiler = profiler.clone();
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    let zone = profiler.register(if t == 0 { "A" } else { "B" });
                    let ctx = profiler.context();
                    let mut guards = Vec::new();
                    for expected in 0..4 {
                        barrier.wait();
                        assert_eq!(ctx.depth(), expected);
                        guards.push(ctx.zone(zone));
                    }
                    while let Some(guard) = guards.pop() {
                        drop(guard);
                    }
                    ctx.depth()
                })
            })
            .collect();

        for h in handles {
            assert_eq!(h.join().unwrap(), 0);
        }
    }
}
