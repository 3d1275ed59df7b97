//! # framezone
//!
//! Lightweight in-process frame/zone profiler for games and real-time
//! simulations.
//!
//! ## Features
//!
//! - Nested, named timing zones recorded per frame
//! - Bounded ring of recent frames (no allocation after startup)
//! - Lock-free writer; readers snapshot from any thread at any time
//! - Per-zone history plus a spike-resistant moving average
//! - Explicit per-thread nesting contexts, RAII zone guards
//! - Optional Bevy, Tracy, `log` and `serde` integration
//!
//! Capture is best effort: zones shorter than the configured minimum, or
//! past the per-frame cap, are dropped without any signal to the caller.
//!
//! ## Quick Start
//!
//! ```rust
//! use framezone::{Profiler, ProfilerConfig};
//!
//! let profiler = Profiler::new(ProfilerConfig::default());
//! let physics = profiler.register("Physics");
//! let ctx = profiler.context();
//!
//! // Game loop
//! for _ in 0..3 {
//!     ctx.begin_frame();
//!     let _zone = ctx.zone(physics);
//!     // ... step physics ...
//! }
//!
//! // Observer (any thread)
//! let snapshot = profiler.snapshot();
//! for (name, trend) in &snapshot.zones {
//!     println!("{name}: {:.3} ms", trend.ema);
//! }
//! ```
//!
//! ## Threading
//!
//! One thread drives frames (`begin_frame`) and records zones. Other threads
//! may hold their own [`ZoneContext`] and record too: their records land in
//! the same active frame and are memory-safe, but their placement relative
//! to frame boundaries is only as precise as the host's own synchronization.

pub mod api;
pub mod diagnostics;

#[allow(dead_code)]
mod core;
#[allow(dead_code)]
mod sync;

#[cfg(feature = "bevy")]
pub mod bevy;

// Re-export public API at crate root for convenience
pub use api::config::{
    ProfilerConfig, DEFAULT_MAX_ZONES_PER_FRAME, DEFAULT_MIN_ZONE_US, DEFAULT_RING_CAPACITY,
    DEFAULT_SMOOTHING, DEFAULT_SPIKE_CLAMP,
};
pub use api::context::ZoneContext;
pub use api::error::ProfilerError;
pub use api::profiler::Profiler;
pub use api::scope::ZoneGuard;
pub use api::snapshot::{FrameInfo, ProfileSnapshot, ZoneTrend};
pub use api::stats::ProfilerStats;

// Host capability
pub use api::host::{EntityInfo, PerfMetrics, Property, PropertyValue, SceneNode, SceneProvider};

// Core types
pub use crate::core::aggregate::EMA_BOOTSTRAP_EPSILON;
pub use crate::core::clock::{Clock, ManualClock, MonotonicClock};
pub use crate::core::names::{ZoneId, MAX_ZONE_NAMES};

// Diagnostics
pub use diagnostics::{Diagnostic, DiagnosticKind, StrictMode, StrictModeGuard};
