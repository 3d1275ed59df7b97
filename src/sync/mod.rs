//! Synchronization primitives.
//!
//! Provides a thin mutex wrapper over std or parking_lot, plus the relaxed
//! counters behind [`ProfilerStats`](crate::ProfilerStats).

pub(crate) mod atomics;
pub(crate) mod mutex;
