//! Profiling core: name interning, the frame ring and aggregation.

pub mod aggregate;
pub mod clock;
pub mod names;
pub mod ring;
