//! Diagnostics for profiler misuse.
//!
//! Recording never reports anything: zones below the threshold or past the
//! per-frame cap are dropped silently. Diagnostics cover the cases where
//! the host is using the profiler wrongly.
//!
//! ## Diagnostic Codes
//!
//! | Code  | Meaning                                 |
//! |-------|-----------------------------------------|
//! | ZP001 | Invalid configuration, defaults used    |
//! | ZP201 | Frames driven from more than one thread |
//! | ZP202 | Zone open across a frame boundary       |
//! | ZP301 | Zone name table full                    |
//!
//! Set `FRAMEZONE_STRICT=1` (errors) or `FRAMEZONE_STRICT=2` (warnings too)
//! and call [`init_from_env`] to make diagnostics fatal in CI.

pub mod emit;
pub mod kind;
pub mod strict;
pub mod tracy;

pub use emit::{emit, is_suppressed, set_sink, suppress_diagnostics, CollectingSink, DiagnosticSink};
pub use kind::{Diagnostic, DiagnosticKind, ZP001, ZP201, ZP202, ZP301};
pub use strict::{init_from_env, set_strict_mode, strict_mode, StrictMode, StrictModeGuard};
