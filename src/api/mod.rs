//! Public API for framezone.
//!
//! This module contains all user-facing types and functions.
//! Most users should only interact with types from this module.

pub mod config;
pub mod context;
pub mod error;
pub mod host;
pub mod profiler;
pub mod scope;
pub mod snapshot;
pub mod stats;
