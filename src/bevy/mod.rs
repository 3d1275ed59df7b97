//! Bevy integration for framezone.
//!
//! Provides a plugin that begins a profiler frame at the start of every
//! app update and exposes the profiler as a Bevy resource.

mod plugin;
mod resource;
mod systems;

pub use plugin::FrameZonePlugin;
pub use resource::ProfilerResource;
