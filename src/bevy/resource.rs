//! Bevy resource wrapper for the profiler.

use bevy_ecs::system::Resource;

use crate::api::profiler::Profiler;

/// Bevy resource that wraps the profiler.
///
/// Systems read it via `Res<ProfilerResource>`. Bevy may run systems on
/// several threads; each system should create its own
/// [`ZoneContext`](crate::ZoneContext) rather than share one.
#[derive(Resource, Clone)]
pub struct ProfilerResource(pub Profiler);

impl ProfilerResource {
    /// Create a new profiler resource.
    pub fn new(profiler: Profiler) -> Self {
        Self(profiler)
    }
}

impl std::ops::Deref for ProfilerResource {
    type Target = Profiler;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
