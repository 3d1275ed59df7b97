//! Bevy systems for frame lifecycle management.

use bevy_ecs::world::World;

use crate::bevy::resource::ProfilerResource;

/// System that runs at the start of each app update.
///
/// Closes the previous profiler frame and opens the next one. It is an
/// exclusive system so it always runs on the thread driving the schedule,
/// keeping a single frame writer.
pub fn begin_frame_system(world: &mut World) {
    world.resource::<ProfilerResource>().begin_frame();
}
