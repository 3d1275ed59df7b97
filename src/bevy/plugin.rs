//! Bevy plugin for framezone.

use bevy_app::{App, First, Plugin};

use crate::api::config::ProfilerConfig;
use crate::api::profiler::Profiler;
use crate::bevy::resource::ProfilerResource;
use crate::bevy::systems::begin_frame_system;

/// Bevy plugin that drives profiler frames from the app schedule.
///
/// # Example
///
/// ```rust,ignore
/// use bevy::prelude::*;
/// use framezone::bevy::{FrameZonePlugin, ProfilerResource};
///
/// fn physics(profiler: Res<ProfilerResource>) {
///     let ctx = profiler.context();
///     let _zone = ctx.zone_named("Physics");
///     // ...
/// }
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(FrameZonePlugin::default())
///     .add_systems(Update, physics)
///     .run();
/// ```
#[derive(Default)]
pub struct FrameZonePlugin {
    config: ProfilerConfig,
}

impl FrameZonePlugin {
    /// Create a new plugin with the given configuration.
    pub fn new(config: ProfilerConfig) -> Self {
        Self { config }
    }

    /// Keep a minute of history instead of ten seconds.
    pub fn long_history() -> Self {
        Self {
            config: ProfilerConfig::long_history(),
        }
    }
}

impl Plugin for FrameZonePlugin {
    fn build(&self, app: &mut App) {
        let profiler = Profiler::new(self.config.clone());

        app.insert_resource(ProfilerResource(profiler))
            .add_systems(First, begin_frame_system);
    }
}
