//! Simulation time resource.

use bevy_ecs::prelude::Resource;

/// Elapsed and per-frame time, plus a monotonic frame counter.
#[derive(Resource, Clone, Copy)]
pub struct WorldTime {
    pub elapsed: f32,
    pub delta: f32,
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            frame_count: 0,
        }
    }
}
