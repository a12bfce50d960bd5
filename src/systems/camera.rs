//! Camera systems: follow the player and apply zoom input.

use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::resources::camera::{CameraView, ZOOM_STEP};
use crate::resources::input::InputState;

/// Keep the camera centered on the player's sprite box.
pub fn camera_follow(
    mut camera: ResMut<CameraView>,
    query: Query<(&Player, &MapPosition)>,
) {
    for (player, position) in query.iter() {
        let half = player.size * 0.5;
        camera.follow(position.pos, Vector2 { x: half, y: half });
    }
}

/// Apply zoom input from the mouse wheel or the dedicated keys.
///
/// Wheel and keys each contribute one step, but the total is clamped to a
/// single step per tick so holding both keys or scrolling fast never ramps
/// the zoom faster than one step per tick.
pub fn camera_zoom(mut camera: ResMut<CameraView>, input: Res<InputState>) {
    let mut steps: i32 = 0;
    if input.wheel_move > 0.0 {
        steps += 1;
    }
    if input.wheel_move < 0.0 {
        steps -= 1;
    }
    if input.zoom_in.active {
        steps += 1;
    }
    if input.zoom_out.active {
        steps -= 1;
    }
    let steps = steps.clamp(-1, 1);
    if steps != 0 {
        camera.zoom_by(steps as f32 * ZOOM_STEP);
    }
}
