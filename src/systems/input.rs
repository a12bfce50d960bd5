//! Input systems.
//!
//! [`update_input_state`] reads hardware input from Raylib each frame and
//! writes the results into [`crate::resources::input::InputState`]. Toggle
//! actions (debug mode, overlay clearing) are emitted as events on key press.

use bevy_ecs::prelude::*;
use raylib::ffi::KeyboardKey;

use crate::events::clearoverlay::ClearOverlayEvent;
use crate::events::switchdebug::SwitchDebugEvent;
use crate::resources::input::InputState;

/// Poll Raylib for keyboard and wheel input and update the `InputState` resource.
pub fn update_input_state(
    mut input: ResMut<InputState>,
    rl: NonSendMut<raylib::RaylibHandle>,
    mut commands: Commands,
) {
    let is_key_down = |key: KeyboardKey| rl.is_key_down(key);
    let is_key_pressed = |key: KeyboardKey| rl.is_key_pressed(key);

    // Held state for per-tick sampling
    input.direction_up.active = is_key_down(input.direction_up.key_binding);
    input.direction_down.active = is_key_down(input.direction_down.key_binding);
    input.direction_left.active = is_key_down(input.direction_left.key_binding);
    input.direction_right.active = is_key_down(input.direction_right.key_binding);
    input.zoom_in.active = is_key_down(input.zoom_in.key_binding);
    input.zoom_out.active = is_key_down(input.zoom_out.key_binding);

    // Debounced actions fire once per press
    input.toggle_music.just_pressed = is_key_pressed(input.toggle_music.key_binding);
    input.toggle_music.active = is_key_down(input.toggle_music.key_binding);
    input.clear_overlay.just_pressed = is_key_pressed(input.clear_overlay.key_binding);
    input.clear_overlay.active = is_key_down(input.clear_overlay.key_binding);
    input.mode_debug.just_pressed = is_key_pressed(input.mode_debug.key_binding);
    input.mode_debug.active = is_key_down(input.mode_debug.key_binding);

    input.wheel_move = rl.get_mouse_wheel_move();

    if input.mode_debug.just_pressed {
        commands.trigger(SwitchDebugEvent {});
    }
    if input.clear_overlay.just_pressed {
        commands.trigger(ClearOverlayEvent {});
    }
}
