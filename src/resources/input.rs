//! Per-frame keyboard input resource.
//!
//! Captures the subset of keyboard state the game cares about and exposes it
//! to systems via the [`InputState`] resource. Movement uses the arrow keys,
//! zoom uses Q/E or the mouse wheel, M toggles music, C clears the debug
//! overlay, and F11 toggles debug mode.

use bevy_ecs::prelude::*;
use raylib::prelude::*;

/// Boolean key state with an associated keyboard binding.
#[derive(Debug, Clone, Copy)]
pub struct BoolState {
    /// Whether the key is currently held down this frame.
    pub active: bool,
    /// Whether the key was just pressed this frame.
    pub just_pressed: bool,

    /// The key bound to this action.
    pub key_binding: KeyboardKey,
}

impl BoolState {
    fn bound_to(key: KeyboardKey) -> Self {
        Self {
            active: false,
            just_pressed: false,
            key_binding: key,
        }
    }
}

impl Default for BoolState {
    fn default() -> Self {
        Self::bound_to(KeyboardKey::KEY_NULL)
    }
}

/// Resource capturing the per-frame keyboard state relevant to gameplay.
#[derive(Resource, Debug, Clone)]
pub struct InputState {
    pub direction_up: BoolState,
    pub direction_down: BoolState,
    pub direction_left: BoolState,
    pub direction_right: BoolState,
    // Action keys
    pub zoom_in: BoolState,
    pub zoom_out: BoolState,
    pub toggle_music: BoolState,
    pub clear_overlay: BoolState,
    pub mode_debug: BoolState,
    /// Mouse wheel movement this frame (positive = scroll up).
    pub wheel_move: f32,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            direction_up: BoolState::bound_to(KeyboardKey::KEY_UP),
            direction_down: BoolState::bound_to(KeyboardKey::KEY_DOWN),
            direction_left: BoolState::bound_to(KeyboardKey::KEY_LEFT),
            direction_right: BoolState::bound_to(KeyboardKey::KEY_RIGHT),
            zoom_in: BoolState::bound_to(KeyboardKey::KEY_E),
            zoom_out: BoolState::bound_to(KeyboardKey::KEY_Q),
            toggle_music: BoolState::bound_to(KeyboardKey::KEY_M),
            clear_overlay: BoolState::bound_to(KeyboardKey::KEY_C),
            mode_debug: BoolState::bound_to(KeyboardKey::KEY_F11),
            wheel_move: 0.0,
        }
    }
}
