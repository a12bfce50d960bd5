//! Event and observer to clear the collision debug overlay.

use crate::resources::debugoverlay::DebugOverlay;
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;

/// Event used to empty the [`DebugOverlay`] resource.
#[derive(Event, Debug, Clone, Copy)]
pub struct ClearOverlayEvent {}

/// Observer that drops all recorded overlay rectangles.
pub fn clear_overlay_observer(
    _trigger: On<ClearOverlayEvent>,
    mut overlay: ResMut<DebugOverlay>,
) {
    debug!("Clearing {} overlay rects", overlay.len());
    overlay.clear();
}
