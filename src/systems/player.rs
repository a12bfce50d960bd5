//! Per-tick player controller.
//!
//! Consumes the directional flags in [`InputState`], moves the player with
//! per-axis collision checks against the [`CollisionGrid`], advances the
//! animation counters, and derives the sprite frame offset.
//!
//! Directions are processed in a fixed order (up, down, left, right) and the
//! facing used for the sprite row is the last one processed this tick. With
//! simultaneous keys this means right wins over left and vertical keys; the
//! ordering is deliberate and kept stable so the behavior is predictable.

use bevy_ecs::prelude::*;
use raylib::prelude::Rectangle;
use smallvec::SmallVec;

use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::player::{Facing, Player};
use crate::components::sprite::Sprite;
use crate::resources::collisiongrid::CollisionGrid;
use crate::resources::debugoverlay::{DebugOverlay, OverlayKind};
use crate::resources::input::InputState;

/// Move and animate the player for one tick.
///
/// Each active direction contributes a single-axis displacement of
/// `player.speed` pixels. The displacement is committed only if the collider
/// at the candidate position overlaps no blocked tile, so moving diagonally
/// into a wall still slides along the free axis. Rejected moves record the
/// candidate box and the offending tile in the [`DebugOverlay`].
pub fn player_controller(
    mut query: Query<(&mut Player, &mut MapPosition, &mut Sprite, &BoxCollider)>,
    input: Res<InputState>,
    grid: Res<CollisionGrid>,
    mut overlay: ResMut<DebugOverlay>,
) {
    let mut pressed: SmallVec<[Facing; 4]> = SmallVec::new();
    if input.direction_up.active {
        pressed.push(Facing::Up);
    }
    if input.direction_down.active {
        pressed.push(Facing::Down);
    }
    if input.direction_left.active {
        pressed.push(Facing::Left);
    }
    if input.direction_right.active {
        pressed.push(Facing::Right);
    }

    for (mut player, mut position, mut sprite, collider) in query.iter_mut() {
        player.moving = !pressed.is_empty();

        for &dir in &pressed {
            let delta = dir.step().scale_by(player.speed);
            let candidate = position.pos + delta;
            let (min, max) = collider.aabb(candidate);
            match grid.would_collide(min, max) {
                None => position.pos = candidate,
                Some(tile) => {
                    overlay.push(
                        Rectangle {
                            x: min.x,
                            y: min.y,
                            width: max.x - min.x,
                            height: max.y - min.y,
                        },
                        OverlayKind::Candidate,
                    );
                    overlay.push(tile, OverlayKind::BlockedTile);
                }
            }
            // Last direction processed this tick selects the sprite row.
            player.facing = dir;
        }

        player.tick_animation();
        sprite.offset = player.frame_offset();
    }
}
