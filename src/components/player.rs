//! Player animation/movement state machine.
//!
//! The [`Player`] component carries everything the per-tick controller in
//! [`crate::systems::player`] needs: walk speed, sprite-sheet frame size,
//! facing direction, the per-tick moving flag, and the animation counters.
//!
//! The sprite source rectangle is never stored; it is derived each tick from
//! `(frame, facing, size)` via [`Player::frame_offset`].

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// Facing direction of the player sprite.
///
/// The discriminants are the row indices of the character sprite sheet:
/// row 0 faces down, row 1 up, row 2 left, row 3 right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Down,
    Up,
    Left,
    Right,
}

impl Facing {
    /// Sprite-sheet row index for this facing.
    pub fn row(self) -> usize {
        match self {
            Facing::Down => 0,
            Facing::Up => 1,
            Facing::Left => 2,
            Facing::Right => 3,
        }
    }

    /// Unit displacement for this direction (screen coordinates, y grows down).
    pub fn step(self) -> Vector2 {
        match self {
            Facing::Down => Vector2 { x: 0.0, y: 1.0 },
            Facing::Up => Vector2 { x: 0.0, y: -1.0 },
            Facing::Left => Vector2 { x: -1.0, y: 0.0 },
            Facing::Right => Vector2 { x: 1.0, y: 0.0 },
        }
    }
}

/// Frames in the walk cycle (sprite-sheet columns).
pub const WALK_FRAMES: usize = 4;
/// Frames used while idle (first two columns only).
pub const IDLE_FRAMES: usize = 2;
/// The walk animation advances every 8th tick.
pub const WALK_CADENCE: u64 = 8;
/// The idle animation advances every 45th tick.
pub const IDLE_CADENCE: u64 = 45;

/// Animation and movement state for the player entity.
#[derive(Component, Clone, Debug)]
pub struct Player {
    /// Walk speed in world pixels per tick.
    pub speed: f32,
    /// Side length of one sprite-sheet frame in pixels.
    pub size: f32,
    /// Current facing, selects the sprite-sheet row.
    pub facing: Facing,
    /// True iff any directional input was active this tick. Reset every tick.
    pub moving: bool,
    /// Walk-cycle column, always in `0..WALK_FRAMES`.
    pub frame: usize,
    /// Monotonic tick counter, used only via modulo for animation cadence.
    pub frame_count: u64,
}

impl Player {
    pub fn new(speed: f32, size: f32) -> Self {
        Self {
            speed,
            size,
            facing: Facing::Down,
            moving: false,
            frame: 0,
            frame_count: 0,
        }
    }

    /// Advance the animation counters for one tick.
    ///
    /// Cadence: every 8th tick while moving, every 45th while idle. The frame
    /// wraps past the walk cycle, and idle animation is confined to the first
    /// two frames.
    pub fn tick_animation(&mut self) {
        if self.moving {
            if self.frame_count % WALK_CADENCE == 1 {
                self.frame += 1;
            }
        } else if self.frame_count % IDLE_CADENCE == 1 {
            self.frame += 1;
        }
        self.frame_count += 1;

        if self.frame >= WALK_FRAMES {
            self.frame = 0;
        }
        if !self.moving && self.frame >= IDLE_FRAMES {
            self.frame = 0;
        }
    }

    /// Top-left corner of the current frame inside the sprite sheet.
    ///
    /// Pure function of `(frame, facing, size)`.
    pub fn frame_offset(&self) -> Vector2 {
        Vector2 {
            x: self.frame as f32 * self.size,
            y: self.facing.row() as f32 * self.size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk_n(player: &mut Player, ticks: u64) {
        for _ in 0..ticks {
            player.moving = true;
            player.tick_animation();
        }
    }

    #[test]
    fn test_walk_cadence_advances_every_eighth_tick() {
        let mut player = Player::new(3.0, 48.0);
        // Tick 0 does not advance (0 % 8 != 1); tick 1 does.
        player.moving = true;
        player.tick_animation();
        assert_eq!(player.frame, 0);
        player.moving = true;
        player.tick_animation();
        assert_eq!(player.frame, 1);
    }

    #[test]
    fn test_walk_cycle_matches_reference_cadence() {
        let mut player = Player::new(3.0, 48.0);
        // After the mod-8-equals-1 phase offset, frame == (t / 8) % 4.
        for t in 0..200u64 {
            player.moving = true;
            player.tick_animation();
            let expected = (((t + 7) / 8) % WALK_FRAMES as u64) as usize;
            assert_eq!(player.frame, expected, "tick {}", t);
        }
    }

    #[test]
    fn test_idle_frames_stay_in_first_two_columns() {
        let mut player = Player::new(3.0, 48.0);
        for _ in 0..500 {
            player.moving = false;
            player.tick_animation();
            assert!(player.frame < IDLE_FRAMES);
        }
    }

    #[test]
    fn test_idle_resets_walk_frame_out_of_range() {
        let mut player = Player::new(3.0, 48.0);
        walk_n(&mut player, 20); // leaves frame at 2
        assert!(player.frame >= IDLE_FRAMES);
        player.moving = false;
        player.tick_animation();
        assert!(player.frame < IDLE_FRAMES);
    }

    #[test]
    fn test_frame_offset_is_pure_derivation() {
        let mut player = Player::new(3.0, 48.0);
        player.frame = 2;
        player.facing = Facing::Left;
        let off = player.frame_offset();
        assert_eq!(off.x, 96.0);
        assert_eq!(off.y, 96.0);
    }

    #[test]
    fn test_facing_rows_match_sheet_layout() {
        assert_eq!(Facing::Down.row(), 0);
        assert_eq!(Facing::Up.row(), 1);
        assert_eq!(Facing::Left.row(), 2);
        assert_eq!(Facing::Right.row(), 3);
    }
}
