//! Bounded debug overlay for collision visualization.
//!
//! When a movement is blocked, the controller appends the rejected candidate
//! box and the offending tile here; the renderer draws them while
//! [`DebugMode`](super::debugmode::DebugMode) is active. The list has a fixed
//! capacity and further pushes are dropped until it is cleared with the
//! dedicated input action, so it cannot grow without bound.

use arrayvec::ArrayVec;
use bevy_ecs::prelude::Resource;
use raylib::prelude::Rectangle;

/// Maximum rectangles retained at once.
pub const OVERLAY_CAPACITY: usize = 64;

/// What a stored rectangle represents, used to pick a draw color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    /// The candidate box of a rejected move.
    Candidate,
    /// The blocked tile that rejected it.
    BlockedTile,
}

/// Transient list of rectangles for diagnosing collisions.
#[derive(Resource, Debug, Default)]
pub struct DebugOverlay {
    rects: ArrayVec<(Rectangle, OverlayKind), OVERLAY_CAPACITY>,
}

impl DebugOverlay {
    /// Append a rectangle; silently dropped when the overlay is full.
    pub fn push(&mut self, rect: Rectangle, kind: OverlayKind) {
        let _ = self.rects.try_push((rect, kind));
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Rectangle, OverlayKind)> {
        self.rects.iter()
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    pub fn clear(&mut self) {
        self.rects.clear();
    }
}
