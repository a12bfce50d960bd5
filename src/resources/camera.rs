//! Shared 2D camera model.
//!
//! [`CameraView`] keeps the player centered and holds the clamped zoom factor.
//! It only derives transforms; drawing happens in
//! [`crate::systems::render`].
//!
//! Zoom is additive: each step adds or subtracts [`ZOOM_STEP`] and the result
//! is clamped to `[ZOOM_MIN, ZOOM_MAX]`, so repeated input saturates instead
//! of diverging.

use bevy_ecs::prelude::Resource;
use raylib::prelude::{Camera2D, Vector2};

pub const ZOOM_MIN: f32 = 0.5;
pub const ZOOM_MAX: f32 = 5.0;
pub const ZOOM_STEP: f32 = 0.1;

/// Camera pan/zoom state, mutated in place every frame.
#[derive(Resource, Debug, Clone, Copy)]
pub struct CameraView {
    /// World point the camera looks at.
    pub target: Vector2,
    /// Screen point the target maps to (usually the screen center).
    pub offset: Vector2,
    /// Zoom factor, always within `[ZOOM_MIN, ZOOM_MAX]`.
    pub zoom: f32,
}

impl CameraView {
    pub fn new(screen_w: f32, screen_h: f32, zoom: f32) -> Self {
        Self {
            target: Vector2::zero(),
            offset: Vector2 {
                x: screen_w * 0.5,
                y: screen_h * 0.5,
            },
            zoom: zoom.clamp(ZOOM_MIN, ZOOM_MAX),
        }
    }

    /// Center the camera on an entity: its position plus half its bounding
    /// box, so the sprite appears centered regardless of its size.
    pub fn follow(&mut self, position: Vector2, half_extent: Vector2) {
        self.target = position + half_extent;
    }

    /// Adjust zoom additively, clamped to `[ZOOM_MIN, ZOOM_MAX]`.
    pub fn zoom_by(&mut self, delta: f32) {
        self.zoom = (self.zoom + delta).clamp(ZOOM_MIN, ZOOM_MAX);
    }

    /// View transform consumed by the rendering backend.
    pub fn to_camera2d(&self) -> Camera2D {
        Camera2D {
            target: self.target,
            offset: self.offset,
            rotation: 0.0,
            zoom: self.zoom,
        }
    }

    /// World-space rectangle visible on a screen of the given size.
    /// Used by the renderer for culling.
    pub fn view_rect(&self, screen_w: f32, screen_h: f32) -> (Vector2, Vector2) {
        let half = Vector2 {
            x: screen_w * 0.5 / self.zoom,
            y: screen_h * 0.5 / self.zoom,
        };
        (self.target - half, self.target + half)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_follow_centers_on_sprite_box() {
        let mut cam = CameraView::new(1000.0, 480.0, 1.5);
        cam.follow(Vector2::new(100.0, 100.0), Vector2::new(24.0, 24.0));
        assert_eq!(cam.target, Vector2::new(124.0, 124.0));
    }

    #[test]
    fn test_zoom_saturates_at_upper_bound() {
        let mut cam = CameraView::new(1000.0, 480.0, 1.5);
        for _ in 0..40 {
            cam.zoom_by(ZOOM_STEP);
        }
        assert!((cam.zoom - ZOOM_MAX).abs() < EPSILON);
    }

    #[test]
    fn test_zoom_saturates_at_lower_bound() {
        let mut cam = CameraView::new(1000.0, 480.0, 1.5);
        for _ in 0..40 {
            cam.zoom_by(-ZOOM_STEP);
        }
        assert!((cam.zoom - ZOOM_MIN).abs() < EPSILON);
    }

    #[test]
    fn test_zoom_never_leaves_clamp_range() {
        let mut cam = CameraView::new(1000.0, 480.0, 1.0);
        for i in 0..200 {
            cam.zoom_by(if i % 3 == 0 { -ZOOM_STEP } else { ZOOM_STEP });
            assert!(cam.zoom >= ZOOM_MIN && cam.zoom <= ZOOM_MAX);
        }
    }

    #[test]
    fn test_new_clamps_initial_zoom() {
        let cam = CameraView::new(800.0, 600.0, 9.0);
        assert_eq!(cam.zoom, ZOOM_MAX);
    }

    #[test]
    fn test_view_rect_scales_with_zoom() {
        let mut cam = CameraView::new(800.0, 600.0, 2.0);
        cam.target = Vector2::new(100.0, 100.0);
        let (min, max) = cam.view_rect(800.0, 600.0);
        assert!((min.x - (100.0 - 200.0)).abs() < EPSILON);
        assert!((max.y - (100.0 + 150.0)).abs() < EPSILON);
    }
}
