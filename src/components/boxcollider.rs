//! Axis-aligned box collider component.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// Axis-aligned collision box attached to an entity.
///
/// The box spans `position + offset` to `position + offset + size`, where
/// `position` is the entity's [`MapPosition`](super::mapposition::MapPosition).
#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct BoxCollider {
    pub size: Vector2,
    pub offset: Vector2,
}

impl BoxCollider {
    /// Create a BoxCollider with given size.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vector2::new(width, height),
            offset: Vector2::zero(),
        }
    }

    pub fn with_offset(mut self, offset: Vector2) -> Self {
        self.offset = offset;
        self
    }

    /// Returns (min, max) of the collider AABB for a given entity position.
    /// Handles negative size by normalizing to proper min/max.
    pub fn aabb(&self, position: Vector2) -> (Vector2, Vector2) {
        let p0 = position + self.offset;
        let p1 = p0 + self.size;
        let min = Vector2::new(p0.x.min(p1.x), p0.y.min(p1.y));
        let max = Vector2::new(p0.x.max(p1.x), p0.y.max(p1.y));
        (min, max)
    }

    pub fn get_aabb(&self, position: Vector2) -> (f32, f32, f32, f32) {
        let (min, max) = self.aabb(position);
        (min.x, min.y, max.x - min.x, max.y - min.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_from_position_and_offset() {
        let collider = BoxCollider::new(10.0, 20.0).with_offset(Vector2::new(1.0, 2.0));
        let (min, max) = collider.aabb(Vector2::new(100.0, 200.0));
        assert_eq!(min, Vector2::new(101.0, 202.0));
        assert_eq!(max, Vector2::new(111.0, 222.0));
    }

    #[test]
    fn test_aabb_normalizes_negative_size() {
        let collider = BoxCollider::new(-10.0, -20.0);
        let (min, max) = collider.aabb(Vector2::new(0.0, 0.0));
        assert_eq!(min, Vector2::new(-10.0, -20.0));
        assert_eq!(max, Vector2::new(0.0, 0.0));
    }
}
