//! 2D sprite component.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// Sprite identified by a texture key, its size in world units and an offset
/// if the texture is a spritesheet. The offset selects the frame to display.
#[derive(Component, Clone, Debug)]
pub struct Sprite {
    pub tex_key: String,
    pub width: f32,
    pub height: f32,
    pub offset: Vector2,
}

impl Sprite {
    /// Full-frame sprite at offset zero.
    pub fn new(tex_key: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            tex_key: tex_key.into(),
            width,
            height,
            offset: Vector2::zero(),
        }
    }

    pub fn with_offset(mut self, offset: Vector2) -> Self {
        self.offset = offset;
        self
    }
}
