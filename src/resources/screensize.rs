//! Screen size resource.
//!
//! Stores the window dimensions in pixels. The camera and renderer read this
//! to derive the view transform and cull rectangle.

use bevy_ecs::prelude::Resource;

/// Current screen size in pixels.
#[derive(Resource, Clone, Copy)]
pub struct ScreenSize {
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}
