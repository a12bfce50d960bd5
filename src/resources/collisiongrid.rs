//! Static collision grid derived from the map's collision layer.
//!
//! Built once at load time; per-frame movement asks [`CollisionGrid::would_collide`]
//! before committing a displacement. The grid never changes after startup.

use bevy_ecs::prelude::Resource;
use raylib::prelude::{Rectangle, Vector2};

use crate::resources::tilemap::{COLLISION_LAYER, Tilemap};

/// One boolean "blocked" flag per tile cell, row-major.
#[derive(Resource, Debug, Clone)]
pub struct CollisionGrid {
    width: u32,
    height: u32,
    tile_size: f32,
    blocked: Vec<bool>,
}

impl CollisionGrid {
    /// Grid with no blocked cells.
    pub fn empty(width: u32, height: u32, tile_size: f32) -> Self {
        Self {
            width,
            height,
            tile_size,
            blocked: vec![false; (width * height) as usize],
        }
    }

    /// Derive the grid from a tilemap's `collision` layer.
    ///
    /// A map without that layer yields a grid with nothing blocked.
    pub fn from_tilemap(map: &Tilemap) -> Self {
        let mut grid = Self::empty(map.map_width, map.map_height, map.tile_size as f32);
        if let Some(layer) = map.layer(COLLISION_LAYER) {
            for pos in &layer.positions {
                if pos.x < map.map_width && pos.y < map.map_height {
                    grid.blocked[(pos.y * map.map_width + pos.x) as usize] = true;
                }
            }
        }
        grid
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// Whether the given cell is blocked. Out-of-range cells are open.
    pub fn is_blocked(&self, cx: u32, cy: u32) -> bool {
        if cx >= self.width || cy >= self.height {
            return false;
        }
        self.blocked[(cy * self.width + cx) as usize]
    }

    /// Test a candidate AABB against every blocked tile, row-major, returning
    /// the first offending tile's world-space rectangle.
    ///
    /// Overlap uses strict inequalities: a box exactly edge-touching a blocked
    /// tile does not collide.
    pub fn would_collide(&self, min: Vector2, max: Vector2) -> Option<Rectangle> {
        for cy in 0..self.height {
            for cx in 0..self.width {
                if !self.blocked[(cy * self.width + cx) as usize] {
                    continue;
                }
                let tile_min_x = cx as f32 * self.tile_size;
                let tile_min_y = cy as f32 * self.tile_size;
                let tile_max_x = tile_min_x + self.tile_size;
                let tile_max_y = tile_min_y + self.tile_size;
                if min.x < tile_max_x
                    && max.x > tile_min_x
                    && min.y < tile_max_y
                    && max.y > tile_min_y
                {
                    return Some(Rectangle {
                        x: tile_min_x,
                        y: tile_min_y,
                        width: self.tile_size,
                        height: self.tile_size,
                    });
                }
            }
        }
        None
    }
}
