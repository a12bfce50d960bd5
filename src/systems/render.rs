//! Render system.
//!
//! Draws all sprites back-to-front in camera space, then the optional debug
//! layers. For culling we compute the world-rect visible by the camera from
//! [`CameraView::view_rect`] and do AABB intersection before sorting.

use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::sprite::Sprite;
use crate::components::zindex::ZIndex;
use crate::resources::camera::CameraView;
use crate::resources::debugmode::DebugMode;
use crate::resources::debugoverlay::{DebugOverlay, OverlayKind};
use crate::resources::screensize::ScreenSize;
use crate::resources::texturestore::TextureStore;
use crate::resources::worldtime::WorldTime;

/// Background clear color (the grass-green of the reference art).
const CLEAR_COLOR: Color = Color::new(147, 211, 196, 255);

pub fn render_system(
    mut rl: NonSendMut<raylib::RaylibHandle>,
    thread: NonSend<raylib::RaylibThread>,
    textures: NonSend<TextureStore>,
    camera: Res<CameraView>,
    screen: Res<ScreenSize>,
    overlay: Res<DebugOverlay>,
    time: Res<WorldTime>,
    debug_mode: Option<Res<DebugMode>>,
    sprites: Query<(&Sprite, &MapPosition, &ZIndex)>,
    colliders: Query<(&BoxCollider, &MapPosition)>,
) {
    let cam2d = camera.to_camera2d();
    let (view_min, view_max) = camera.view_rect(screen.w as f32, screen.h as f32);

    // Collect visible sprites, sort by z, then draw.
    let mut to_draw: Vec<(Sprite, MapPosition, ZIndex)> = sprites
        .iter()
        .filter_map(|(s, p, z)| {
            let min = p.pos;
            let max = Vector2 {
                x: min.x + s.width,
                y: min.y + s.height,
            };
            let overlap = !(max.x < view_min.x
                || min.x > view_max.x
                || max.y < view_min.y
                || min.y > view_max.y);
            overlap.then(|| (s.clone(), *p, *z))
        })
        .collect();
    to_draw.sort_by_key(|(_, _, z)| *z);

    let mut d = rl.begin_drawing(&thread);
    d.clear_background(CLEAR_COLOR);

    {
        let mut d2 = d.begin_mode2D(cam2d);

        for (sprite, pos, _z) in to_draw.iter() {
            if let Some(tex) = textures.get(&sprite.tex_key) {
                // Source rect selects a frame from the spritesheet
                let src = Rectangle {
                    x: sprite.offset.x,
                    y: sprite.offset.y,
                    width: sprite.width,
                    height: sprite.height,
                };
                let dest = Rectangle {
                    x: pos.pos.x,
                    y: pos.pos.y,
                    width: sprite.width,
                    height: sprite.height,
                };
                d2.draw_texture_pro(tex, src, dest, Vector2::zero(), 0.0, Color::WHITE);
            }
        }

        if debug_mode.is_some() {
            for (rect, kind) in overlay.iter() {
                let color = match kind {
                    OverlayKind::Candidate => Color::YELLOW,
                    OverlayKind::BlockedTile => Color::RED,
                };
                d2.draw_rectangle_lines(
                    rect.x as i32,
                    rect.y as i32,
                    rect.width as i32,
                    rect.height as i32,
                    color,
                );
            }
            for (collider, position) in colliders.iter() {
                let (x, y, w, h) = collider.get_aabb(position.pos);
                d2.draw_rectangle_lines(x as i32, y as i32, w as i32, h as i32, Color::GREEN);
            }
        }
    }

    if debug_mode.is_some() {
        let fps = d.get_fps();
        let text = format!(
            "DEBUG (F11) | FPS: {} | t {:.1}s frame {} | cam ({:.1}, {:.1}) zoom {:.2} | overlay {}",
            fps,
            time.elapsed,
            time.frame_count,
            camera.target.x,
            camera.target.y,
            camera.zoom,
            overlay.len()
        );
        d.draw_text(&text, 10, 10, 10, Color::BLACK);
    }
}
