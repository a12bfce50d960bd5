//! High-level game setup: asset loading and entity spawning.
//!
//! Everything here runs once at startup, before the main loop. Any failure is
//! fatal; the caller logs the error and exits.

use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::group::Group;
use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::components::sprite::Sprite;
use crate::components::zindex::ZIndex;
use crate::error::GameError;
use crate::events::audio::{AudioCmd, AudioMessage};
use crate::resources::audio::{AudioBridge, MusicState};
use crate::resources::gameconfig::GameConfig;
use crate::resources::tilemap::{COLLISION_LAYER, Tilemap};

/// Key of the single background track.
pub const MUSIC_ID: &str = "farm_theme";
/// Texture key of the ground tileset.
pub const TILESET_TEX: &str = "tileset";
/// Texture key of the player sprite sheet.
pub const PLAYER_TEX: &str = "player-sheet";

/// Load a tilemap from disk, dispatching on the file extension:
/// `.json` is the Tilesetter-style format, anything else the text format.
pub fn load_tilemap_file(path: &std::path::Path) -> Result<Tilemap, GameError> {
    let source = std::fs::read_to_string(path)
        .map_err(|e| GameError::asset(path.display().to_string(), e))?;
    let parse = if path.extension().is_some_and(|ext| ext == "json") {
        Tilemap::from_json_str(&source)
    } else {
        Tilemap::from_text(&source)
    };
    parse.map_err(|source| GameError::MapParse {
        path: path.display().to_string(),
        source,
    })
}

/// Load a texture or fail with an asset error.
pub fn load_texture(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    path: &std::path::Path,
) -> Result<Texture2D, GameError> {
    rl.load_texture(thread, &path.display().to_string())
        .map_err(|e| GameError::asset(path.display().to_string(), e))
}

/// Spawn one entity per placed tile, layer by layer.
///
/// Layers draw in file order: with N layers the first gets ZIndex -N and the
/// last -1, keeping every tile behind the player (ZIndex 0). The collision
/// layer is data only and spawns nothing.
pub fn spawn_tiles(world: &mut World, tilemap: &Tilemap, tex_width: i32) {
    let tile_size = tilemap.tile_size as f32;
    let tiles_per_row = ((tex_width as f32 / tile_size).floor() as u32).max(1);

    let drawable: Vec<_> = tilemap
        .layers
        .iter()
        .filter(|l| l.name != COLLISION_LAYER)
        .collect();
    let layer_count = drawable.len() as i32;

    for (layer_index, layer) in drawable.iter().enumerate() {
        let z = -(layer_count - layer_index as i32);
        for pos in layer.positions.iter() {
            let wx = pos.x as f32 * tile_size;
            let wy = pos.y as f32 * tile_size;

            // Tileset frame from the zero-based id, left-to-right, top-to-bottom
            let col = pos.id % tiles_per_row;
            let row = pos.id / tiles_per_row;

            world.spawn((
                Group::new("tiles"),
                MapPosition::new(wx, wy),
                ZIndex(z),
                Sprite::new(TILESET_TEX, tile_size, tile_size).with_offset(Vector2 {
                    x: col as f32 * tile_size,
                    y: row as f32 * tile_size,
                }),
            ));
        }
    }
}

/// Spawn the player at the center of the map.
pub fn spawn_player(world: &mut World, config: &GameConfig, tilemap: &Tilemap) -> Entity {
    let size = config.player_size as f32;
    let start = Vector2 {
        x: (tilemap.map_width * tilemap.tile_size) as f32 * 0.5 - size * 0.5,
        y: (tilemap.map_height * tilemap.tile_size) as f32 * 0.5 - size * 0.5,
    };

    let player = Player::new(config.player_speed, size);
    let sprite = Sprite::new(PLAYER_TEX, size, size).with_offset(player.frame_offset());

    world
        .spawn((
            Group::new("player"),
            MapPosition::new(start.x, start.y),
            ZIndex(0),
            sprite,
            BoxCollider::new(size, size),
            player,
        ))
        .id()
}

/// How long to wait for the audio thread to report on the background track.
const MUSIC_LOAD_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

/// Load the background track and, unless muted, start it looped.
///
/// Blocks on the audio thread's load reply: a missing or corrupt track is a
/// fatal startup error, the same as any other asset.
pub fn start_music(world: &mut World, config: &GameConfig) -> Result<(), GameError> {
    let path = config.music_path.display().to_string();
    let (tx_cmd, rx_msg) = {
        let bridge = world.resource::<AudioBridge>();
        (bridge.tx_cmd.clone(), bridge.rx_msg.clone())
    };

    tx_cmd
        .send(AudioCmd::LoadMusic {
            id: MUSIC_ID.into(),
            path: path.clone(),
        })
        .map_err(|e| GameError::asset(&path, e))?;

    loop {
        match rx_msg.recv_timeout(MUSIC_LOAD_TIMEOUT) {
            Ok(AudioMessage::MusicLoaded { .. }) => break,
            Ok(AudioMessage::MusicLoadFailed { error, .. }) => {
                return Err(GameError::asset(&path, error));
            }
            Ok(_) => continue,
            Err(e) => return Err(GameError::asset(&path, e)),
        }
    }

    let play = !config.mute;
    if play {
        let _ = tx_cmd.send(AudioCmd::PlayMusic {
            id: MUSIC_ID.into(),
            looped: true,
        });
    }
    // The load reply was consumed here, so mirror it into MusicState directly.
    let mut state = world.resource_mut::<MusicState>();
    state.loaded = true;
    state.playing = play;
    Ok(())
}
