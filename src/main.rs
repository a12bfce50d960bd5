//! Hashnimals main entry point.
//!
//! A top-down 2D tile game written in Rust using:
//! - **raylib** for windowing, graphics, and audio
//! - **bevy_ecs** for entity-component-system architecture
//!
//! A player sprite walks over a tile map, animates through a small frame set
//! depending on movement direction, and background music loops.
//!
//! # Main Loop
//!
//! 1. Load config, initialize the raylib window, ECS world, and resources
//! 2. Load the tile map, textures, and background track (fatal on failure)
//! 3. Spawn tile and player entities, register observers and systems
//! 4. Run the fixed-rate game loop: input, player controller, camera,
//!    audio bridging, render
//! 5. Shut down the audio thread on exit
//!
//! # Controls
//!
//! Arrow keys move, Q/E or the mouse wheel zoom, M toggles music,
//! F11 toggles debug mode, C clears the collision overlay.

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

mod components;
mod error;
mod events;
mod game;
mod resources;
mod systems;

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use clap::Parser;
use std::path::PathBuf;

use crate::error::GameError;
use crate::events::clearoverlay::clear_overlay_observer;
use crate::events::switchdebug::switch_debug_observer;
use crate::resources::audio::{setup_audio, shutdown_audio};
use crate::resources::camera::CameraView;
use crate::resources::collisiongrid::CollisionGrid;
use crate::resources::debugoverlay::DebugOverlay;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;
use crate::resources::screensize::ScreenSize;
use crate::resources::texturestore::TextureStore;
use crate::resources::worldtime::WorldTime;
use crate::systems::audio::{
    forward_audio_cmds, music_toggle, poll_audio_messages, track_music_state,
    update_bevy_audio_cmds, update_bevy_audio_messages,
};
use crate::systems::camera::{camera_follow, camera_zoom};
use crate::systems::input::update_input_state;
use crate::systems::player::player_controller;
use crate::systems::render::render_system;
use crate::systems::time::update_world_time;

/// Hashnimals — a tiny top-down tile game
#[derive(Parser)]
#[command(version, about = "Hashnimals: walk the farm, listen to the loop")]
struct Cli {
    /// Path to the configuration file (default: ./config.ini)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Path to the tile map, overriding the configured one
    #[arg(long, value_name = "PATH")]
    map: Option<PathBuf>,

    /// Start with background music muted
    #[arg(long)]
    mute: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), GameError> {
    let mut config = match cli.config {
        Some(path) => GameConfig::with_path(path),
        None => GameConfig::new(),
    };
    config.load_from_file().ok(); // ignore errors, use defaults
    if let Some(map) = cli.map {
        config.map_path = map;
    }
    config.mute = cli.mute;

    // --------------- Raylib window & assets ---------------
    let (mut rl, thread) = raylib::init()
        .size(config.window_width as i32, config.window_height as i32)
        .title("Hashnimals")
        .build();
    rl.set_target_fps(config.target_fps);

    let tilemap = game::load_tilemap_file(&config.map_path)?;
    let tileset = game::load_texture(&mut rl, &thread, &config.tileset_path)?;
    let tileset_width = tileset.width;
    let player_sheet = game::load_texture(&mut rl, &thread, &config.player_sheet_path)?;

    let mut textures = TextureStore::new();
    textures.insert(game::TILESET_TEX, tileset);
    textures.insert(game::PLAYER_TEX, player_sheet);

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(ScreenSize {
        w: config.window_width as i32,
        h: config.window_height as i32,
    });
    world.insert_resource(InputState::default());
    world.insert_resource(DebugOverlay::default());
    world.insert_resource(CameraView::new(
        config.window_width as f32,
        config.window_height as f32,
        config.start_zoom,
    ));
    world.insert_resource(CollisionGrid::from_tilemap(&tilemap));
    world.insert_non_send_resource(textures);

    // Audio thread must be up before the game queues music commands
    setup_audio(&mut world);

    game::spawn_tiles(&mut world, &tilemap, tileset_width);
    game::spawn_player(&mut world, &config, &tilemap);
    game::start_music(&mut world, &config)?;

    world.insert_resource(config);

    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);

    world.spawn(Observer::new(switch_debug_observer));
    world.spawn(Observer::new(clear_overlay_observer));
    // Ensure the observers are registered before any system triggers events.
    world.flush();

    let mut update = Schedule::default();
    update.add_systems(update_input_state);
    update.add_systems(music_toggle.after(update_input_state));
    update.add_systems(
        // audio bridge systems must stay together
        (
            update_bevy_audio_cmds,
            forward_audio_cmds,
            poll_audio_messages,
            update_bevy_audio_messages,
            track_music_state,
        )
            .chain()
            .after(music_toggle),
    );
    update.add_systems(player_controller.after(update_input_state));
    update.add_systems(camera_follow.after(player_controller));
    update.add_systems(camera_zoom.after(update_input_state));
    update.add_systems(render_system.after(camera_follow).after(camera_zoom));

    update
        .initialize(&mut world)
        .expect("Failed to initialize schedule");

    // --------------- Main loop ---------------
    while !world
        .non_send_resource::<raylib::RaylibHandle>()
        .window_should_close()
    {
        let dt = world
            .non_send_resource::<raylib::RaylibHandle>()
            .get_frame_time();
        update_world_time(&mut world, dt);

        update.run(&mut world);

        world.clear_trackers(); // Clear changed components for next frame
    }
    shutdown_audio(&mut world);
    Ok(())
}
