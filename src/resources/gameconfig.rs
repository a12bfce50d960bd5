//! Game configuration resource.
//!
//! Manages settings loaded from an INI configuration file. Provides defaults
//! for safe startup; missing values keep their defaults.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 1000
//! height = 480
//! target_fps = 60
//!
//! [game]
//! map = ./assets/maps/farm.map
//! tileset = ./assets/textures/grass.png
//! player_sheet = ./assets/textures/character_sheet.png
//! music = ./assets/audio/averys_farm.mp3
//! player_speed = 3.0
//! player_size = 48
//! start_zoom = 1.5
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

const DEFAULT_WINDOW_WIDTH: u32 = 1000;
const DEFAULT_WINDOW_HEIGHT: u32 = 480;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_MAP_PATH: &str = "./assets/maps/farm.map";
const DEFAULT_TILESET_PATH: &str = "./assets/textures/grass.png";
const DEFAULT_PLAYER_SHEET_PATH: &str = "./assets/textures/character_sheet.png";
const DEFAULT_MUSIC_PATH: &str = "./assets/audio/averys_farm.mp3";
const DEFAULT_PLAYER_SPEED: f32 = 3.0;
const DEFAULT_PLAYER_SIZE: u32 = 48;
const DEFAULT_START_ZOOM: f32 = 1.5;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Game configuration resource.
///
/// Stores window settings and asset paths. Loaded once at startup, before the
/// window opens.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second (the fixed tick rate).
    pub target_fps: u32,
    /// Path to the tile map (`.map` text format or `.json`).
    pub map_path: PathBuf,
    /// Path to the ground tileset texture.
    pub tileset_path: PathBuf,
    /// Path to the player sprite sheet.
    pub player_sheet_path: PathBuf,
    /// Path to the looping background track.
    pub music_path: PathBuf,
    /// Player walk speed in pixels per tick.
    pub player_speed: f32,
    /// Player sprite frame size in pixels.
    pub player_size: u32,
    /// Initial camera zoom.
    pub start_zoom: f32,
    /// Start with music muted.
    pub mute: bool,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            map_path: PathBuf::from(DEFAULT_MAP_PATH),
            tileset_path: PathBuf::from(DEFAULT_TILESET_PATH),
            player_sheet_path: PathBuf::from(DEFAULT_PLAYER_SHEET_PATH),
            music_path: PathBuf::from(DEFAULT_MUSIC_PATH),
            player_speed: DEFAULT_PLAYER_SPEED,
            player_size: DEFAULT_PLAYER_SIZE,
            start_zoom: DEFAULT_START_ZOOM,
            mute: false,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }

        // [game] section
        if let Some(path) = config.get("game", "map") {
            self.map_path = PathBuf::from(path);
        }
        if let Some(path) = config.get("game", "tileset") {
            self.tileset_path = PathBuf::from(path);
        }
        if let Some(path) = config.get("game", "player_sheet") {
            self.player_sheet_path = PathBuf::from(path);
        }
        if let Some(path) = config.get("game", "music") {
            self.music_path = PathBuf::from(path);
        }
        if let Some(speed) = config.getfloat("game", "player_speed").ok().flatten() {
            self.player_speed = speed as f32;
        }
        if let Some(size) = config.getuint("game", "player_size").ok().flatten() {
            self.player_size = size as u32;
        }
        if let Some(zoom) = config.getfloat("game", "start_zoom").ok().flatten() {
            self.start_zoom = zoom as f32;
        }

        info!(
            "Loaded config: {}x{} window, fps={}, map={:?}",
            self.window_width, self.window_height, self.target_fps, self.map_path
        );

        Ok(())
    }
}
