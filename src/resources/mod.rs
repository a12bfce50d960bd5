//! ECS resources made available to systems.
//!
//! Overview
//! - `audio` – bridge and channels for the background audio thread
//! - `camera` – shared 2D camera model (pan + clamped zoom)
//! - `collisiongrid` – static blocked-tile grid derived from the map
//! - `debugmode` – presence toggles optional debug overlays and logs
//! - `debugoverlay` – bounded rectangles recorded on blocked moves
//! - `gameconfig` – window and asset settings from config.ini
//! - `input` – per-frame keyboard state of keys relevant to the game
//! - `screensize` – window dimensions in pixels
//! - `texturestore` – loaded textures keyed by string IDs
//! - `tilemap` – tile map data and parsers
//! - `worldtime` – simulation time, delta, and frame counter

pub mod audio;
pub mod camera;
pub mod collisiongrid;
pub mod debugmode;
pub mod debugoverlay;
pub mod gameconfig;
pub mod input;
pub mod screensize;
pub mod texturestore;
pub mod tilemap;
pub mod worldtime;
