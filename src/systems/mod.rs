//! ECS systems.
//!
//! Submodules overview
//! - [`audio`] – audio thread and the systems bridging its message queues
//! - [`camera`] – follow the player and apply debounced zoom input
//! - [`input`] – read hardware input and update [`crate::resources::input::InputState`]
//! - [`player`] – the per-tick movement/animation controller
//! - [`render`] – draw world and debug overlays using Raylib
//! - [`time`] – update simulation time, delta, and frame counter

pub mod audio;
pub mod camera;
pub mod input;
pub mod player;
pub mod render;
pub mod time;
