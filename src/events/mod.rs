//! Event types and observers used by the game.
//!
//! Submodules:
//! - [`audio`] – commands and messages for the background audio thread
//! - [`clearoverlay`] – empty the collision debug overlay
//! - [`switchdebug`] – toggle debug rendering on/off

pub mod audio;
pub mod clearoverlay;
pub mod switchdebug;
