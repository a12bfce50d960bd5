//! ECS components for entities.
//!
//! Submodules overview:
//! - [`boxcollider`] – axis-aligned rectangular collider for collision checks
//! - [`group`] – tag component for grouping entities by name
//! - [`mapposition`] – world-space position (pivot) for an entity
//! - [`player`] – player animation/movement state machine
//! - [`sprite`] – 2D sprite rendering component
//! - [`zindex`] – rendering order hint for 2D drawing

pub mod boxcollider;
pub mod group;
pub mod mapposition;
pub mod player;
pub mod sprite;
pub mod zindex;
