//! Group tag component.

use bevy_ecs::prelude::Component;

/// Tag component for grouping entities by name ("tiles", "player", ...).
#[derive(Component, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Group(pub String);

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}
