//! Texture registry.
//!
//! Textures are GPU handles owned by the render thread, so the store is
//! inserted as a non-send resource.

use raylib::prelude::Texture2D;
use rustc_hash::FxHashMap;

/// Loaded textures keyed by string IDs.
#[derive(Default)]
pub struct TextureStore {
    map: FxHashMap<String, Texture2D>,
}

impl TextureStore {
    pub fn new() -> Self {
        Self {
            map: FxHashMap::default(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, texture: Texture2D) {
        self.map.insert(key.into(), texture);
    }

    pub fn get(&self, key: impl AsRef<str>) -> Option<&Texture2D> {
        self.map.get(key.as_ref())
    }
}
