//! Fatal startup errors.
//!
//! Nothing in the per-frame path can fail; the only error conditions are
//! missing/corrupt assets and malformed maps, both fatal before the loop
//! starts.

use thiserror::Error;

use crate::resources::tilemap::MapError;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("failed to load asset '{path}': {reason}")]
    AssetLoad { path: String, reason: String },

    #[error("failed to parse map '{path}': {source}")]
    MapParse {
        path: String,
        #[source]
        source: MapError,
    },
}

impl GameError {
    pub fn asset(path: impl Into<String>, reason: impl ToString) -> Self {
        GameError::AssetLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
