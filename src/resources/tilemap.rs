//! Tilemap data types and parsers.
//!
//! Two interchangeable map sources produce the same [`Tilemap`] data:
//! - a hand-rolled text format (`.map`), parsed by [`Tilemap::from_text`]
//! - a Tilesetter-style JSON format, parsed by [`Tilemap::from_json_str`]
//!
//! Both are load-time only; malformed input is fatal for the caller since
//! there is no degraded mode without a map.
//!
//! # Text Map Format
//!
//! ```text
//! # comment
//! tilesize 48
//! width 4
//! height 2
//! layer ground
//! 1 1 2 1
//! 1 1 1 1
//! layer collision
//! 1 . . 1
//! 1 . . 1
//! ```
//!
//! Header fields may appear in any order but must precede the first layer.
//! Each layer holds exactly `height` rows of `width` tokens; `.` marks an
//! empty cell, any other token must be a tile id. The layer named
//! `collision` marks blocked cells (any non-empty token blocks).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the layer that feeds the collision grid.
pub const COLLISION_LAYER: &str = "collision";

/// Errors produced while parsing a tile map.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("missing header field '{0}'")]
    MissingHeader(&'static str),
    #[error("line {line}: invalid header '{text}'")]
    InvalidHeader { line: usize, text: String },
    #[error("invalid map dimensions {width}x{height}, tile size {tile_size}")]
    InvalidDimensions {
        width: u32,
        height: u32,
        tile_size: u32,
    },
    #[error("line {line}: tile row outside any layer")]
    RowOutsideLayer { line: usize },
    #[error("line {line}: bad tile token '{token}'")]
    BadTileToken { line: usize, token: String },
    #[error("line {line}: expected {expected} tiles per row, got {got}")]
    RowWidthMismatch {
        line: usize,
        expected: u32,
        got: u32,
    },
    #[error("layer '{name}': expected {expected} rows, got {got}")]
    LayerRowCount {
        name: String,
        expected: u32,
        got: u32,
    },
    #[error("invalid JSON map: {0}")]
    Json(#[from] serde_json::Error),
}

/// Single tile placement within a layer.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Tileposition {
    /// X coordinate in tiles.
    pub x: u32,
    /// Y coordinate in tiles.
    pub y: u32,
    /// Tile identifier (tileset-local, zero-based).
    pub id: u32,
}

/// A named tile layer containing sparse positions.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Tilelayer {
    pub name: String,
    pub positions: Vec<Tileposition>,
}

/// Tilemap metadata and layers.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Tilemap {
    /// Size of a tile in pixels.
    pub tile_size: u32,
    /// Map width in tiles.
    pub map_width: u32,
    /// Map height in tiles.
    pub map_height: u32,
    pub layers: Vec<Tilelayer>,
}

impl Tilemap {
    /// Parse the hand-rolled text map format.
    pub fn from_text(source: &str) -> Result<Self, MapError> {
        let mut tile_size: Option<u32> = None;
        let mut width: Option<u32> = None;
        let mut height: Option<u32> = None;
        let mut layers: Vec<Tilelayer> = Vec::new();
        // Rows consumed so far for the layer under construction.
        let mut current_rows: u32 = 0;

        for (idx, raw) in source.lines().enumerate() {
            let line_no = idx + 1;
            let line = match raw.find('#') {
                Some(pos) => &raw[..pos],
                None => raw,
            }
            .trim();
            if line.is_empty() {
                continue;
            }

            let mut tokens = line.split_whitespace();
            let first = tokens.next().unwrap_or_default();

            match first {
                "tilesize" | "width" | "height" if layers.is_empty() => {
                    let value: u32 = tokens
                        .next()
                        .and_then(|t| t.parse().ok())
                        .ok_or_else(|| MapError::InvalidHeader {
                            line: line_no,
                            text: line.to_string(),
                        })?;
                    match first {
                        "tilesize" => tile_size = Some(value),
                        "width" => width = Some(value),
                        _ => height = Some(value),
                    }
                }
                "layer" => {
                    let name = tokens.next().ok_or_else(|| MapError::InvalidHeader {
                        line: line_no,
                        text: line.to_string(),
                    })?;
                    let expected = height.ok_or(MapError::MissingHeader("height"))?;
                    if let Some(last) = layers.last() {
                        if current_rows != expected {
                            return Err(MapError::LayerRowCount {
                                name: last.name.clone(),
                                expected,
                                got: current_rows,
                            });
                        }
                    }
                    layers.push(Tilelayer {
                        name: name.to_string(),
                        positions: Vec::new(),
                    });
                    current_rows = 0;
                }
                _ => {
                    let expected_w = width.ok_or(MapError::MissingHeader("width"))?;
                    let layer = layers
                        .last_mut()
                        .ok_or(MapError::RowOutsideLayer { line: line_no })?;
                    let y = current_rows;
                    let mut got: u32 = 0;
                    for token in line.split_whitespace() {
                        if token != "." {
                            let id: u32 =
                                token.parse().map_err(|_| MapError::BadTileToken {
                                    line: line_no,
                                    token: token.to_string(),
                                })?;
                            layer.positions.push(Tileposition { x: got, y, id });
                        }
                        got += 1;
                    }
                    if got != expected_w {
                        return Err(MapError::RowWidthMismatch {
                            line: line_no,
                            expected: expected_w,
                            got,
                        });
                    }
                    current_rows += 1;
                }
            }
        }

        let tile_size = tile_size.ok_or(MapError::MissingHeader("tilesize"))?;
        let map_width = width.ok_or(MapError::MissingHeader("width"))?;
        let map_height = height.ok_or(MapError::MissingHeader("height"))?;
        if let Some(last) = layers.last() {
            if current_rows != map_height {
                return Err(MapError::LayerRowCount {
                    name: last.name.clone(),
                    expected: map_height,
                    got: current_rows,
                });
            }
        }

        let map = Tilemap {
            tile_size,
            map_width,
            map_height,
            layers,
        };
        map.validate()?;
        Ok(map)
    }

    /// Parse the Tilesetter-style JSON map format.
    pub fn from_json_str(source: &str) -> Result<Self, MapError> {
        let map: Tilemap = serde_json::from_str(source)?;
        map.validate()?;
        Ok(map)
    }

    fn validate(&self) -> Result<(), MapError> {
        if self.tile_size == 0 || self.map_width == 0 || self.map_height == 0 {
            return Err(MapError::InvalidDimensions {
                width: self.map_width,
                height: self.map_height,
                tile_size: self.tile_size,
            });
        }
        Ok(())
    }

    /// Look up a layer by name.
    pub fn layer(&self, name: &str) -> Option<&Tilelayer> {
        self.layers.iter().find(|l| l.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# sample
tilesize 48
width 3
height 2
layer ground
1 1 2
1 . 1
layer collision
1 . .
. . 1
";

    #[test]
    fn test_text_map_header_parsed() {
        let map = Tilemap::from_text(SAMPLE).unwrap();
        assert_eq!(map.tile_size, 48);
        assert_eq!(map.map_width, 3);
        assert_eq!(map.map_height, 2);
        assert_eq!(map.layers.len(), 2);
    }

    #[test]
    fn test_text_map_sparse_positions() {
        let map = Tilemap::from_text(SAMPLE).unwrap();
        let ground = map.layer("ground").unwrap();
        // 5 non-empty cells out of 6
        assert_eq!(ground.positions.len(), 5);
        let p = &ground.positions[2];
        assert_eq!((p.x, p.y, p.id), (2, 0, 2));
        let collision = map.layer(COLLISION_LAYER).unwrap();
        assert_eq!(collision.positions.len(), 2);
    }

    #[test]
    fn test_text_map_missing_header_is_error() {
        let err = Tilemap::from_text("width 3\nheight 2\nlayer g\n1 1 1\n1 1 1\n")
            .unwrap_err();
        assert!(matches!(err, MapError::MissingHeader("tilesize")));
    }

    #[test]
    fn test_text_map_bad_token_reports_line() {
        let src = "tilesize 48\nwidth 2\nheight 1\nlayer g\n1 frog\n";
        match Tilemap::from_text(src).unwrap_err() {
            MapError::BadTileToken { line, token } => {
                assert_eq!(line, 5);
                assert_eq!(token, "frog");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_text_map_row_width_mismatch() {
        let src = "tilesize 48\nwidth 3\nheight 1\nlayer g\n1 1\n";
        assert!(matches!(
            Tilemap::from_text(src).unwrap_err(),
            MapError::RowWidthMismatch {
                expected: 3,
                got: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_text_map_truncated_layer() {
        let src = "tilesize 48\nwidth 2\nheight 2\nlayer g\n1 1\n";
        assert!(matches!(
            Tilemap::from_text(src).unwrap_err(),
            MapError::LayerRowCount {
                expected: 2,
                got: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_text_map_row_outside_layer() {
        let src = "tilesize 48\nwidth 2\nheight 1\n1 1\n";
        assert!(matches!(
            Tilemap::from_text(src).unwrap_err(),
            MapError::RowOutsideLayer { line: 4 }
        ));
    }

    #[test]
    fn test_json_map_round_trips_through_serde() {
        let map = Tilemap::from_text(SAMPLE).unwrap();
        let json = serde_json::to_string(&map).unwrap();
        let parsed = Tilemap::from_json_str(&json).unwrap();
        assert_eq!(parsed.map_width, map.map_width);
        assert_eq!(
            parsed.layer("ground").unwrap().positions.len(),
            map.layer("ground").unwrap().positions.len()
        );
    }

    #[test]
    fn test_json_map_zero_dimensions_rejected() {
        let src = r#"{"tile_size":0,"map_width":3,"map_height":2,"layers":[]}"#;
        assert!(matches!(
            Tilemap::from_json_str(src).unwrap_err(),
            MapError::InvalidDimensions { .. }
        ));
    }
}
