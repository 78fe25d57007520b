//! Typed records shared by the parser, processor and writer stages.
//!
//! `tiled` and `font` hold the source side as it comes out of the loaders,
//! `records` the engine side as it goes into the sidecar files. The types
//! in this module are the validated middle ground the processor works on.

pub mod font;
pub mod records;
pub mod tiled;

use std::path::Path;

use crate::error::{ConvertError, Result};
use tiled::TiledTileset;

/// Tileset geometry plus its animated tiles, validated at the parse boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TilesetDescriptor {
    pub first_tile_id: u32,
    pub tile_count: u32,
    pub tile_width: u32,
    pub tile_height: u32,
    pub spacing: u32,
    pub image_width: u32,
    pub image_path: String,
    pub name: String,
    pub animated_tiles: Vec<AnimatedTileDef>,
}

/// One logical animation, e.g. one cell of a character walking down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimatedTileDef {
    pub local_tile_id: u32,
    /// Playback order.
    pub frames: Vec<Frame>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub tile_id: u32,
    pub duration_ms: u32,
}

/// A tile's position in the atlas grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCell {
    pub col: u32,
    pub row: u32,
}

/// Size of an animation group in tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupShape {
    pub cols: u32,
    pub rows: u32,
}

impl GroupShape {
    /// Parse the `"cols,rows"` form used on the command line.
    pub fn parse(value: &str) -> Result<Self> {
        let invalid = |message: String| ConvertError::InvalidOption {
            option: "shape",
            message,
        };
        let (cols, rows) = value
            .split_once(',')
            .ok_or_else(|| invalid(format!("expected `cols,rows`, got `{value}`")))?;
        let cols: u32 = cols
            .trim()
            .parse()
            .map_err(|_| invalid(format!("`{cols}` is not a column count")))?;
        let rows: u32 = rows
            .trim()
            .parse()
            .map_err(|_| invalid(format!("`{rows}` is not a row count")))?;
        if cols == 0 || rows == 0 {
            return Err(invalid(format!("shape must be non-empty, got {cols}x{rows}")));
        }
        Ok(GroupShape { cols, rows })
    }
}

/// `--replace old,new`: substring substitution applied to asset names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub old: String,
    pub new: String,
}

impl Replacement {
    pub fn parse(value: &str) -> Result<Self> {
        let (old, new) = value.split_once(',').ok_or_else(|| ConvertError::InvalidOption {
            option: "replace",
            message: format!("expected `old,new`, got `{value}`"),
        })?;
        if old.is_empty() {
            return Err(ConvertError::InvalidOption {
                option: "replace",
                message: "the text to replace must not be empty".into(),
            });
        }
        Ok(Replacement {
            old: old.to_string(),
            new: new.to_string(),
        })
    }

    pub fn apply(&self, name: &str) -> String {
        name.replace(&self.old, &self.new)
    }
}

impl TilesetDescriptor {
    /// Validate a raw Tiled tileset. `source` is only used in error messages.
    pub fn from_tiled(raw: &TiledTileset, source: &Path) -> Result<Self> {
        let step = |tile: u32| tile.checked_add(raw.spacing).filter(|&s| s > 0);
        if step(raw.tilewidth).is_none() || step(raw.tileheight).is_none() {
            return Err(ConvertError::malformed(
                source,
                format!(
                    "tileset `{}` has unusable tile size {}x{} with spacing {}",
                    raw.name, raw.tilewidth, raw.tileheight, raw.spacing
                ),
            ));
        }
        if raw.imagewidth == 0 {
            return Err(ConvertError::malformed(
                source,
                format!("tileset `{}` has `imagewidth` 0", raw.name),
            ));
        }

        let animated_tiles = raw
            .tiles
            .iter()
            .filter(|tile| !tile.animation.is_empty())
            .map(|tile| AnimatedTileDef {
                local_tile_id: tile.id,
                frames: tile
                    .animation
                    .iter()
                    .map(|f| Frame {
                        tile_id: f.tileid,
                        duration_ms: f.duration,
                    })
                    .collect(),
            })
            .collect();

        Ok(TilesetDescriptor {
            first_tile_id: raw.firstgid.unwrap_or(0),
            tile_count: raw.tilecount,
            tile_width: raw.tilewidth,
            tile_height: raw.tileheight,
            spacing: raw.spacing,
            image_width: raw.imagewidth,
            image_path: raw.image.clone(),
            name: raw.name.clone(),
            animated_tiles,
        })
    }

    pub fn x_step(&self) -> u32 {
        self.tile_width.saturating_add(self.spacing)
    }

    pub fn y_step(&self) -> u32 {
        self.tile_height.saturating_add(self.spacing)
    }
}
