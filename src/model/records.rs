//! Engine-side records, serialised into the `*-config.json` sidecars.
//!
//! Field names follow what the engine's asset manager reads, and every
//! keyed collection keeps insertion order so the files diff cleanly.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// Texture name → region inside the atlas image.
pub type TextureMap = IndexMap<String, TextureRegion>;

// ─────────────────────────────────────────────────────
// .asset-config.json
// ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextureAtlasRecord {
    /// Image extension including the dot, e.g. `".png"`.
    pub filetype: String,
    #[serde(flatten)]
    pub layout: AtlasLayout,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AtlasLayout {
    /// Explicit sub-rectangles, keyed by texture name.
    #[serde(rename = "textures")]
    Textures(TextureMap),
    /// A uniform grid of equally sized textures.
    #[serde(rename = "regular_texture_info")]
    Regular(RegularTextureInfo),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TextureRegion {
    pub width: u32,
    pub height: u32,
    pub offset_x: u32,
    pub offset_y: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegularTextureInfo {
    pub columns: u32,
    pub rows: u32,
    pub texture_width: u32,
    pub texture_height: u32,
}

impl TextureAtlasRecord {
    pub fn with_textures(filetype: impl Into<String>, textures: TextureMap) -> Self {
        Self {
            filetype: filetype.into(),
            layout: AtlasLayout::Textures(textures),
        }
    }
}

// ─────────────────────────────────────────────────────
// .anim-config.json
// ─────────────────────────────────────────────────────

/// Group name → group; one entry per animation group.
pub type AnimationRecord = IndexMap<String, AnimationGroupRecord>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnimationGroupRecord {
    /// Milliseconds per frame.
    pub interval: u32,
    /// Frames per cycle.
    pub steps: usize,
    pub shape: ShapeRecord,
    pub textures: Vec<AnimationTexture>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShapeRecord {
    pub width: u32,
    pub height: u32,
}

/// One cell of a group: texture prefix plus its cell offset in the group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnimationTexture {
    pub prefix: String,
    pub offset_x: u32,
    pub offset_y: u32,
}

// ─────────────────────────────────────────────────────
// .map-config.json
// ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapRecord {
    pub width: u32,
    pub height: u32,
    pub tilewidth: u32,
    pub tileheight: u32,
    pub layers: IndexMap<String, LayerRecord>,
    pub assets: IndexMap<String, TileRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_layer: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayerRecord {
    pub map: Vec<Vec<u32>>,
    pub layer: usize,
    pub collisions: bool,
    pub vision: bool,
    pub entities: bool,
    pub transparent: bool,
}

/// Global id range `[min_id, max_id)` owned by one tileset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TileRange {
    pub min_id: u32,
    pub max_id: u32,
}
