//! Raw Tiled export types, 1-to-1 with the JSON the editor writes.
//!
//! Only the fields the converters read are declared; everything else in the
//! export is ignored by serde.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
pub struct TiledMap {
    pub width: u32,
    pub height: u32,
    pub tilewidth: u32,
    pub tileheight: u32,
    pub layers: Vec<TiledLayer>,
    pub tilesets: Vec<TiledTileset>,
    #[serde(default)]
    pub properties: Vec<TiledProperty>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TiledLayer {
    pub name: String,
    /// Absent on object layers.
    #[serde(default)]
    pub data: Option<Vec<u32>>,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub properties: Vec<TiledProperty>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TiledProperty {
    pub name: String,
    #[serde(default)]
    pub value: Value,
}

/// A tileset, either embedded in a map (with `firstgid`) or standalone.
#[derive(Debug, Clone, Deserialize)]
pub struct TiledTileset {
    #[serde(default)]
    pub firstgid: Option<u32>,
    pub name: String,
    pub image: String,
    pub imagewidth: u32,
    pub tilewidth: u32,
    pub tileheight: u32,
    #[serde(default)]
    pub spacing: u32,
    pub tilecount: u32,
    pub columns: u32,
    #[serde(default)]
    pub tiles: Vec<TiledTile>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TiledTile {
    pub id: u32,
    #[serde(default)]
    pub animation: Vec<TiledFrame>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TiledFrame {
    pub tileid: u32,
    pub duration: u32,
}

/// Look up a custom property by name.
pub fn custom_property<'a>(properties: &'a [TiledProperty], name: &str) -> Option<&'a Value> {
    properties.iter().find(|p| p.name == name).map(|p| &p.value)
}

/// `true` only when the property exists and is the boolean `true`.
pub fn flag_property(properties: &[TiledProperty], name: &str) -> bool {
    matches!(custom_property(properties, name), Some(Value::Bool(true)))
}

impl TiledMap {
    pub fn custom_property(&self, name: &str) -> Option<&Value> {
        custom_property(&self.properties, name)
    }
}

impl TiledLayer {
    pub fn flag(&self, name: &str) -> bool {
        flag_property(&self.properties, name)
    }
}

impl TiledTileset {
    /// Whether a global tile id belongs to this tileset.
    pub fn has_tile(&self, gid: u32) -> bool {
        match self.firstgid {
            Some(first) => gid.checked_sub(first).is_some_and(|local| local < self.tilecount),
            None => false,
        }
    }
}
