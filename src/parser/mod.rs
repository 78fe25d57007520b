//! Descriptor readers: Tiled JSON exports and `.fnt` font files.
//!
//! Everything is validated here, at the parse boundary. A missing or
//! wrongly typed field becomes `MalformedDescriptor` naming the file, so
//! no later stage has to second-guess its input.

pub mod fnt;

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::de::DeserializeOwned;

use crate::error::{ConvertError, Result, read_input};
use crate::model::tiled::{TiledMap, TiledTileset};

fn from_json<T: DeserializeOwned>(json: &str, source: &Path) -> Result<T> {
    serde_json::from_str(json).map_err(|e| ConvertError::malformed(source, e.to_string()))
}

/// Parse a Tiled map export.
///
/// Every embedded tileset must carry a `firstgid`; external tileset
/// references are not supported.
pub fn load_map(json: &str, source: &Path) -> Result<TiledMap> {
    debug!("Map file loaded, size: {} bytes", json.len());
    let map: TiledMap = from_json(json, source)?;

    for tileset in &map.tilesets {
        let Some(first) = tileset.firstgid else {
            return Err(ConvertError::malformed(
                source,
                format!("tileset `{}` has no `firstgid`", tileset.name),
            ));
        };
        if first.checked_add(tileset.tilecount).is_none() {
            return Err(ConvertError::malformed(
                source,
                format!(
                    "tileset `{}`: firstgid {} + tilecount {} is past the largest tile id",
                    tileset.name, first, tileset.tilecount
                ),
            ));
        }
    }

    for layer in &map.layers {
        if let Some(data) = &layer.data {
            let expected = layer.width as usize * layer.height as usize;
            if data.len() < expected {
                return Err(ConvertError::malformed(
                    source,
                    format!(
                        "layer `{}` has {} tiles, expected {}x{} = {}",
                        layer.name,
                        data.len(),
                        layer.width,
                        layer.height,
                        expected
                    ),
                ));
            }
        }
    }

    info!(
        "Parsed map {} ({} layers, {} tilesets)",
        source.display(),
        map.layers.len(),
        map.tilesets.len()
    );
    Ok(map)
}

/// Parse a standalone Tiled tileset export.
pub fn load_tileset(json: &str, source: &Path) -> Result<TiledTileset> {
    let tileset: TiledTileset = from_json(json, source)?;
    if tileset.columns == 0 {
        return Err(ConvertError::malformed(
            source,
            format!("tileset `{}` has 0 columns", tileset.name),
        ));
    }
    info!(
        "Parsed tileset `{}` ({} tiles)",
        tileset.name, tileset.tilecount
    );
    Ok(tileset)
}

pub fn read_map(path: &Path) -> Result<TiledMap> {
    let json = read_input(path)?;
    load_map(&json, path)
}

pub fn read_tileset(path: &Path) -> Result<TiledTileset> {
    let json = read_input(path)?;
    load_tileset(&json, path)
}

/// Find the map descriptor inside an asset directory: the first `.json`
/// file by name.
pub fn find_config(dir: &Path) -> Result<PathBuf> {
    let entries = fs::read_dir(dir).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ConvertError::MissingInputFile(dir.to_path_buf()),
        _ => ConvertError::io(dir, e),
    })?;

    let mut candidates = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| ConvertError::io(dir, e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            candidates.push(path);
        }
    }
    candidates.sort();

    candidates
        .into_iter()
        .next()
        .ok_or_else(|| ConvertError::NoConfigFound(dir.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAP: &str = r#"{
        "width": 2, "height": 2, "tilewidth": 16, "tileheight": 16,
        "infinite": false,
        "layers": [
            {"name": "ground", "type": "tilelayer", "width": 2, "height": 2, "data": [1, 2, 0, 3]},
            {"name": "npcs", "type": "objectgroup", "objects": [],
             "properties": [{"name": "objects", "type": "bool", "value": true}]}
        ],
        "tilesets": [
            {"firstgid": 1, "name": "Terrain", "image": "terrain.png", "imagewidth": 64,
             "imageheight": 64, "tilewidth": 16, "tileheight": 16, "spacing": 0,
             "margin": 0, "tilecount": 16, "columns": 4}
        ]
    }"#;

    #[test]
    fn test_load_map_ignores_unknown_fields() {
        let map = load_map(MAP, Path::new("map.json")).expect("valid map");
        assert_eq!(map.layers.len(), 2);
        assert_eq!(map.layers[0].data.as_deref(), Some(&[1, 2, 0, 3][..]));
        assert!(map.layers[1].data.is_none());
        assert!(map.layers[1].flag("objects"));
        assert!(map.tilesets[0].has_tile(16));
        assert!(!map.tilesets[0].has_tile(17));
    }

    #[test]
    fn test_load_map_missing_field() {
        let err = load_map(r#"{"width": 2}"#, Path::new("broken.json")).unwrap_err();
        match err {
            ConvertError::MalformedDescriptor { path, message } => {
                assert_eq!(path, Path::new("broken.json"));
                assert!(message.contains("height"), "got {message}");
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn test_load_map_short_layer_data() {
        let json = MAP.replace("[1, 2, 0, 3]", "[1, 2]");
        let err = load_map(&json, Path::new("map.json")).unwrap_err();
        assert!(err.to_string().contains("layer `ground`"), "{err}");
    }

    #[test]
    fn test_load_map_gid_range_overflow() {
        let json = MAP.replace("\"firstgid\": 1", "\"firstgid\": 4294967295");
        let err = load_map(&json, Path::new("map.json")).unwrap_err();
        match err {
            ConvertError::MalformedDescriptor { message, .. } => {
                assert!(message.contains("Terrain"), "got {message}");
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn test_has_tile_near_id_limit() {
        let json = MAP.replace("\"firstgid\": 1", "\"firstgid\": 4294967279");
        let map = load_map(&json, Path::new("map.json")).unwrap();
        let tileset = &map.tilesets[0];
        assert!(tileset.has_tile(u32::MAX - 1));
        assert!(!tileset.has_tile(u32::MAX));
        assert!(!tileset.has_tile(1));
    }

    #[test]
    fn test_load_tileset_zero_columns() {
        let json = r#"{"name": "x", "image": "x.png", "imagewidth": 0, "tilewidth": 8,
                       "tileheight": 8, "tilecount": 0, "columns": 0}"#;
        assert!(load_tileset(json, Path::new("x.json")).is_err());
    }
}
