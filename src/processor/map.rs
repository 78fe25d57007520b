//! Tiled map → engine map description.
//! Cuts each flat layer array into rows and collects tileset id ranges.

use indexmap::IndexMap;

use crate::model::records::{LayerRecord, MapRecord, TileRange};
use crate::model::tiled::{TiledLayer, TiledMap};

/// Cut a layer's flat tile array into `height` rows of `width` tiles.
///
/// With `binary` set every non-empty tile becomes 1, which is all the
/// collision and vision layers need. Layers without tile data (object
/// layers) give an empty grid.
pub fn layer_grid(layer: &TiledLayer, binary: bool) -> Vec<Vec<u32>> {
    let Some(data) = &layer.data else {
        return Vec::new();
    };
    let width = layer.width as usize;

    (0..layer.height as usize)
        .map(|y| {
            let start = y * width;
            data[start..start + width]
                .iter()
                .map(|&t| if t == 0 || !binary { t } else { 1 })
                .collect()
        })
        .collect()
}

pub fn map_record(map: &TiledMap) -> MapRecord {
    let mut layers = IndexMap::new();
    for (i, layer) in map.layers.iter().enumerate() {
        let collisions = layer.flag("collisions");
        let vision = layer.flag("vision");
        layers.insert(
            layer.name.clone(),
            LayerRecord {
                map: layer_grid(layer, collisions || vision),
                layer: i,
                collisions,
                vision,
                entities: layer.flag("objects"),
                transparent: layer.flag("transparent"),
            },
        );
    }

    let mut assets = IndexMap::new();
    for tileset in &map.tilesets {
        // the parser rejects missing firstgids and ranges past u32::MAX
        let first = tileset.firstgid.unwrap_or_default();
        assets.insert(
            tileset.name.clone(),
            TileRange {
                min_id: first,
                max_id: first.saturating_add(tileset.tilecount),
            },
        );
    }

    MapRecord {
        width: map.width,
        height: map.height,
        tilewidth: map.tilewidth,
        tileheight: map.tileheight,
        layers,
        assets,
        player_layer: map.custom_property("player_layer").cloned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tiled::{TiledProperty, TiledTileset};
    use serde_json::{Value, json};

    fn prop(name: &str, value: Value) -> TiledProperty {
        TiledProperty {
            name: name.into(),
            value,
        }
    }

    fn layer(name: &str, data: Option<Vec<u32>>, properties: Vec<TiledProperty>) -> TiledLayer {
        TiledLayer {
            name: name.into(),
            data,
            width: 3,
            height: 2,
            properties,
        }
    }

    fn map() -> TiledMap {
        TiledMap {
            width: 3,
            height: 2,
            tilewidth: 16,
            tileheight: 16,
            layers: vec![
                layer("ground", Some(vec![1, 2, 3, 4, 5, 6]), vec![]),
                layer(
                    "walls",
                    Some(vec![0, 7, 0, 9, 0, 0]),
                    vec![prop("collisions", json!(true))],
                ),
                layer(
                    "npcs",
                    None,
                    vec![prop("objects", json!(true)), prop("transparent", json!("yes"))],
                ),
            ],
            tilesets: vec![TiledTileset {
                firstgid: Some(1),
                name: "terrain".into(),
                image: "terrain.png".into(),
                imagewidth: 64,
                tilewidth: 16,
                tileheight: 16,
                spacing: 0,
                tilecount: 16,
                columns: 4,
                tiles: vec![],
            }],
            properties: vec![prop("player_layer", json!(1))],
        }
    }

    #[test]
    fn test_layer_grid_rows() {
        let m = map();
        assert_eq!(layer_grid(&m.layers[0], false), vec![vec![1, 2, 3], vec![4, 5, 6]]);
        assert_eq!(layer_grid(&m.layers[1], true), vec![vec![0, 1, 0], vec![1, 0, 0]]);
        assert!(layer_grid(&m.layers[2], false).is_empty());
    }

    #[test]
    fn test_map_record() {
        let record = map_record(&map());
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["width"], json!(3));
        assert_eq!(value["player_layer"], json!(1));
        assert_eq!(value["assets"]["terrain"], json!({"min_id": 1, "max_id": 17}));
        assert_eq!(
            value["layers"]["walls"],
            json!({
                "map": [[0, 1, 0], [1, 0, 0]],
                "layer": 1,
                "collisions": true,
                "vision": false,
                "entities": false,
                "transparent": false
            })
        );
        // only a literal `true` sets a flag
        assert_eq!(value["layers"]["npcs"]["entities"], json!(true));
        assert_eq!(value["layers"]["npcs"]["transparent"], json!(false));
    }

    #[test]
    fn test_tile_range_at_id_limit() {
        let mut m = map();
        m.tilesets[0].firstgid = Some(u32::MAX - 4);
        let record = map_record(&m);
        assert_eq!(
            record.assets.get("terrain"),
            Some(&TileRange {
                min_id: u32::MAX - 4,
                max_id: u32::MAX
            })
        );
    }

    #[test]
    fn test_player_layer_omitted() {
        let mut m = map();
        m.properties.clear();
        let value = serde_json::to_value(map_record(&m)).unwrap();
        assert!(value.get("player_layer").is_none());
    }
}
