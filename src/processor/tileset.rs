use crate::model::records::RegularTextureInfo;
use crate::model::tiled::TiledTileset;

/// Grid layout of a tileset without explicit per-texture entries.
///
/// Callers guarantee `columns != 0` (checked by the parser).
pub fn regular_texture_info(tileset: &TiledTileset) -> RegularTextureInfo {
    RegularTextureInfo {
        columns: tileset.columns,
        rows: tileset.tilecount / tileset.columns,
        texture_width: tileset.tilewidth,
        texture_height: tileset.tileheight,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_round_down() {
        let tileset = TiledTileset {
            firstgid: None,
            name: "terrain".into(),
            image: "terrain.png".into(),
            imagewidth: 128,
            tilewidth: 16,
            tileheight: 24,
            spacing: 0,
            tilecount: 30,
            columns: 8,
            tiles: vec![],
        };
        assert_eq!(
            regular_texture_info(&tileset),
            RegularTextureInfo {
                columns: 8,
                rows: 3,
                texture_width: 16,
                texture_height: 24,
            }
        );
    }
}
