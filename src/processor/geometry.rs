//! Linear tile index → atlas coordinates.

use crate::model::{GridCell, TilesetDescriptor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilePosition {
    pub pixel_x: u32,
    pub pixel_y: u32,
    pub cell: GridCell,
}

/// Locate tile `tile_id` (local to the tileset) in the atlas image.
///
/// Tiles are laid out left to right, wrapping at the image width. Ids past
/// the end of the tileset still resolve, just to cells that hold no tile.
pub fn resolve(tile_id: u32, tileset: &TilesetDescriptor) -> TilePosition {
    let x_step = u64::from(tileset.x_step());
    let y_step = u64::from(tileset.y_step());
    let image_width = u64::from(tileset.image_width);

    let linear = u64::from(tile_id) * x_step;
    let pixel_x = linear % image_width;
    let pixel_y = linear / image_width * y_step;

    TilePosition {
        pixel_x: pixel_x as u32,
        pixel_y: pixel_y as u32,
        cell: GridCell {
            col: (pixel_x / x_step) as u32,
            row: (pixel_y / y_step) as u32,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tileset(tile: u32, spacing: u32, image_width: u32, tile_count: u32) -> TilesetDescriptor {
        TilesetDescriptor {
            first_tile_id: 1,
            tile_count,
            tile_width: tile,
            tile_height: tile,
            spacing,
            image_width,
            image_path: "atlas.png".into(),
            name: "atlas".into(),
            animated_tiles: vec![],
        }
    }

    #[test]
    fn test_resolve_wraps_at_image_width() {
        let ts = tileset(32, 0, 128, 16);
        assert_eq!(
            resolve(5, &ts),
            TilePosition {
                pixel_x: 32,
                pixel_y: 32,
                cell: GridCell { col: 1, row: 1 }
            }
        );
        assert_eq!(resolve(3, &ts).cell, GridCell { col: 3, row: 0 });
        assert_eq!(resolve(4, &ts).cell, GridCell { col: 0, row: 1 });
    }

    #[test]
    fn test_resolve_with_spacing() {
        // 16px tiles with 2px spacing in a 72px wide image: 4 tiles per row
        let ts = tileset(16, 2, 72, 12);
        let pos = resolve(6, &ts);
        assert_eq!((pos.pixel_x, pos.pixel_y), (36, 18));
        assert_eq!(pos.cell, GridCell { col: 2, row: 1 });
    }

    #[test]
    fn test_linear_order_round_trip() {
        let ts = tileset(16, 0, 128, 64);
        let columns = 128 / 16;
        for id in 0..ts.tile_count {
            let cell = resolve(id, &ts).cell;
            assert_eq!(cell.row * columns + cell.col, id, "tile {id}");
        }
    }

    #[test]
    fn test_out_of_range_does_not_panic() {
        let ts = tileset(32, 0, 128, 16);
        let pos = resolve(u32::MAX, &ts);
        assert!(pos.cell.col < 4);
    }
}
