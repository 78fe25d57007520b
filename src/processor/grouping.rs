//! Animation grouping: turns per-tile animations into multi-tile groups.
//!
//! A sprite larger than one tile is drawn as a block of `cols × rows` tiles,
//! each cell animated on its own. In the atlas, the first frame of every
//! cell sits in the leftmost block of a band of `rows` tile rows; later
//! frames follow in the blocks to the right:
//!
//! ```text
//!          block 0      block 1      block 2
//!        +----+----+  +----+----+  +----+----+
//! band 0 | a0 | b0 |  | a1 | b1 |  | a2 | b2 |    walk down
//!        | c0 | d0 |  | c1 | d1 |  | c2 | d2 |
//!        +----+----+  +----+----+  +----+----+
//! band 1 | e0 | f0 |  | e1 | f1 |  ...            walk left
//! ```
//!
//! Each band becomes one group. A cell animation joins the group of the
//! band its block-0 frame lies in, at that frame's offset inside the
//! block. Frames outside block 0 never decide membership, so an animation
//! whose frames all lie right of block 0 ends up in no group; its frames
//! are still emitted as atlas textures.

use indexmap::{IndexMap, IndexSet};
use log::warn;

use super::geometry::{self, TilePosition};
use crate::model::records::{
    AnimationGroupRecord, AnimationRecord, AnimationTexture, ShapeRecord, TextureMap,
    TextureRegion,
};
use crate::model::{AnimatedTileDef, Frame, GridCell, GroupShape, TilesetDescriptor};

/// One member of a group: a cell animation and where it is drawn.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Member {
    pub prefix: String,
    /// Cell offset from the group's top-left tile.
    pub offset: GridCell,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationGroup {
    pub name: String,
    /// `row / shape.rows` of the tiles in this group.
    pub band: u32,
    pub shape: GroupShape,
    /// First-insertion order, no duplicates.
    pub members: Vec<Member>,
    pub interval: u32,
    pub steps: usize,
}

/// Output of [`group_animations`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedAnimations {
    /// One entry per (animation, frame index), never deduplicated.
    pub textures: TextureMap,
    /// First-appearance order.
    pub groups: Vec<AnimationGroup>,
}

/// Texture prefix the engine uses to find an animation's frames.
pub fn texture_prefix(animation: &AnimatedTileDef) -> String {
    format!("animation{}", animation.local_tile_id)
}

fn texture_key(prefix: &str, frame_index: usize) -> String {
    format!("{prefix}-{frame_index}")
}

fn region(tileset: &TilesetDescriptor, pos: TilePosition) -> TextureRegion {
    TextureRegion {
        width: tileset.tile_width,
        height: tileset.tile_height,
        offset_x: pos.pixel_x,
        offset_y: pos.pixel_y,
    }
}

/// Every frame of every animation, resolved, in playback order.
fn resolved_frames(
    tileset: &TilesetDescriptor,
) -> impl Iterator<Item = (&AnimatedTileDef, usize, &Frame, TilePosition)> {
    tileset.animated_tiles.iter().flat_map(move |animation| {
        animation.frames.iter().enumerate().map(move |(i, frame)| {
            if frame.tile_id >= tileset.tile_count {
                warn!(
                    "tileset `{}`: animation {} frame {} refers to tile {} outside its {} tiles",
                    tileset.name, animation.local_tile_id, i, frame.tile_id, tileset.tile_count
                );
            }
            (animation, i, frame, geometry::resolve(frame.tile_id, tileset))
        })
    })
}

/// Atlas entries `animation{id}-{frame}` for every animated tile.
pub fn frame_textures(tileset: &TilesetDescriptor) -> TextureMap {
    let mut textures = TextureMap::new();
    for (animation, i, _, pos) in resolved_frames(tileset) {
        textures.insert(texture_key(&texture_prefix(animation), i), region(tileset, pos));
    }
    textures
}

/// Accumulates one group while frames are being walked.
#[derive(Default)]
struct GroupBuilder {
    members: IndexSet<Member>,
    interval: Option<u32>,
    steps: usize,
}

/// Partition a tileset's animations into groups of `shape`.
///
/// Group `i` (in order of first appearance) is named `names[i]`; groups
/// past the end of `names` fall back to `group{band}`.
pub fn group_animations(
    tileset: &TilesetDescriptor,
    shape: GroupShape,
    names: &[String],
) -> GroupedAnimations {
    let mut textures = TextureMap::new();
    // band → group, in first-appearance order
    let mut builders: IndexMap<u32, GroupBuilder> = IndexMap::new();

    for (animation, i, frame, pos) in resolved_frames(tileset) {
        let prefix = texture_prefix(animation);
        textures.insert(texture_key(&prefix, i), region(tileset, pos));

        let block = pos.cell.col / shape.cols;
        if block != 0 {
            continue;
        }

        let band = pos.cell.row / shape.rows;
        let group = builders.entry(band).or_default();

        group.members.insert(Member {
            prefix,
            offset: GridCell {
                col: pos.cell.col % shape.cols,
                row: pos.cell.row % shape.rows,
            },
        });
        group.steps = group.steps.max(animation.frames.len());

        if let Some(previous) = group.interval {
            if previous != frame.duration_ms {
                warn!(
                    "tileset `{}`: band {} mixes frame durations {}ms and {}ms, keeping {}ms",
                    tileset.name, band, previous, frame.duration_ms, frame.duration_ms
                );
            }
        }
        group.interval = Some(frame.duration_ms);
    }

    if names.len() > builders.len() {
        warn!(
            "tileset `{}`: {} animation names given for {} groups, ignoring the rest",
            tileset.name,
            names.len(),
            builders.len()
        );
    }

    let groups = builders
        .into_iter()
        .enumerate()
        .map(|(i, (band, b))| {
            let name = match names.get(i) {
                Some(name) => name.clone(),
                None => {
                    let fallback = format!("group{band}");
                    warn!(
                        "tileset `{}`: no animation name for group {i}, using `{fallback}`",
                        tileset.name
                    );
                    fallback
                }
            };
            AnimationGroup {
                name,
                band,
                shape,
                members: b.members.into_iter().collect(),
                // a builder only exists once a frame was registered
                interval: b.interval.unwrap_or_default(),
                steps: b.steps,
            }
        })
        .collect();

    GroupedAnimations { textures, groups }
}

/// Engine representation of the groups.
pub fn animation_record(groups: &[AnimationGroup]) -> AnimationRecord {
    let mut record = AnimationRecord::new();
    for group in groups {
        record.insert(
            group.name.clone(),
            AnimationGroupRecord {
                interval: group.interval,
                steps: group.steps,
                shape: ShapeRecord {
                    width: group.shape.cols,
                    height: group.shape.rows,
                },
                textures: group
                    .members
                    .iter()
                    .map(|m| AnimationTexture {
                        prefix: m.prefix.clone(),
                        offset_x: m.offset.col,
                        offset_y: m.offset.row,
                    })
                    .collect(),
            },
        );
    }
    record
}
