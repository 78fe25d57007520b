//! The functional core: pure transformations from parsed descriptors to
//! engine records. Nothing in here touches the filesystem.
pub mod font;
pub mod geometry;
pub mod grouping;
pub mod map;
pub mod tileset;

pub use geometry::{TilePosition, resolve};
pub use grouping::{AnimationGroup, GroupedAnimations, animation_record, group_animations};
