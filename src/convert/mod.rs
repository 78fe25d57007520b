//! One pipeline per subcommand: parse → process → write → register.
//!
//! Each converter gets its options passed in explicitly and validates all of
//! its input before the first file is written.

pub mod font;
pub mod map;
pub mod tiled;
pub mod tileset;

use std::path::{Path, PathBuf};

use crate::writer::manifest::DEFAULT_MANIFEST;

/// Asset name derived from a file path: `"Town Square.json"` →
/// `"town_square"`.
pub fn name_from_path(path: &Path) -> String {
    let base = path
        .file_name()
        .map(|n| n.to_string_lossy().replace(' ', "_").to_lowercase())
        .unwrap_or_default();
    match base.rsplit_once('.') {
        Some((stem, _)) => stem.to_string(),
        None => base,
    }
}

pub(crate) fn manifest_path(config: Option<&PathBuf>) -> PathBuf {
    config
        .cloned()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_MANIFEST))
}

pub(crate) fn parent_dir(path: &Path) -> &Path {
    path.parent().unwrap_or(Path::new(""))
}
