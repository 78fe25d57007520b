//! Writes converted assets next to each other in an output directory:
//! `<name><.ext>` (the image), `<name>.asset-config.json` and, for
//! animated tilesets, `<name>.anim-config.json`. Existing files are
//! overwritten.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use super::write_json;
use crate::error::{ConvertError, Result};
use crate::model::records::{AnimationRecord, MapRecord, TextureAtlasRecord};

pub const ASSET_CONFIG_EXT: &str = ".asset-config.json";
pub const ANIM_CONFIG_EXT: &str = ".anim-config.json";
pub const FONT_CONFIG_EXT: &str = ".font-config.json";
pub const MAP_CONFIG_EXT: &str = ".map-config.json";

/// Extension of a file name including the dot, or `""` when it has none.
pub fn extension_of(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((_, ext)) => format!(".{ext}"),
        None => String::new(),
    }
}

pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| ConvertError::io(dir, e))
}

fn sidecar(destination: &Path, asset_name: &str, ext: &str) -> PathBuf {
    destination.join(format!("{asset_name}{ext}"))
}

/// Copy the image and write the atlas (and animation) description.
pub fn emit(
    atlas: &TextureAtlasRecord,
    animation: Option<&AnimationRecord>,
    image_source: &Path,
    destination: &Path,
    asset_name: &str,
) -> Result<()> {
    if !image_source.is_file() {
        return Err(ConvertError::MissingInputFile(image_source.to_path_buf()));
    }
    ensure_dir(destination)?;

    let image_name = image_source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let image = sidecar(destination, asset_name, &extension_of(&image_name));
    fs::copy(image_source, &image).map_err(|e| ConvertError::io(&image, e))?;

    let asset_config = sidecar(destination, asset_name, ASSET_CONFIG_EXT);
    write_json(&asset_config, atlas, true)?;

    if let Some(record) = animation {
        write_json(&sidecar(destination, asset_name, ANIM_CONFIG_EXT), record, true)?;
    }

    info!("Wrote asset `{asset_name}` to {}", destination.display());
    Ok(())
}

/// Write the empty font config placeholder unless one already exists.
/// Returns whether a file was written.
pub fn emit_font_config(destination: &Path, asset_name: &str) -> Result<bool> {
    let path = sidecar(destination, asset_name, FONT_CONFIG_EXT);
    if path.is_file() {
        return Ok(false);
    }
    ensure_dir(destination)?;
    fs::write(&path, "{}\n").map_err(|e| ConvertError::io(&path, e))?;
    Ok(true)
}

pub fn emit_map(record: &MapRecord, destination: &Path, map_name: &str) -> Result<PathBuf> {
    ensure_dir(destination)?;
    let path = sidecar(destination, map_name, MAP_CONFIG_EXT);
    write_json(&path, record, false)?;
    info!("Wrote map `{map_name}` to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::records::{TextureMap, TextureRegion};
    use tempfile::TempDir;

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("hero.png"), ".png");
        assert_eq!(extension_of("hero.v2.png"), ".png");
        assert_eq!(extension_of("hero"), "");
    }

    #[test]
    fn test_emit_copies_and_overwrites() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("Hero Sheet.png");
        fs::write(&src, [0x89, b'P', b'N', b'G', 1, 2, 3]).unwrap();

        let out = tmp.path().join("out/sprites");
        let mut textures = TextureMap::new();
        textures.insert(
            "animation0-0".to_string(),
            TextureRegion {
                width: 16,
                height: 16,
                offset_x: 0,
                offset_y: 0,
            },
        );
        let atlas = TextureAtlasRecord::with_textures(".png", textures);

        fs::create_dir_all(&out).unwrap();
        fs::write(out.join("hero.png"), b"stale").unwrap();

        emit(&atlas, None, &src, &out, "hero").unwrap();
        assert_eq!(fs::read(out.join("hero.png")).unwrap(), fs::read(&src).unwrap());
        assert!(!out.join("hero.anim-config.json").exists());

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out.join("hero.asset-config.json")).unwrap()).unwrap();
        assert_eq!(written["textures"]["animation0-0"]["width"], 16);
        assert_eq!(written["filetype"], ".png");
    }

    #[test]
    fn test_emit_missing_image() {
        let tmp = TempDir::new().unwrap();
        let atlas = TextureAtlasRecord::with_textures(".png", TextureMap::new());
        let err = emit(&atlas, None, &tmp.path().join("nope.png"), tmp.path(), "x").unwrap_err();
        assert!(matches!(err, ConvertError::MissingInputFile(_)));
        assert!(!tmp.path().join("x.asset-config.json").exists());
    }

    #[test]
    fn test_font_config_not_overwritten() {
        let tmp = TempDir::new().unwrap();
        assert!(emit_font_config(tmp.path(), "font-a").unwrap());
        let path = tmp.path().join("font-a.font-config.json");
        fs::write(&path, "{\"size\": 16}").unwrap();
        assert!(!emit_font_config(tmp.path(), "font-a").unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "{\"size\": 16}");
    }
}
