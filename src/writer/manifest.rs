//! The central asset manifest: a JSON object mapping asset name to its
//! path (without extension) relative to the asset root, the directory the
//! manifest lives in.
//!
//! Updates are plain read-modify-write. Nothing is locked, so converters
//! must not run concurrently against the same manifest.

use std::fs;
use std::path::{Component, Path, PathBuf};

use log::info;
use serde_json::{Map, Value};

use super::to_pretty_json;
use crate::error::{ConvertError, Result};

pub const DEFAULT_MANIFEST: &str = "assets/assets.json";

#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    path: PathBuf,
    entries: Map<String, Value>,
}

impl Manifest {
    /// Read an existing manifest. Absent, unparsable or non-object files
    /// are all `ManifestUnreadable`.
    pub fn load(path: &Path) -> Result<Self> {
        let unreadable = |message: String| ConvertError::ManifestUnreadable {
            path: path.to_path_buf(),
            message,
        };
        let text = fs::read_to_string(path).map_err(|e| unreadable(e.to_string()))?;
        let value: Value = serde_json::from_str(&text).map_err(|e| unreadable(e.to_string()))?;
        let Value::Object(entries) = value else {
            return Err(unreadable("top level must be an object".into()));
        };
        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    /// Set or overwrite one entry.
    pub fn upsert(&mut self, asset_name: &str, relative_path: &str) {
        self.entries
            .insert(asset_name.to_string(), Value::String(relative_path.to_string()));
    }

    pub fn get(&self, asset_name: &str) -> Option<&str> {
        self.entries.get(asset_name).and_then(Value::as_str)
    }

    pub fn save(&self) -> Result<()> {
        let bytes = to_pretty_json(&self.entries).map_err(|e| ConvertError::io(&self.path, e.into()))?;
        fs::write(&self.path, bytes).map_err(|e| ConvertError::io(&self.path, e))
    }
}

/// Directory manifest paths are relative to.
fn asset_root(manifest_path: &Path) -> &Path {
    match manifest_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

/// Load, upsert one entry, write back.
pub fn register(manifest_path: &Path, asset_name: &str, relative_path: &str) -> Result<()> {
    let mut manifest = Manifest::load(manifest_path)?;
    manifest.upsert(asset_name, relative_path);
    manifest.save()?;
    info!(
        "Registered `{asset_name}` -> `{relative_path}` in {}",
        manifest_path.display()
    );
    Ok(())
}

/// Manifest value for an asset written to `output_dir`: the directory
/// relative to the asset root, `/`-joined, followed by the asset name.
///
/// Both directories must exist.
pub fn asset_path(manifest_path: &Path, output_dir: &Path, asset_name: &str) -> Result<String> {
    let root = asset_root(manifest_path);
    let root_abs = root
        .canonicalize()
        .map_err(|e| ConvertError::ManifestUnreadable {
            path: manifest_path.to_path_buf(),
            message: format!("asset root {}: {e}", root.display()),
        })?;
    let dir_abs = output_dir
        .canonicalize()
        .map_err(|e| ConvertError::io(output_dir, e))?;

    let relative = dir_abs
        .strip_prefix(&root_abs)
        .map_err(|_| ConvertError::OutsideAssetRoot {
            dir: dir_abs.clone(),
            root: root_abs.clone(),
        })?;

    let mut parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    parts.push(asset_name.to_string());
    Ok(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manifest_in(tmp: &TempDir, contents: &str) -> PathBuf {
        let path = tmp.path().join("assets.json");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_register_into_empty_manifest() {
        let tmp = TempDir::new().unwrap();
        let path = manifest_in(&tmp, "{}");

        register(&path, "font-arial", "fonts/font-arial").unwrap();

        let value: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value, serde_json::json!({"font-arial": "fonts/font-arial"}));
    }

    #[test]
    fn test_register_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let path = manifest_in(&tmp, r#"{"hero": "sprites/hero"}"#);

        register(&path, "font-arial", "fonts/font-arial").unwrap();
        let first = fs::read(&path).unwrap();
        register(&path, "font-arial", "fonts/font-arial").unwrap();
        assert_eq!(fs::read(&path).unwrap(), first);
    }

    #[test]
    fn test_upsert_keeps_entry_order() {
        let tmp = TempDir::new().unwrap();
        let path = manifest_in(&tmp, r#"{"b": "x/b", "a": "x/a"}"#);

        register(&path, "b", "y/b").unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.find("\"b\"").unwrap() < text.find("\"a\"").unwrap(), "{text}");
        assert_eq!(Manifest::load(&path).unwrap().get("b"), Some("y/b"));
    }

    #[test]
    fn test_missing_manifest_is_unreadable() {
        let tmp = TempDir::new().unwrap();
        let err = register(&tmp.path().join("assets.json"), "a", "a").unwrap_err();
        assert!(matches!(err, ConvertError::ManifestUnreadable { .. }), "{err}");
    }

    #[test]
    fn test_non_object_manifest_is_unreadable() {
        let tmp = TempDir::new().unwrap();
        let path = manifest_in(&tmp, "[1, 2]");
        assert!(matches!(
            Manifest::load(&path),
            Err(ConvertError::ManifestUnreadable { .. })
        ));
    }

    #[test]
    fn test_asset_path_relative_to_manifest_dir() {
        let tmp = TempDir::new().unwrap();
        let path = manifest_in(&tmp, "{}");
        let out = tmp.path().join("sprites").join("npc");
        fs::create_dir_all(&out).unwrap();

        assert_eq!(asset_path(&path, &out, "hero").unwrap(), "sprites/npc/hero");
        assert_eq!(asset_path(&path, tmp.path(), "hero").unwrap(), "hero");
    }

    #[test]
    fn test_asset_path_outside_root() {
        let tmp = TempDir::new().unwrap();
        let assets = tmp.path().join("assets");
        let elsewhere = tmp.path().join("elsewhere");
        fs::create_dir_all(&assets).unwrap();
        fs::create_dir_all(&elsewhere).unwrap();
        let path = assets.join("assets.json");
        fs::write(&path, "{}").unwrap();

        let err = asset_path(&path, &elsewhere, "hero").unwrap_err();
        assert!(matches!(err, ConvertError::OutsideAssetRoot { .. }), "{err}");
    }
}
