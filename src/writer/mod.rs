//! Output side: sidecar files, image copies and the asset manifest.

pub mod asset;
pub mod manifest;

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::{ConvertError, Result};

/// Serialise `value` with 4-space indentation.
pub fn to_pretty_json<T: Serialize>(value: &T) -> serde_json::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser)?;
    Ok(buf)
}

pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T, pretty: bool) -> Result<()> {
    let bytes = if pretty {
        to_pretty_json(value)
    } else {
        serde_json::to_vec(value)
    }
    .map_err(|e| ConvertError::io(path, e.into()))?;
    fs::write(path, bytes).map_err(|e| ConvertError::io(path, e))
}
