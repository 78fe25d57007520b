use std::path::Path;

use log::debug;

use crate::error::{ConvertError, Result};
use crate::model::font::FontDescriptor;
use crate::model::records::{TextureMap, TextureRegion};

/// Asset name for a font face: `"Open Sans"` → `"font-open-sans"`.
pub fn font_asset_name(face: &str) -> String {
    format!("font-{}", face.to_lowercase().replace(' ', "-"))
}

/// One texture per visible glyph, keyed by the glyph itself.
///
/// Glyphs without area (space, control characters) are skipped.
pub fn glyph_textures(font: &FontDescriptor, source: &Path) -> Result<TextureMap> {
    let mut textures = TextureMap::with_capacity(font.glyphs.len());
    for glyph in &font.glyphs {
        if glyph.width <= 0 || glyph.height <= 0 {
            debug!("skipping empty glyph {:?}", glyph.id);
            continue;
        }
        let field = |name: &str, value: i64| {
            u32::try_from(value).map_err(|_| {
                ConvertError::malformed(
                    source,
                    format!("glyph {:?}: `{name}={value}` out of range", glyph.id),
                )
            })
        };
        textures.insert(
            glyph.id.to_string(),
            TextureRegion {
                width: field("width", glyph.width)?,
                height: field("height", glyph.height)?,
                offset_x: field("x", glyph.x)?,
                offset_y: field("y", glyph.y)?,
            },
        );
    }
    Ok(textures)
}
