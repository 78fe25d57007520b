use anyhow::{Context, Result};

use super::{manifest_path, parent_dir};
use crate::cli::FontArgs;
use crate::model::records::TextureAtlasRecord;
use crate::parser::fnt;
use crate::processor::font::{font_asset_name, glyph_textures};
use crate::writer::{asset, manifest};

pub fn convert(args: &FontArgs) -> Result<()> {
    // 1. ── Parse ──────────────────────────────────────────────────────
    let font = fnt::read_font(&args.file)
        .with_context(|| format!("Reading font {}", args.file.display()))?;
    let name = args
        .name
        .clone()
        .unwrap_or_else(|| font_asset_name(&font.face));

    // 2. ── Process ────────────────────────────────────────────────────
    let textures = glyph_textures(&font, &args.file)?;
    let atlas = TextureAtlasRecord::with_textures(asset::extension_of(&font.page_file), textures);
    let image = parent_dir(&args.file).join(&font.page_file);

    // 3. ── Write outputs ──────────────────────────────────────────────
    asset::emit(&atlas, None, &image, &args.output, &name)
        .with_context(|| format!("Writing font `{name}`"))?;
    asset::emit_font_config(&args.output, &name)?;

    // 4. ── Register ───────────────────────────────────────────────────
    let manifest_path = manifest_path(args.config.as_ref());
    let relative = manifest::asset_path(&manifest_path, &args.output, &name)?;
    manifest::register(&manifest_path, &name, &relative)
        .with_context(|| format!("Registering font `{name}`"))?;

    Ok(())
}
