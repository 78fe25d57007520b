use anyhow::{Context, Result};

use super::{manifest_path, name_from_path, parent_dir};
use crate::cli::TilesetArgs;
use crate::model::records::{AtlasLayout, TextureAtlasRecord};
use crate::parser;
use crate::processor::tileset::regular_texture_info;
use crate::writer::{asset, manifest};

pub fn convert(args: &TilesetArgs) -> Result<()> {
    let tileset = parser::read_tileset(&args.tileset)
        .with_context(|| format!("Reading tileset {}", args.tileset.display()))?;
    let name = args
        .name
        .clone()
        .unwrap_or_else(|| name_from_path(&args.tileset));

    let atlas = TextureAtlasRecord {
        filetype: asset::extension_of(&tileset.image),
        layout: AtlasLayout::Regular(regular_texture_info(&tileset)),
    };
    let image = parent_dir(&args.tileset).join(&tileset.image);

    asset::emit(&atlas, None, &image, &args.output, &name)
        .with_context(|| format!("Writing tileset `{name}`"))?;

    let manifest_path = manifest_path(args.config.as_ref());
    let relative = manifest::asset_path(&manifest_path, &args.output, &name)?;
    manifest::register(&manifest_path, &name, &relative)
        .with_context(|| format!("Registering tileset `{name}`"))?;

    Ok(())
}
