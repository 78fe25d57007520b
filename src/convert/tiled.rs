use anyhow::{Context, Result};
use log::{info, warn};

use super::manifest_path;
use crate::cli::{TiledConvertArgs, TiledInfoArgs};
use crate::error::ConvertError;
use crate::model::records::{AnimationRecord, TextureAtlasRecord};
use crate::model::tiled::{TiledLayer, TiledMap};
use crate::model::TilesetDescriptor;
use crate::parser;
use crate::processor::grouping;
use crate::writer::{asset, manifest};

/// Everything needed to write one tileset asset.
struct PendingAsset {
    name: String,
    descriptor: TilesetDescriptor,
    atlas: TextureAtlasRecord,
    animation: Option<AnimationRecord>,
}

fn selected_layers<'a>(map: &'a TiledMap, names: &[String]) -> Vec<&'a TiledLayer> {
    if names.is_empty() {
        return map.layers.iter().collect();
    }
    for name in names {
        if !map.layers.iter().any(|l| &l.name == name) {
            warn!("no layer named `{name}`");
        }
    }
    map.layers.iter().filter(|l| names.contains(&l.name)).collect()
}

pub fn convert(args: &TiledConvertArgs) -> Result<()> {
    // 1. ── Parse ──────────────────────────────────────────────────────
    let config = parser::find_config(&args.asset_dir)?;
    let map = parser::read_map(&config)
        .with_context(|| format!("Reading map {}", config.display()))?;

    let layers = selected_layers(&map, &args.layers);
    let used: Vec<_> = map
        .tilesets
        .iter()
        .filter(|ts| {
            layers
                .iter()
                .any(|l| l.data.iter().flatten().any(|&gid| ts.has_tile(gid)))
        })
        .collect();
    info!("{} of {} tilesets in use", used.len(), map.tilesets.len());

    if args.name.is_some() && used.len() > 1 {
        return Err(ConvertError::InvalidOption {
            option: "name",
            message: format!("{} tilesets are converted, a single name is ambiguous", used.len()),
        }
        .into());
    }

    // 2. ── Process ────────────────────────────────────────────────────
    let mut pending = Vec::with_capacity(used.len());
    for raw in used {
        let descriptor = TilesetDescriptor::from_tiled(raw, &config)?;
        let name = match (&args.name, &args.replace) {
            (Some(name), _) => name.clone(),
            (None, Some(replace)) => replace.apply(&raw.name.to_lowercase()),
            (None, None) => raw.name.to_lowercase(),
        };

        let (textures, animation) = match args.shape {
            Some(shape) => {
                let grouped = grouping::group_animations(&descriptor, shape, &args.animation_names);
                (grouped.textures, Some(grouping::animation_record(&grouped.groups)))
            }
            None => (grouping::frame_textures(&descriptor), None),
        };
        let atlas = TextureAtlasRecord::with_textures(asset::extension_of(&raw.image), textures);

        pending.push(PendingAsset {
            name,
            descriptor,
            atlas,
            animation,
        });
    }

    for p in &pending {
        let image = args.asset_dir.join(&p.descriptor.image_path);
        if !image.is_file() {
            return Err(ConvertError::MissingInputFile(image).into());
        }
    }

    // 3. ── Write outputs ──────────────────────────────────────────────
    for p in &pending {
        let image = args.asset_dir.join(&p.descriptor.image_path);
        asset::emit(&p.atlas, p.animation.as_ref(), &image, &args.output, &p.name)
            .with_context(|| format!("Writing tileset `{}`", p.name))?;
    }
    if pending.is_empty() {
        return Ok(());
    }

    // 4. ── Register ───────────────────────────────────────────────────
    let manifest_path = manifest_path(args.config.as_ref());
    let mut manifest = manifest::Manifest::load(&manifest_path)?;
    for p in &pending {
        let relative = manifest::asset_path(&manifest_path, &args.output, &p.name)?;
        manifest.upsert(&p.name, &relative);
    }
    manifest
        .save()
        .with_context(|| format!("Saving manifest {}", manifest_path.display()))?;
    info!("Registered {} assets", pending.len());

    Ok(())
}

pub fn info(args: &TiledInfoArgs) -> Result<()> {
    let config = parser::find_config(&args.asset_dir)?;
    let map = parser::read_map(&config)
        .with_context(|| format!("Reading map {}", config.display()))?;

    println!("Layers:");
    for layer in &map.layers {
        println!("    -> {}", layer.name);
    }
    Ok(())
}
