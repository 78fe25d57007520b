use anyhow::{Context, Result};
use log::debug;

use super::name_from_path;
use crate::cli::MapArgs;
use crate::parser;
use crate::processor::map::map_record;
use crate::writer::asset;

/// Maps are referenced from the level list, not the asset manifest, so
/// nothing is registered here.
pub fn convert(args: &MapArgs) -> Result<()> {
    if let Some(config) = &args.config {
        debug!("maps are not registered, ignoring {}", config.display());
    }
    let map = parser::read_map(&args.map)
        .with_context(|| format!("Reading map {}", args.map.display()))?;
    let name = args.name.clone().unwrap_or_else(|| name_from_path(&args.map));

    let record = map_record(&map);
    asset::emit_map(&record, &args.output, &name)
        .with_context(|| format!("Writing map `{name}`"))?;
    Ok(())
}
