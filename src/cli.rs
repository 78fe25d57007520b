use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::model::{GroupShape, Replacement};

#[derive(Parser, Debug)]
#[command(author, version, about = "Convert editor exports into Tayira engine assets")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert a bitmap font (.fnt) and its page image
    Font(FontArgs),
    /// Convert the tilesets used by a Tiled map
    #[command(subcommand)]
    Tiled(TiledCommand),
    /// Convert a Tiled tileset into a regular texture atlas
    Tileset(TilesetArgs),
    /// Convert a Tiled map into a map description
    Map(MapArgs),
}

#[derive(Subcommand, Debug)]
pub enum TiledCommand {
    /// Convert assets
    Convert(TiledConvertArgs),
    /// Show information about assets
    Info(TiledInfoArgs),
}

#[derive(Args, Debug)]
pub struct FontArgs {
    /// The .fnt file to convert
    pub file: PathBuf,
    /// Directory to place the converted files in
    pub output: PathBuf,
    /// Name to give this font, ignoring its original name
    #[arg(short, long, alias = "font-name")]
    pub name: Option<String>,
    /// Path to the base asset configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct TiledConvertArgs {
    /// Directory containing the map file and its images
    pub asset_dir: PathBuf,
    /// Directory to place the converted files in
    pub output: PathBuf,
    /// Comma-separated layers to convert (default: all)
    #[arg(short, long, value_delimiter = ',')]
    pub layers: Vec<String>,
    /// Path to the base asset configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Asset name, only valid when a single tileset is converted
    #[arg(short, long)]
    pub name: Option<String>,
    /// Animation group shape in tiles, `cols,rows`
    #[arg(short, long, value_parser = GroupShape::parse)]
    pub shape: Option<GroupShape>,
    /// Comma-separated names for the animation groups, in atlas order
    #[arg(short, long, value_delimiter = ',')]
    pub animation_names: Vec<String>,
    /// Rewrite asset names, `old,new`
    #[arg(short, long, value_parser = Replacement::parse)]
    pub replace: Option<Replacement>,
}

#[derive(Args, Debug)]
pub struct TiledInfoArgs {
    /// Directory containing the map file
    pub asset_dir: PathBuf,
}

#[derive(Args, Debug)]
pub struct TilesetArgs {
    /// The Tiled tileset file to convert
    pub tileset: PathBuf,
    /// Directory to place the converted files in
    pub output: PathBuf,
    /// Path to the base asset configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Name of the tileset
    #[arg(short, long)]
    pub name: Option<String>,
}

#[derive(Args, Debug)]
pub struct MapArgs {
    /// The Tiled map file to convert
    pub map: PathBuf,
    /// Directory to place the converted files in
    pub output: PathBuf,
    /// Path to the base asset configuration file (maps are not registered)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Name of the map
    #[arg(short, long)]
    pub name: Option<String>,
}
