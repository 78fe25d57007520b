pub mod cli;
pub mod convert;
pub mod error;
pub mod model;
pub mod parser;
pub mod processor;
pub mod writer;

use std::process::ExitCode;

use log::error;

use crate::cli::{Cli, Command, TiledCommand};
use crate::error::ConvertError;

/// Run one converter. A directory without a map descriptor is reported
/// and gives exit code 1; every other failure is returned to the caller.
pub fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let result = match &cli.command {
        Command::Font(args) => convert::font::convert(args),
        Command::Tiled(TiledCommand::Convert(args)) => convert::tiled::convert(args),
        Command::Tiled(TiledCommand::Info(args)) => convert::tiled::info(args),
        Command::Tileset(args) => convert::tileset::convert(args),
        Command::Map(args) => convert::map::convert(args),
    };

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => match e.downcast_ref::<ConvertError>() {
            Some(err) if matches!(err, ConvertError::NoConfigFound(_)) => {
                error!("{err}");
                Ok(ExitCode::from(1))
            }
            _ => Err(e),
        },
    }
}
