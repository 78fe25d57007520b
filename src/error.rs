use std::path::PathBuf;

use thiserror::Error;

/// Everything a converter can fail with.
///
/// Every variant except `NoConfigFound` aborts the run; `NoConfigFound` is
/// reported and turned into exit code 1 by the caller.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("input file not found: {}", .0.display())]
    MissingInputFile(PathBuf),

    #[error("malformed descriptor {}: {message}", .path.display())]
    MalformedDescriptor { path: PathBuf, message: String },

    #[error("no config file found in {} (must be a json file)", .0.display())]
    NoConfigFound(PathBuf),

    #[error("manifest {} unreadable: {message}", .path.display())]
    ManifestUnreadable { path: PathBuf, message: String },

    #[error("output directory {} is not inside the asset root {}", .dir.display(), .root.display())]
    OutsideAssetRoot { dir: PathBuf, root: PathBuf },

    #[error("invalid value for --{option}: {message}")]
    InvalidOption {
        option: &'static str,
        message: String,
    },

    #[error("writing {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConvertError>;

impl ConvertError {
    pub fn malformed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ConvertError::MalformedDescriptor {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConvertError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Read a whole input file, mapping "not found" onto `MissingInputFile`.
pub fn read_input(path: &std::path::Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ConvertError::MissingInputFile(path.to_path_buf()),
        _ => ConvertError::io(path, e),
    })
}
