use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors produced while stripping a source directory
#[derive(Error, Debug)]
pub enum StripError {
    #[error("Source directory not found: {}", path.display())]
    MissingSourceDir { path: PathBuf },

    #[error("Failed to list {}", path.display())]
    Discovery { path: PathBuf, source: ignore::Error },

    #[error("Failed to read {}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to write {}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("Failed to back up {}", path.display())]
    Backup { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, StripError>;
