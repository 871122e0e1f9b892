use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("Please select at least one character type.")]
    NoCategorySelected,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: io::Error,
    },

    #[error("invalid config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid config file {path:?}: {reason}")]
    Invalid {
        path: PathBuf,
        reason: String,
    },
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("could not encode output: {0}")]
    Json(#[from] serde_json::Error),
}
