use std::path::PathBuf;

use pathviz_core::GridError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures of the persistence layer.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("invalid config file {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: StorageError,
    },

    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

impl Error {
    #[must_use]
    pub fn config(path: impl Into<PathBuf>, source: impl Into<StorageError>) -> Self {
        Self::Config {
            path: path.into(),
            source: source.into(),
        }
    }
}
