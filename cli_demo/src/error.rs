use std::path::PathBuf;

use dollar_one::GestureError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("bad sample on line {line}: {source}")]
    Sample {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path}: {source}")]
    Template {
        path: PathBuf,
        #[source]
        source: GestureError,
    },

    #[error(transparent)]
    Gesture(#[from] GestureError),
}

impl CliError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
