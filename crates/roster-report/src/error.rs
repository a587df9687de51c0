use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    /// The output destination itself is unusable; nothing can be written.
    #[error("cannot create output destination {path}: {source}")]
    Destination {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {name}: {source}")]
    Write {
        name: String,
        source: std::io::Error,
    },

    #[error("failed to serialize {name}: {message}")]
    Serialize { name: String, message: String },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

impl ExportError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Destination { .. })
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;
