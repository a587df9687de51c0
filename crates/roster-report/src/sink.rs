//! Where artifacts go.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ExportError, Result};

/// "Write these bytes under this name" capability.
pub trait ArtifactSink {
    /// Store one artifact and return where it ended up.
    fn write(&mut self, name: &str, bytes: &[u8]) -> Result<String>;
}

/// Writes artifacts as files in one directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Create (or reuse) `dir`. Failure here is the one fatal export error.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| ExportError::Destination {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ArtifactSink for DirectorySink {
    fn write(&mut self, name: &str, bytes: &[u8]) -> Result<String> {
        let path = self.dir.join(name);
        fs::write(&path, bytes).map_err(|source| ExportError::Write {
            name: name.to_string(),
            source,
        })?;
        Ok(path.display().to_string())
    }
}
