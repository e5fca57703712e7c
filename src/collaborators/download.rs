//! Saving a file resource's bytes under its original name.

use crate::collaborators::FileHandle;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("failed to read {name}: {source}")]
    Read { name: String, source: io::Error },
    #[error("failed to save {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("invalid file name: {0:?}")]
    InvalidName(String),
}

/// The download primitive: synchronously starts saving a handle's bytes.
pub trait Downloader: Send + Sync {
    fn trigger(&self, file: &FileHandle) -> Result<(), DownloadError>;
}

/// Saves downloads into one directory, like a browser's download folder.
#[derive(Debug, Clone)]
pub struct DirectoryDownloader {
    dir: PathBuf,
}

impl DirectoryDownloader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Where `name` would be saved. Only the final path component is kept, so a
    /// picked name can never escape the download directory.
    pub fn target_for(&self, name: &str) -> Result<PathBuf, DownloadError> {
        Path::new(name)
            .file_name()
            .map(|file_name| self.dir.join(file_name))
            .ok_or_else(|| DownloadError::InvalidName(name.to_string()))
    }
}

impl Downloader for DirectoryDownloader {
    fn trigger(&self, file: &FileHandle) -> Result<(), DownloadError> {
        let target = self.target_for(file.name())?;
        let bytes = file.read().map_err(|source| DownloadError::Read {
            name: file.name().to_string(),
            source,
        })?;
        debug!(name = file.name(), bytes = bytes.len(), "Saving download");
        std::fs::write(&target, &bytes).map_err(|source| DownloadError::Write {
            path: target.clone(),
            source,
        })?;
        info!(path = %target.display(), "Download saved");
        Ok(())
    }
}
