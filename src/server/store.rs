//! Temporary archive storage.
//!
//! Finished archives wait on disk for one download. Lifecycle is owned
//! here, not by the pipeline: the split handler saves the container, the
//! download handler reads it and schedules deletion after a short grace
//! delay.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::utils::AppConfig;

/// Grace delay between serving an archive and deleting it.
const DELETE_GRACE: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct ArchiveStore {
    directory: PathBuf,
}

impl ArchiveStore {
    #[must_use]
    pub fn from_config() -> Self {
        Self {
            directory: PathBuf::from(&*AppConfig::get().temp_directory),
        }
    }

    #[must_use]
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Writes a finished archive under the given file name.
    pub async fn save(&self, file_name: &str, bytes: &[u8]) -> io::Result<()> {
        if !Self::is_safe_name(file_name) {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "unsafe name"));
        }
        tokio::fs::create_dir_all(&self.directory).await?;
        tokio::fs::write(self.directory.join(file_name), bytes).await
    }

    /// Reads an archive for download and schedules its deletion.
    ///
    /// The file is removed after [`DELETE_GRACE`] regardless of whether the
    /// response made it to the client; an archive is served at most once.
    pub async fn take(&self, file_name: &str) -> io::Result<Vec<u8>> {
        if !Self::is_safe_name(file_name) {
            return Err(io::Error::new(io::ErrorKind::NotFound, "unsafe name"));
        }

        let path = self.directory.join(file_name);
        let bytes = tokio::fs::read(&path).await?;

        tokio::spawn(async move {
            tokio::time::sleep(DELETE_GRACE).await;
            if let Err(error) = tokio::fs::remove_file(&path).await {
                tracing::warn!(path = %path.display(), %error, "failed to delete served archive");
            }
        });

        Ok(bytes)
    }

    /// Rejects names that could escape the storage directory.
    fn is_safe_name(name: &str) -> bool {
        !name.is_empty()
            && !name.contains(['/', '\\'])
            && !name.contains("..")
            && Path::new(name).file_name().is_some()
    }
}
