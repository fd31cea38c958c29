//! Append-only per-identity reflection log.
//!
//! Writers for the same identity are not coordinated; concurrent submissions
//! may interleave.

use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use super::{JournalError, ReflectionEntry};
use crate::identity::Identity;

#[derive(Debug, Clone)]
pub struct Recorder {
    dir: PathBuf,
}

impl Recorder {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn log_path(&self, identity: &Identity) -> PathBuf {
        self.dir.join(identity.log_file_name())
    }

    pub fn document_path(&self, identity: &Identity) -> PathBuf {
        self.dir.join(identity.document_file_name())
    }

    /// Append one record for `entry` and return the log path.
    pub async fn append(
        &self,
        identity: &Identity,
        entry: &ReflectionEntry,
    ) -> Result<PathBuf, JournalError> {
        fs::create_dir_all(&self.dir).await?;
        let path = self.log_path(identity);
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;
        file.write_all(entry.record(identity).as_bytes()).await?;
        file.flush().await?;
        tracing::info!("Appended reflection for {} to {}", entry.date, path.display());
        Ok(path)
    }

    /// Replace the identity's exported document.
    pub async fn write_document(
        &self,
        identity: &Identity,
        bytes: &[u8],
    ) -> Result<PathBuf, JournalError> {
        fs::create_dir_all(&self.dir).await?;
        let path = self.document_path(identity);
        fs::write(&path, bytes).await?;
        tracing::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(path)
    }

    /// The last exported document, if any.
    pub async fn read_document(&self, identity: &Identity) -> Result<Option<Vec<u8>>, JournalError> {
        match fs::read(self.document_path(identity)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Raw log contents; empty if nothing was recorded yet.
    pub async fn read_all(&self, identity: &Identity) -> Result<String, JournalError> {
        match fs::read_to_string(self.log_path(identity)).await {
            Ok(text) => Ok(text),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
            Err(err) => Err(err.into()),
        }
    }
}
