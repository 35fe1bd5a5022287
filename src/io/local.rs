use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::Filesystem;
use crate::error::Result;

/// Host filesystem, backed by `tokio::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

#[async_trait]
impl Filesystem for LocalFs {
    async fn read_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        tracing::trace!(path = %path.display(), "read_bytes");
        Ok(fs::read(path).await?)
    }

    async fn write_bytes(&self, path: &Path, data: &[u8]) -> Result<()> {
        tracing::trace!(path = %path.display(), len = data.len(), "write_bytes");
        Ok(fs::write(path, data).await?)
    }

    async fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        let mut entries = fs::read_dir(dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                files.push(entry.path());
            }
        }
        // read_dir order is platform dependent
        files.sort();
        Ok(files)
    }
}
