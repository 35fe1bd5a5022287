//! Byte sources and the filesystem collaborator.
//!
//! The codec parser reads archives through [`ReadAt`], so it does not care
//! whether the bytes live in memory or elsewhere. Everything that touches
//! the host filesystem goes through [`Filesystem`].

mod local;
mod memory;

pub use local::LocalFs;
pub use memory::MemoryReader;

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Trait for random access reading from a data source
#[async_trait]
pub trait ReadAt: Send + Sync {
    /// Read data at the specified offset into the buffer
    async fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize>;

    /// Get the total size of the data source
    fn size(&self) -> u64;
}

/// Filesystem operations the archive layer depends on.
///
/// Failures are reported as [`Error::Io`](crate::Error::Io) with the
/// original [`std::io::ErrorKind`] intact.
#[async_trait]
pub trait Filesystem: Send + Sync {
    /// Read the whole file at `path`.
    async fn read_bytes(&self, path: &Path) -> Result<Vec<u8>>;

    /// Create or truncate `path` and write `data` to it.
    async fn write_bytes(&self, path: &Path, data: &[u8]) -> Result<()>;

    /// List the regular files directly inside `dir`, as full paths.
    async fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>>;
}
