//! The archive handle.
//!
//! An [`Archive`] is created empty or loaded from bytes, mutated through
//! the writer and bulk adder, queried through the reader and lister, and
//! serialized with [`Archive::generate`]. Serialization does not consume
//! the handle, so it can keep being edited and generated again.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::document::{Encoding, MEDIA_TYPE_ZIP};
use crate::error::Result;
use crate::io::{Filesystem, MemoryReader};
use crate::zip::{Compression, ZipArchive};

/// Settings for entries written through an [`Archive`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArchiveOptions {
    /// Compression applied to newly written entries. Loaded entries keep
    /// whatever method they were stored with.
    pub compression: Compression,
}

/// A mutable, in-memory ZIP archive.
///
/// All operations take the handle by reference; there is no internal
/// locking, so callers sharing one handle across tasks must serialize
/// their writes themselves.
#[derive(Debug, Clone, Default)]
pub struct Archive {
    zip: ZipArchive,
    options: ArchiveOptions,
}

/// Output of [`Archive::generate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    /// The serialized ZIP file.
    pub document: Vec<u8>,
    /// Always `application/zip`.
    pub document_media_type: &'static str,
    /// Always `None`: the bytes are final, not pending an encode.
    pub document_encoding: Option<Encoding>,
}

impl Archive {
    /// Create an archive with no entries.
    pub fn new() -> Self {
        tracing::trace!(method = "initialize", "called");
        Self::default()
    }

    pub fn with_options(mut self, options: ArchiveOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ArchiveOptions {
        &self.options
    }

    /// Parse an archive already held in memory.
    ///
    /// Fails with [`Error::MalformedArchive`](crate::Error::MalformedArchive)
    /// if `document` is not a ZIP container.
    pub async fn load(document: impl Into<Vec<u8>>) -> Result<Self> {
        let document = document.into();
        tracing::trace!(method = "initialize.load", len = document.len(), "called");

        let zip = ZipArchive::load(Arc::new(MemoryReader::new(document))).await?;
        Ok(Self {
            zip,
            options: ArchiveOptions::default(),
        })
    }

    /// Read the file at `path` through `fs` and load it.
    pub async fn open<F>(fs: &F, path: impl AsRef<Path>) -> Result<Self>
    where
        F: Filesystem + ?Sized,
    {
        let path = path.as_ref();
        tracing::trace!(method = "initialize.open", path = %path.display(), "called");

        let document = fs.read_bytes(path).await?;
        Self::load(document).await
    }

    /// Bind `path` now and open it later.
    pub fn opener(path: impl Into<PathBuf>) -> Opener {
        Opener { path: path.into() }
    }

    /// Every entry path, in the order the archive stores them.
    pub fn list(&self) -> Vec<String> {
        tracing::trace!(method = "list", "called");
        self.zip.names().map(str::to_string).collect()
    }

    /// Whether `path` names an entry, by exact match.
    pub fn exists(&self, path: &str) -> bool {
        self.zip.contains(path)
    }

    pub fn len(&self) -> usize {
        self.zip.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zip.is_empty()
    }

    /// Serialize the current state into a ZIP file.
    pub async fn generate(&self) -> Result<Generated> {
        tracing::trace!(method = "generate", entries = self.zip.len(), "called");

        Ok(Generated {
            document: self.zip.serialize()?,
            document_media_type: MEDIA_TYPE_ZIP,
            document_encoding: None,
        })
    }

    /// Serialize and write the result to `path` through `fs`.
    pub async fn save<F>(&self, fs: &F, path: impl AsRef<Path>) -> Result<()>
    where
        F: Filesystem + ?Sized,
    {
        let path = path.as_ref();
        tracing::trace!(method = "generate.save", path = %path.display(), "called");

        let generated = self.generate().await?;
        fs.write_bytes(path, &generated.document).await
    }

    pub(crate) fn zip(&self) -> &ZipArchive {
        &self.zip
    }

    pub(crate) fn zip_mut(&mut self) -> &mut ZipArchive {
        &mut self.zip
    }
}

/// An initializer with its archive path already bound.
///
/// ```rust,no_run
/// use zipdoc::{Archive, LocalFs};
///
/// # async fn demo() -> zipdoc::Result<()> {
/// let sample = Archive::opener("tests/data/sample.zip");
/// let first = sample.open(&LocalFs).await?;
/// let second = sample.open(&LocalFs).await?;
/// assert_eq!(first.list(), second.list());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Opener {
    path: PathBuf,
}

impl Opener {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn open<F>(&self, fs: &F) -> Result<Archive>
    where
        F: Filesystem + ?Sized,
    {
        Archive::open(fs, &self.path).await
    }
}
