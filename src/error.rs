//! Error types for archive operations.
//!
//! Every fallible operation in this crate returns [`Result<T>`]. Filesystem
//! failures are carried through unchanged in [`Error::Io`], so callers can
//! still branch on [`std::io::ErrorKind`]:
//!
//! ```rust,no_run
//! use zipdoc::{Archive, Error, LocalFs};
//!
//! # async fn demo() -> zipdoc::Result<()> {
//! match Archive::open(&LocalFs, "bundle.zip").await {
//!     Ok(_archive) => {}
//!     Err(Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
//!         eprintln!("no such archive");
//!     }
//!     Err(Error::MalformedArchive(reason)) => eprintln!("not a ZIP file: {reason}"),
//!     Err(e) => return Err(e),
//! }
//! # Ok(())
//! # }
//! ```

use std::io;

/// All failure modes of the archive layer.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A read targeted a path that is not in the archive and no fallback was given.
    #[error("not found: {path}")]
    NotFound { path: String },

    /// The bytes handed to the loader are not a ZIP container.
    #[error("malformed archive: {0}")]
    MalformedArchive(String),

    /// An entry exists but its text is not valid JSON.
    #[error("malformed document {path}: {source}")]
    MalformedDocument {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The requested document encoding is not one of `binary`, `utf-8`, `utf8`.
    #[error("unsupported document encoding: {0:?}")]
    UnsupportedEncoding(String),

    /// The writer was called with an incompatible document/encoding combination,
    /// or a path could not be mapped into the archive.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A structured value could not be rendered as JSON.
    #[error("cannot serialize value as JSON: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The stored checksum of an entry does not match its decoded content.
    #[error("CRC mismatch in {path}: expected {expected:#010x}, got {actual:#010x}")]
    CrcMismatch {
        path: String,
        expected: u32,
        actual: u32,
    },

    /// The entry uses a compression method this codec cannot decode.
    #[error("unsupported compression method {method} for {path}")]
    UnsupportedCompression { path: String, method: u16 },

    /// Filesystem or I/O failure, passed through as-is.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    pub(crate) fn not_found(path: &str) -> Self {
        Error::NotFound {
            path: path.to_string(),
        }
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Error::MalformedArchive(reason.into())
    }

    /// Returns true for a read of a missing path.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
