//! Entry reader.
//!
//! Resolves a path to its content. Every read reports whether the entry
//! existed; a read of a missing path either fails with
//! [`Error::NotFound`] or, when the caller supplied an `otherwise` value,
//! returns that value with `exists == false`.
//!
//! ```rust
//! use zipdoc::{Archive, Document, ReadOptions};
//!
//! # async fn demo() -> zipdoc::Result<()> {
//! let mut archive = Archive::new();
//! archive.write_utf8("a.txt", "hello").await?;
//!
//! let text = archive.read_utf8("a.txt", None).await?;
//! assert_eq!(text.document, "hello");
//! assert_eq!(text.document_media_type, Some("text/plain"));
//!
//! let missing = archive
//!     .read("b.txt", ReadOptions::new().otherwise(Document::from("default")))
//!     .await?;
//! assert!(!missing.exists);
//! # Ok(())
//! # }
//! ```

use serde_json::Value;

use crate::archive::Archive;
use crate::document::{Document, Encoding, document_name, media_type};
use crate::error::{Error, Result};

/// Parameters for [`Archive::read`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadOptions {
    /// How to decode the entry's bytes. Defaults to [`Encoding::Binary`].
    pub encoding: Encoding,
    /// Returned in place of a not-found error.
    pub otherwise: Option<Document>,
}

impl ReadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn otherwise(mut self, document: impl Into<Document>) -> Self {
        self.otherwise = Some(document.into());
        self
    }
}

/// What a read produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadResult<T = Document> {
    pub document: T,
    /// Guessed from the path's extension; `None` if unknown or if the
    /// fallback was used.
    pub document_media_type: Option<&'static str>,
    /// Always `None`: the document is already decoded.
    pub document_encoding: Option<Encoding>,
    /// Base filename of the requested path.
    pub document_name: String,
    /// False when the fallback value was returned.
    pub exists: bool,
}

impl<T> ReadResult<T> {
    fn map<U>(self, f: impl FnOnce(T) -> U) -> ReadResult<U> {
        ReadResult {
            document: f(self.document),
            document_media_type: self.document_media_type,
            document_encoding: self.document_encoding,
            document_name: self.document_name,
            exists: self.exists,
        }
    }

    fn try_map<U>(self, f: impl FnOnce(T) -> Result<U>) -> Result<ReadResult<U>> {
        Ok(ReadResult {
            document: f(self.document)?,
            document_media_type: self.document_media_type,
            document_encoding: self.document_encoding,
            document_name: self.document_name,
            exists: self.exists,
        })
    }
}

impl Archive {
    /// Read the entry at `path`.
    ///
    /// With [`Encoding::Binary`] the document is [`Document::Binary`]; with
    /// [`Encoding::Utf8`] it is [`Document::Text`], decoded lossily, so
    /// binary content comes back with replacement characters rather than
    /// an error.
    pub async fn read(&self, path: &str, options: ReadOptions) -> Result<ReadResult> {
        tracing::trace!(method = "read", path, encoding = %options.encoding, "called");

        match self.decode(path, options.encoding)? {
            Some(found) => Ok(found),
            None => fallback(path, options.otherwise),
        }
    }

    /// Read the entry's raw bytes.
    pub async fn read_buffer(
        &self,
        path: &str,
        otherwise: Option<Vec<u8>>,
    ) -> Result<ReadResult<Vec<u8>>> {
        tracing::trace!(method = "read.buffer", path, "called");

        match self.decode(path, Encoding::Binary)? {
            Some(found) => Ok(found.map(Document::into_bytes)),
            None => fallback(path, otherwise),
        }
    }

    /// Read the entry as UTF-8 text.
    pub async fn read_utf8(
        &self,
        path: &str,
        otherwise: Option<String>,
    ) -> Result<ReadResult<String>> {
        tracing::trace!(method = "read.utf8", path, "called");

        match self.decode(path, Encoding::Utf8)? {
            Some(found) => Ok(found.map(Document::into_text_lossy)),
            None => fallback(path, otherwise),
        }
    }

    /// Read the entry as UTF-8 text and parse it as JSON.
    ///
    /// A fallback value is returned as-is, without parsing. Unparseable
    /// text fails with [`Error::MalformedDocument`].
    pub async fn read_json(
        &self,
        path: &str,
        otherwise: Option<Value>,
    ) -> Result<ReadResult<Value>> {
        tracing::trace!(method = "read.json", path, "called");

        match self.decode(path, Encoding::Utf8)? {
            Some(found) => found.try_map(|document| {
                serde_json::from_str(&document.into_text_lossy()).map_err(|source| {
                    Error::MalformedDocument {
                        path: path.to_string(),
                        source,
                    }
                })
            }),
            None => fallback(path, otherwise),
        }
    }

    /// Bind `path` for repeated JSON reads.
    pub fn json_reader(path: impl Into<String>) -> JsonReader {
        JsonReader { path: path.into() }
    }

    /// Decode the entry at `path`, or `None` if there is no such entry.
    fn decode(&self, path: &str, encoding: Encoding) -> Result<Option<ReadResult>> {
        let Some(entry) = self.zip().get(path) else {
            return Ok(None);
        };

        let bytes = entry.decompress()?;
        let document = match encoding {
            Encoding::Binary => Document::Binary(bytes),
            Encoding::Utf8 => Document::Binary(bytes).into_text_lossy().into(),
        };

        Ok(Some(ReadResult {
            document,
            document_media_type: media_type(path),
            document_encoding: None,
            document_name: document_name(path),
            exists: true,
        }))
    }
}

fn fallback<T>(path: &str, otherwise: Option<T>) -> Result<ReadResult<T>> {
    match otherwise {
        Some(document) => Ok(ReadResult {
            document,
            document_media_type: None,
            document_encoding: None,
            document_name: document_name(path),
            exists: false,
        }),
        None => {
            tracing::trace!(path, "not found");
            Err(Error::not_found(path))
        }
    }
}

/// A JSON read with its entry path already bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonReader {
    path: String,
}

impl JsonReader {
    pub fn path(&self) -> &str {
        &self.path
    }

    pub async fn read(
        &self,
        archive: &Archive,
        otherwise: Option<Value>,
    ) -> Result<ReadResult<Value>> {
        archive.read_json(&self.path, otherwise).await
    }
}
