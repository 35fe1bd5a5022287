//! Document values and their encodings.
//!
//! A [`Document`] is what goes into or comes out of an entry: raw bytes or
//! decoded text. [`Encoding`] names how the bytes are interpreted.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::Error;

/// Document encoding accepted by the reader and writer.
///
/// Parses from the tokens `"binary"`, `"utf-8"` and `"utf8"`; anything else
/// is [`Error::UnsupportedEncoding`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// Raw bytes, no decoding.
    #[default]
    Binary,
    /// UTF-8 text.
    Utf8,
}

impl Encoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Binary => "binary",
            Encoding::Utf8 => "utf-8",
        }
    }
}

impl FromStr for Encoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "binary" => Ok(Encoding::Binary),
            "utf-8" | "utf8" => Ok(Encoding::Utf8),
            other => Err(Error::UnsupportedEncoding(other.to_string())),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content of an entry: bytes or text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Document {
    Binary(Vec<u8>),
    Text(String),
}

impl Document {
    /// The document's bytes; text is viewed as UTF-8.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Document::Binary(bytes) => bytes,
            Document::Text(text) => text.as_bytes(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Document::Text(text) => Some(text),
            Document::Binary(_) => None,
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Document::Binary(bytes) => bytes,
            Document::Text(text) => text.into_bytes(),
        }
    }

    /// The document as text, replacing invalid UTF-8 sequences.
    pub fn into_text_lossy(self) -> String {
        match self {
            Document::Text(text) => text,
            Document::Binary(bytes) => match String::from_utf8(bytes) {
                Ok(text) => text,
                Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
            },
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Document::Text(_))
    }
}

impl From<Vec<u8>> for Document {
    fn from(bytes: Vec<u8>) -> Self {
        Document::Binary(bytes)
    }
}

impl From<&[u8]> for Document {
    fn from(bytes: &[u8]) -> Self {
        Document::Binary(bytes.to_vec())
    }
}

impl From<String> for Document {
    fn from(text: String) -> Self {
        Document::Text(text)
    }
}

impl From<&str> for Document {
    fn from(text: &str) -> Self {
        Document::Text(text.to_string())
    }
}

/// Media type of the ZIP container itself.
pub const MEDIA_TYPE_ZIP: &str = "application/zip";

/// Guess a media type from the extension of `path`, case-insensitively.
///
/// Returns `None` when the path has no extension or the extension is not
/// known.
pub fn media_type(path: &str) -> Option<&'static str> {
    let ext = Path::new(path).extension()?.to_str()?.to_ascii_lowercase();
    let media_type = match ext.as_str() {
        "json" => "application/json",
        "txt" | "text" | "log" => "text/plain",
        "md" | "markdown" => "text/markdown",
        "csv" => "text/csv",
        "html" | "htm" => "text/html",
        "xhtml" => "application/xhtml+xml",
        "css" => "text/css",
        "js" | "mjs" => "application/javascript",
        "xml" => "application/xml",
        "yaml" | "yml" => "text/yaml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "ico" => "image/vnd.microsoft.icon",
        "pdf" => "application/pdf",
        "zip" => MEDIA_TYPE_ZIP,
        "epub" => "application/epub+zip",
        "opf" => "application/oebps-package+xml",
        "ncx" => "application/x-dtbncx+xml",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "otf" => "font/otf",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "mp4" => "video/mp4",
        "bin" => "application/octet-stream",
        _ => return None,
    };
    Some(media_type)
}

/// Base filename component of an entry path.
pub fn document_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
