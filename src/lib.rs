//! # zipdoc
//!
//! Path-addressed access to ZIP archives held in memory.
//!
//! An [`Archive`] is created empty or loaded from bytes, then read from and
//! written to by entry path. Reads pick an encoding (raw bytes, UTF-8 text
//! or JSON), report whether the entry existed, guess a media type from the
//! path, and can substitute a caller-supplied fallback instead of failing
//! on a missing entry. When done, [`Archive::generate`] produces the ZIP
//! file again.
//!
//! ## Features
//!
//! - Create, load, open and save archives
//! - Read entries as bytes, text or JSON, with optional fallback values
//! - Write bytes, text or JSON values
//! - Copy files from disk into the archive, singly or in batches
//! - STORED and DEFLATE entries, ZIP64 directories on read
//!
//! ## Example
//!
//! ```no_run
//! use serde_json::json;
//! use zipdoc::{Archive, LocalFs};
//!
//! #[tokio::main]
//! async fn main() -> zipdoc::Result<()> {
//!     let mut archive = Archive::open(&LocalFs, "bundle.zip").await?;
//!
//!     let manifest = archive
//!         .read_json("manifest.json", Some(json!({ "version": 0 })))
//!         .await?;
//!     if !manifest.exists {
//!         archive.write_json("manifest.json", &manifest.document).await?;
//!     }
//!
//!     for path in archive.list() {
//!         println!("{path}");
//!     }
//!
//!     archive.save(&LocalFs, "bundle.zip").await
//! }
//! ```

mod add;
pub mod archive;
pub mod cli;
pub mod document;
pub mod error;
pub mod io;
pub mod read;
mod write;
pub mod zip;

pub use archive::{Archive, ArchiveOptions, Generated, Opener};
pub use cli::Cli;
pub use document::{Document, Encoding};
pub use error::{Error, Result};
pub use io::{Filesystem, LocalFs, MemoryReader, ReadAt};
pub use read::{JsonReader, ReadOptions, ReadResult};
pub use zip::Compression;
