//! ZIP container codec.
//!
//! Everything above this module sees a ZIP file only through
//! [`ZipArchive`]: create an empty one, load one from bytes, get/set/list
//! entries by exact name, and serialize it back.
//!
//! ## Architecture
//!
//! - [`structures`]: Record layouts (EOCD, central and local headers)
//! - [`parser`]: Reading those records from any [`ReadAt`](crate::io::ReadAt) source
//! - [`writer`]: Laying entries back out into a complete file
//!
//! ## Supported Features
//!
//! - Archive comments and ZIP64 directories on read
//! - STORED and DEFLATE entries, CRC-32 checked on decode
//! - UTF-8 entry names, and CP437 names from legacy tools on read
//!
//! ## Limitations
//!
//! - No encryption support
//! - No multi-disk archive support
//! - No ZIP64 output; archives are capped at 4 GiB and 65534 entries

mod archive;
mod cp437;
mod parser;
mod structures;
mod writer;

pub use archive::{Compression, MAX_ENTRIES, StoredEntry, ZipArchive};
pub use parser::ZipParser;
pub use structures::*;
pub use writer::write_archive;
