use flate2::Compression as DeflateLevel;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use std::collections::HashMap;
use std::io::{Read, Write};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::io::ReadAt;

use super::parser::ZipParser;
use super::structures::*;
use super::writer;

/// Most entries a ZIP32 directory can count; 0xFFFF marks ZIP64.
pub const MAX_ENTRIES: usize = u16::MAX as usize - 1;

/// How new entries are compressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    /// Store data as-is.
    Stored,
    /// DEFLATE at the given level (0-9).
    Deflate(u32),
}

impl Default for Compression {
    fn default() -> Self {
        Compression::Deflate(6)
    }
}

/// One entry as it sits in the container: header plus compressed payload.
#[derive(Debug, Clone)]
pub struct StoredEntry {
    pub header: ZipFileEntry,
    pub data: Vec<u8>,
}

impl StoredEntry {
    /// Build an entry for `name` from uncompressed `content`.
    ///
    /// DEFLATE output that does not shrink the content is discarded in
    /// favour of STORED.
    pub fn compress(name: &str, content: &[u8], compression: Compression) -> Result<Self> {
        let mut method = CompressionMethod::Stored;
        let mut data = None;

        if let Compression::Deflate(level) = compression {
            let mut encoder = DeflateEncoder::new(Vec::new(), DeflateLevel::new(level.min(9)));
            encoder.write_all(content)?;
            let deflated = encoder.finish()?;
            if deflated.len() < content.len() {
                method = CompressionMethod::Deflate;
                data = Some(deflated);
            }
        }
        let data = data.unwrap_or_else(|| content.to_vec());

        Ok(Self {
            header: ZipFileEntry {
                file_name: name.to_string(),
                flags: FLAG_UTF8,
                compression_method: method,
                compressed_size: data.len() as u64,
                uncompressed_size: content.len() as u64,
                crc32: crc32fast::hash(content),
                lfh_offset: 0,
                last_mod_time: DOS_EPOCH_TIME,
                last_mod_date: DOS_EPOCH_DATE,
                is_directory: name.ends_with('/'),
            },
            data,
        })
    }

    pub fn name(&self) -> &str {
        &self.header.file_name
    }

    /// Decode the payload and check it against the recorded CRC-32.
    pub fn decompress(&self) -> Result<Vec<u8>> {
        let header = &self.header;
        let unsupported = || Error::UnsupportedCompression {
            path: header.file_name.clone(),
            method: header.compression_method.as_u16(),
        };
        if header.is_encrypted() {
            return Err(unsupported());
        }

        let content = match header.compression_method {
            CompressionMethod::Stored => self.data.clone(),
            CompressionMethod::Deflate => {
                let capacity = usize::try_from(header.uncompressed_size).unwrap_or(0);
                let mut content = Vec::with_capacity(capacity.min(64 << 20));
                DeflateDecoder::new(self.data.as_slice())
                    .read_to_end(&mut content)
                    .map_err(|e| {
                        Error::malformed(format!("cannot inflate {}: {e}", header.file_name))
                    })?;
                content
            }
            CompressionMethod::Unknown(_) => return Err(unsupported()),
        };

        let actual = crc32fast::hash(&content);
        if actual != header.crc32 {
            return Err(Error::CrcMismatch {
                path: header.file_name.clone(),
                expected: header.crc32,
                actual,
            });
        }
        Ok(content)
    }
}

/// In-memory ZIP container: a path-keyed entry table in directory order.
///
/// This is the codec the rest of the crate treats as a black box:
/// create, load, serialize, get, set and list.
#[derive(Debug, Clone, Default)]
pub struct ZipArchive {
    entries: Vec<StoredEntry>,
    index: HashMap<String, usize>,
}

impl ZipArchive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a complete archive from `reader`.
    pub async fn load<R: ReadAt>(reader: Arc<R>) -> Result<Self> {
        let parser = ZipParser::new(reader);
        let headers = parser.list_files().await?;

        let mut archive = Self::new();
        for header in headers {
            let data = parser.read_entry_data(&header).await?;
            if archive.index.contains_key(&header.file_name) {
                tracing::warn!(path = %header.file_name, "duplicate entry name, keeping the last");
            }
            archive.set(StoredEntry { header, data });
        }

        tracing::debug!(entries = archive.len(), "loaded archive");
        Ok(archive)
    }

    pub fn serialize(&self) -> Result<Vec<u8>> {
        writer::write_archive(&self.entries)
    }

    pub fn get(&self, name: &str) -> Option<&StoredEntry> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Fail unless the archive could still be serialized with `entry` set.
    ///
    /// Output is plain ZIP32: at most 65534 entries, and every offset and
    /// size must stay below 4 GiB.
    pub fn check_capacity(&self, entry: &StoredEntry) -> Result<()> {
        entry.header.check_writable()?;

        let replaced = self.get(entry.name());
        if replaced.is_none() && self.entries.len() >= MAX_ENTRIES {
            return Err(Error::InvalidArgument(format!(
                "archive already holds {MAX_ENTRIES} entries"
            )));
        }

        let current: u64 = self.entries.iter().map(|e| e.header.written_len()).sum();
        let total = current - replaced.map_or(0, |e| e.header.written_len())
            + entry.header.written_len();
        if total >= u64::from(u32::MAX) {
            return Err(Error::InvalidArgument("archive would exceed 4 GiB".into()));
        }
        Ok(())
    }

    /// Insert `entry`, replacing any entry with the same name in place.
    pub fn set(&mut self, entry: StoredEntry) {
        if let Some(&i) = self.index.get(entry.name()) {
            self.entries[i] = entry;
            return;
        }
        self.index
            .insert(entry.name().to_string(), self.entries.len());
        self.entries.push(entry);
    }

    /// Entry names in directory order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(StoredEntry::name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
