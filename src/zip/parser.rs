//! Low-level ZIP archive parser.
//!
//! This module handles the binary parsing of ZIP file structures,
//! reading from any source that implements the [`ReadAt`] trait.
//!
//! ## Parsing Strategy
//!
//! ZIP files are designed to be read from the end:
//! 1. Find the End of Central Directory (EOCD) at the file's end
//! 2. If ZIP64, read the ZIP64 EOCD for large file support
//! 3. Read the Central Directory to get metadata for all files
//! 4. For each entry, read its Local File Header to locate the data
//!
//! Every structural problem is reported as
//! [`Error::MalformedArchive`](crate::Error::MalformedArchive).

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Cursor, Read};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::io::ReadAt;

use super::cp437;
use super::structures::*;

/// Maximum ZIP comment size allowed by the format (65535 bytes).
///
/// This limits the search area when looking for EOCD with a comment.
const MAX_COMMENT_SIZE: u64 = 65535;

/// Low-level ZIP file parser.
///
/// Generic over the reader so the same code serves in-memory buffers and
/// any other random-access source.
///
/// ## Usage
///
/// Typically used through [`ZipArchive::load`](super::ZipArchive::load)
/// rather than directly.
///
/// ```ignore
/// let parser = ZipParser::new(reader);
/// for entry in parser.list_files().await? {
///     let data = parser.read_entry_data(&entry).await?;
/// }
/// ```
pub struct ZipParser<R: ReadAt> {
    /// The underlying data source
    reader: Arc<R>,
    /// Total size of the archive in bytes
    size: u64,
}

impl<R: ReadAt> ZipParser<R> {
    pub fn new(reader: Arc<R>) -> Self {
        let size = reader.size();
        Self { reader, size }
    }

    /// Check that `len` bytes at `offset` lie inside the source.
    ///
    /// Lengths come from the archive itself, so this runs before any
    /// buffer of that length is allocated.
    fn checked_len(&self, offset: u64, len: u64) -> Result<usize> {
        let in_bounds = offset
            .checked_add(len)
            .is_some_and(|end| end <= self.size);
        if !in_bounds {
            return Err(Error::malformed("record extends past end of archive"));
        }
        usize::try_from(len).map_err(|_| Error::malformed("record too large"))
    }

    /// Fill `buf` from `offset`, failing if the source ends first.
    async fn read_exact_at(&self, offset: u64, buf: &mut [u8]) -> Result<()> {
        self.checked_len(offset, buf.len() as u64)?;

        let mut filled = 0;
        while filled < buf.len() {
            let n = self
                .reader
                .read_at(offset + filled as u64, &mut buf[filled..])
                .await?;
            if n == 0 {
                return Err(Error::malformed("unexpected end of archive"));
            }
            filled += n;
        }
        Ok(())
    }

    /// Find and parse the End of Central Directory record.
    ///
    /// Handles both the simple case (no comment) and archives with
    /// comments by searching backwards for the signature.
    ///
    /// Returns the EOCD record and its offset in the file.
    pub async fn find_eocd(&self) -> Result<(EndOfCentralDirectory, u64)> {
        if self.size < EndOfCentralDirectory::SIZE as u64 {
            return Err(Error::malformed("too short to be a ZIP file"));
        }

        // Common case: no archive comment, EOCD is the last 22 bytes.
        let offset = self.size - EndOfCentralDirectory::SIZE as u64;
        let mut buf = vec![0u8; EndOfCentralDirectory::SIZE];
        self.read_exact_at(offset, &mut buf).await?;

        if &buf[0..4] == EndOfCentralDirectory::SIGNATURE && &buf[20..22] == b"\x00\x00" {
            let eocd = EndOfCentralDirectory::from_bytes(&buf)?;
            return Ok((eocd, offset));
        }

        // Otherwise the comment pushes the EOCD further back.
        let search_size = (MAX_COMMENT_SIZE + EndOfCentralDirectory::SIZE as u64).min(self.size);
        let search_start = self.size - search_size;

        let mut buf = vec![0u8; search_size as usize];
        self.read_exact_at(search_start, &mut buf).await?;

        for i in (0..=buf.len() - EndOfCentralDirectory::SIZE).rev() {
            if &buf[i..i + 4] == EndOfCentralDirectory::SIGNATURE {
                // The comment length must account for every trailing byte.
                let comment_len = u16::from_le_bytes([buf[i + 20], buf[i + 21]]) as usize;

                if comment_len == buf.len() - i - EndOfCentralDirectory::SIZE {
                    let eocd = EndOfCentralDirectory::from_bytes(
                        &buf[i..i + EndOfCentralDirectory::SIZE],
                    )?;
                    return Ok((eocd, search_start + i as u64));
                }
            }
        }

        Err(Error::malformed("end of central directory not found"))
    }

    /// Read the ZIP64 End of Central Directory record.
    ///
    /// Called when the regular EOCD has saturated fields
    /// (0xFFFF or 0xFFFFFFFF).
    pub async fn read_zip64_eocd(&self, eocd_offset: u64) -> Result<Zip64EOCD> {
        // The locator sits immediately before the regular EOCD
        let locator_offset = eocd_offset
            .checked_sub(Zip64EOCDLocator::SIZE as u64)
            .ok_or_else(|| Error::malformed("missing ZIP64 locator"))?;
        let mut locator_buf = vec![0u8; Zip64EOCDLocator::SIZE];
        self.read_exact_at(locator_offset, &mut locator_buf).await?;

        let locator = Zip64EOCDLocator::from_bytes(&locator_buf)?;

        let mut eocd64_buf = vec![0u8; Zip64EOCD::MIN_SIZE];
        self.read_exact_at(locator.eocd64_offset, &mut eocd64_buf)
            .await?;

        Zip64EOCD::from_bytes(&eocd64_buf)
    }

    /// List all entries recorded in the Central Directory, in directory order.
    pub async fn list_files(&self) -> Result<Vec<ZipFileEntry>> {
        let (eocd, eocd_offset) = self.find_eocd().await?;

        if eocd.is_multi_disk() {
            return Err(Error::malformed("multi-disk archives are not supported"));
        }

        let (cd_offset, cd_size, total_entries) = if eocd.is_zip64() {
            let eocd64 = self.read_zip64_eocd(eocd_offset).await?;
            (eocd64.cd_offset, eocd64.cd_size, eocd64.total_entries)
        } else {
            (
                eocd.cd_offset as u64,
                eocd.cd_size as u64,
                eocd.total_entries as u64,
            )
        };

        // Each record is at least 46 bytes; reject counts the directory cannot hold.
        if total_entries.saturating_mul(CDFH_MIN_SIZE as u64) > cd_size {
            return Err(Error::malformed("central directory entry count is inconsistent"));
        }

        let cd_len = self.checked_len(cd_offset, cd_size)?;
        let mut cd_data = vec![0u8; cd_len];
        self.read_exact_at(cd_offset, &mut cd_data).await?;

        let mut entries = Vec::with_capacity(total_entries as usize);
        let mut cursor = Cursor::new(cd_data.as_slice());

        for _ in 0..total_entries {
            let entry = parse_cdfh(&mut cursor).map_err(|e| match e {
                Error::Io(_) => Error::malformed("truncated central directory"),
                other => other,
            })?;
            entries.push(entry);
        }

        Ok(entries)
    }

    /// Get the actual data offset for a file entry.
    ///
    /// The Local File Header's name and extra field lengths may differ from
    /// the Central Directory's, so the header itself has to be read.
    pub async fn get_data_offset(&self, entry: &ZipFileEntry) -> Result<u64> {
        let mut lfh_buf = vec![0u8; LFH_SIZE];
        self.read_exact_at(entry.lfh_offset, &mut lfh_buf).await?;

        if &lfh_buf[0..4] != LFH_SIGNATURE {
            return Err(Error::malformed(format!(
                "invalid local file header for {}",
                entry.file_name
            )));
        }

        let file_name_length = u16::from_le_bytes([lfh_buf[26], lfh_buf[27]]) as u64;
        let extra_field_length = u16::from_le_bytes([lfh_buf[28], lfh_buf[29]]) as u64;

        Ok(entry.lfh_offset + LFH_SIZE as u64 + file_name_length + extra_field_length)
    }

    /// Read an entry's raw (still compressed) bytes.
    pub async fn read_entry_data(&self, entry: &ZipFileEntry) -> Result<Vec<u8>> {
        let data_offset = self.get_data_offset(entry).await?;
        let len = self.checked_len(data_offset, entry.compressed_size)?;

        let mut buf = vec![0u8; len];
        self.read_exact_at(data_offset, &mut buf).await?;
        Ok(buf)
    }
}

/// Parse a Central Directory File Header from a cursor.
fn parse_cdfh(cursor: &mut Cursor<&[u8]>) -> Result<ZipFileEntry> {
    let mut sig = [0u8; 4];
    cursor.read_exact(&mut sig)?;
    if sig != CDFH_SIGNATURE {
        return Err(Error::malformed("invalid central directory file header"));
    }

    let _version_made_by = cursor.read_u16::<LittleEndian>()?;
    let _version_needed = cursor.read_u16::<LittleEndian>()?;
    let flags = cursor.read_u16::<LittleEndian>()?;
    let compression_method = cursor.read_u16::<LittleEndian>()?;
    let last_mod_time = cursor.read_u16::<LittleEndian>()?;
    let last_mod_date = cursor.read_u16::<LittleEndian>()?;
    let crc32 = cursor.read_u32::<LittleEndian>()?;
    let mut compressed_size = cursor.read_u32::<LittleEndian>()? as u64;
    let mut uncompressed_size = cursor.read_u32::<LittleEndian>()? as u64;
    let file_name_length = cursor.read_u16::<LittleEndian>()?;
    let extra_field_length = cursor.read_u16::<LittleEndian>()?;
    let file_comment_length = cursor.read_u16::<LittleEndian>()?;
    let _disk_number_start = cursor.read_u16::<LittleEndian>()?;
    let _internal_attrs = cursor.read_u16::<LittleEndian>()?;
    let _external_attrs = cursor.read_u32::<LittleEndian>()?;
    let mut lfh_offset = cursor.read_u32::<LittleEndian>()? as u64;

    let mut file_name_bytes = vec![0u8; file_name_length as usize];
    cursor.read_exact(&mut file_name_bytes)?;
    let file_name = if flags & FLAG_UTF8 != 0 {
        String::from_utf8(file_name_bytes)
            .map_err(|_| Error::malformed("entry name flagged UTF-8 is not valid UTF-8"))?
    } else {
        cp437::decode(&file_name_bytes)
    };

    let is_directory = file_name.ends_with('/');

    // ZIP64 extended information lives in extra field 0x0001
    let extra_field_end = cursor.position() + extra_field_length as u64;

    while cursor.position() + 4 <= extra_field_end {
        let header_id = cursor.read_u16::<LittleEndian>()?;
        let field_size = cursor.read_u16::<LittleEndian>()?;
        let field_end = cursor.position() + field_size as u64;

        if header_id == 0x0001 {
            // Only saturated header fields are present, in this order
            if uncompressed_size == 0xFFFFFFFF && cursor.position() + 8 <= field_end {
                uncompressed_size = cursor.read_u64::<LittleEndian>()?;
            }
            if compressed_size == 0xFFFFFFFF && cursor.position() + 8 <= field_end {
                compressed_size = cursor.read_u64::<LittleEndian>()?;
            }
            if lfh_offset == 0xFFFFFFFF && cursor.position() + 8 <= field_end {
                lfh_offset = cursor.read_u64::<LittleEndian>()?;
            }
        }
        cursor.set_position(field_end);
    }

    cursor.set_position(extra_field_end + file_comment_length as u64);

    Ok(ZipFileEntry {
        file_name,
        flags,
        compression_method: CompressionMethod::from_u16(compression_method),
        compressed_size,
        uncompressed_size,
        crc32,
        lfh_offset,
        last_mod_time,
        last_mod_date,
        is_directory,
    })
}
