use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Cursor, Write};

use crate::error::{Error, Result};

/// ZIP compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMethod {
    Stored,
    Deflate,
    Unknown(u16),
}

impl CompressionMethod {
    pub fn from_u16(value: u16) -> Self {
        match value {
            0 => CompressionMethod::Stored,
            8 => CompressionMethod::Deflate,
            _ => CompressionMethod::Unknown(value),
        }
    }

    pub fn as_u16(&self) -> u16 {
        match self {
            CompressionMethod::Stored => 0,
            CompressionMethod::Deflate => 8,
            CompressionMethod::Unknown(v) => *v,
        }
    }
}

/// End of Central Directory (EOCD) - 22 bytes minimum
pub struct EndOfCentralDirectory {
    pub disk_number: u16,
    pub disk_with_cd: u16,
    pub disk_entries: u16,
    pub total_entries: u16,
    pub cd_size: u32,
    pub cd_offset: u32,
    pub comment_len: u16,
}

impl EndOfCentralDirectory {
    pub const SIGNATURE: &'static [u8] = b"PK\x05\x06";
    pub const SIZE: usize = 22;

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < Self::SIZE || &data[0..4] != Self::SIGNATURE {
            return Err(Error::malformed("invalid end of central directory"));
        }

        let mut cursor = Cursor::new(&data[4..]);

        Ok(Self {
            disk_number: cursor.read_u16::<LittleEndian>()?,
            disk_with_cd: cursor.read_u16::<LittleEndian>()?,
            disk_entries: cursor.read_u16::<LittleEndian>()?,
            total_entries: cursor.read_u16::<LittleEndian>()?,
            cd_size: cursor.read_u32::<LittleEndian>()?,
            cd_offset: cursor.read_u32::<LittleEndian>()?,
            comment_len: cursor.read_u16::<LittleEndian>()?,
        })
    }

    /// Single-disk record for `total_entries` entries and no comment.
    pub fn new(total_entries: u16, cd_size: u32, cd_offset: u32) -> Self {
        Self {
            disk_number: 0,
            disk_with_cd: 0,
            disk_entries: total_entries,
            total_entries,
            cd_size,
            cd_offset,
            comment_len: 0,
        }
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<()> {
        out.write_all(Self::SIGNATURE)?;
        out.write_u16::<LittleEndian>(self.disk_number)?;
        out.write_u16::<LittleEndian>(self.disk_with_cd)?;
        out.write_u16::<LittleEndian>(self.disk_entries)?;
        out.write_u16::<LittleEndian>(self.total_entries)?;
        out.write_u32::<LittleEndian>(self.cd_size)?;
        out.write_u32::<LittleEndian>(self.cd_offset)?;
        out.write_u16::<LittleEndian>(self.comment_len)?;
        Ok(())
    }

    pub fn is_zip64(&self) -> bool {
        self.disk_entries == 0xFFFF
            || self.total_entries == 0xFFFF
            || self.cd_size == 0xFFFFFFFF
            || self.cd_offset == 0xFFFFFFFF
    }

    /// Archives spanning several disks are not supported.
    pub fn is_multi_disk(&self) -> bool {
        self.disk_number != 0 || self.disk_with_cd != 0
    }
}

/// ZIP64 End of Central Directory Locator - 20 bytes
pub struct Zip64EOCDLocator {
    pub disk_with_eocd64: u32,
    pub eocd64_offset: u64,
    pub total_disks: u32,
}

impl Zip64EOCDLocator {
    pub const SIGNATURE: &'static [u8] = b"PK\x06\x07";
    pub const SIZE: usize = 20;

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < Self::SIZE || &data[0..4] != Self::SIGNATURE {
            return Err(Error::malformed("invalid ZIP64 locator"));
        }

        let mut cursor = Cursor::new(&data[4..]);

        Ok(Self {
            disk_with_eocd64: cursor.read_u32::<LittleEndian>()?,
            eocd64_offset: cursor.read_u64::<LittleEndian>()?,
            total_disks: cursor.read_u32::<LittleEndian>()?,
        })
    }
}

/// ZIP64 End of Central Directory - 56 bytes minimum
pub struct Zip64EOCD {
    pub eocd64_size: u64,
    pub version_made_by: u16,
    pub version_needed: u16,
    pub disk_number: u32,
    pub disk_with_cd: u32,
    pub disk_entries: u64,
    pub total_entries: u64,
    pub cd_size: u64,
    pub cd_offset: u64,
}

impl Zip64EOCD {
    pub const SIGNATURE: &'static [u8] = b"PK\x06\x06";
    pub const MIN_SIZE: usize = 56;

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < Self::MIN_SIZE || &data[0..4] != Self::SIGNATURE {
            return Err(Error::malformed("invalid ZIP64 end of central directory"));
        }

        let mut cursor = Cursor::new(&data[4..]);

        Ok(Self {
            eocd64_size: cursor.read_u64::<LittleEndian>()?,
            version_made_by: cursor.read_u16::<LittleEndian>()?,
            version_needed: cursor.read_u16::<LittleEndian>()?,
            disk_number: cursor.read_u32::<LittleEndian>()?,
            disk_with_cd: cursor.read_u32::<LittleEndian>()?,
            disk_entries: cursor.read_u64::<LittleEndian>()?,
            total_entries: cursor.read_u64::<LittleEndian>()?,
            cd_size: cursor.read_u64::<LittleEndian>()?,
            cd_offset: cursor.read_u64::<LittleEndian>()?,
        })
    }
}

/// Central Directory File Header (CDFH) - 46 bytes minimum
pub const CDFH_SIGNATURE: &[u8] = b"PK\x01\x02";
pub const CDFH_MIN_SIZE: usize = 46;

/// Local File Header (LFH) - 30 bytes
pub const LFH_SIGNATURE: &[u8] = b"PK\x03\x04";
pub const LFH_SIZE: usize = 30;

/// "Version needed to extract" written for every entry (2.0: deflate, folders).
pub const VERSION_NEEDED: u16 = 20;

/// "Version made by": host MS-DOS (high byte 0), format version 2.0.
pub const VERSION_MADE_BY: u16 = 20;

/// General purpose flag bit 11: name is UTF-8.
pub const FLAG_UTF8: u16 = 1 << 11;

/// General purpose flag bit 0: entry is encrypted.
pub const FLAG_ENCRYPTED: u16 = 1;

/// General purpose flag bit 3: sizes follow the data in a descriptor.
pub const FLAG_DATA_DESCRIPTOR: u16 = 1 << 3;

/// MS-DOS directory attribute, stored in the low byte of external attributes.
const DOS_DIRECTORY: u32 = 0x10;

/// DOS timestamp for 1980-01-01 00:00:00, the earliest the format can express.
pub const DOS_EPOCH_TIME: u16 = 0;
pub const DOS_EPOCH_DATE: u16 = (1 << 5) | 1;

/// Parsed ZIP file entry information
#[derive(Debug, Clone)]
pub struct ZipFileEntry {
    pub file_name: String,
    pub flags: u16,
    pub compression_method: CompressionMethod,
    pub compressed_size: u64,
    pub uncompressed_size: u64,
    pub crc32: u32,
    pub lfh_offset: u64,
    pub last_mod_time: u16,
    pub last_mod_date: u16,
    pub is_directory: bool,
}

impl ZipFileEntry {
    pub fn is_encrypted(&self) -> bool {
        self.flags & FLAG_ENCRYPTED != 0
    }

    /// Write the local file header that precedes the entry's data.
    pub fn write_local_header<W: Write>(&self, out: &mut W) -> Result<()> {
        let (compressed_size, uncompressed_size) = self.sizes32()?;

        out.write_all(LFH_SIGNATURE)?;
        out.write_u16::<LittleEndian>(VERSION_NEEDED)?;
        out.write_u16::<LittleEndian>(self.written_flags())?;
        out.write_u16::<LittleEndian>(self.compression_method.as_u16())?;
        out.write_u16::<LittleEndian>(self.last_mod_time)?;
        out.write_u16::<LittleEndian>(self.last_mod_date)?;
        out.write_u32::<LittleEndian>(self.crc32)?;
        out.write_u32::<LittleEndian>(compressed_size)?;
        out.write_u32::<LittleEndian>(uncompressed_size)?;
        out.write_u16::<LittleEndian>(self.name_len()?)?;
        out.write_u16::<LittleEndian>(0)?; // extra field length
        out.write_all(self.file_name.as_bytes())?;
        Ok(())
    }

    /// Write the central directory record pointing at `self.lfh_offset`.
    pub fn write_central_header<W: Write>(&self, out: &mut W) -> Result<()> {
        let (compressed_size, uncompressed_size) = self.sizes32()?;
        let lfh_offset = u32::try_from(self.lfh_offset)
            .map_err(|_| Error::InvalidArgument("archive exceeds 4 GiB".into()))?;
        let external_attrs = if self.is_directory { DOS_DIRECTORY } else { 0 };

        out.write_all(CDFH_SIGNATURE)?;
        out.write_u16::<LittleEndian>(VERSION_MADE_BY)?;
        out.write_u16::<LittleEndian>(VERSION_NEEDED)?;
        out.write_u16::<LittleEndian>(self.written_flags())?;
        out.write_u16::<LittleEndian>(self.compression_method.as_u16())?;
        out.write_u16::<LittleEndian>(self.last_mod_time)?;
        out.write_u16::<LittleEndian>(self.last_mod_date)?;
        out.write_u32::<LittleEndian>(self.crc32)?;
        out.write_u32::<LittleEndian>(compressed_size)?;
        out.write_u32::<LittleEndian>(uncompressed_size)?;
        out.write_u16::<LittleEndian>(self.name_len()?)?;
        out.write_u16::<LittleEndian>(0)?; // extra field length
        out.write_u16::<LittleEndian>(0)?; // comment length
        out.write_u16::<LittleEndian>(0)?; // disk number start
        out.write_u16::<LittleEndian>(0)?; // internal attributes
        out.write_u32::<LittleEndian>(external_attrs)?;
        out.write_u32::<LittleEndian>(lfh_offset)?;
        out.write_all(self.file_name.as_bytes())?;
        Ok(())
    }

    /// Names are always written as UTF-8, and sizes always go in the
    /// headers rather than a trailing descriptor.
    fn written_flags(&self) -> u16 {
        (self.flags & !FLAG_DATA_DESCRIPTOR) | FLAG_UTF8
    }

    /// Fail if this entry cannot be written without ZIP64.
    pub fn check_writable(&self) -> Result<()> {
        self.sizes32()?;
        self.name_len()?;
        Ok(())
    }

    /// Bytes this entry takes up in the output: local header, name and
    /// data, plus its central directory record.
    pub fn written_len(&self) -> u64 {
        let name = self.file_name.len() as u64;
        (LFH_SIZE as u64 + name + self.compressed_size) + (CDFH_MIN_SIZE as u64 + name)
    }

    fn sizes32(&self) -> Result<(u32, u32)> {
        match (
            u32::try_from(self.compressed_size),
            u32::try_from(self.uncompressed_size),
        ) {
            (Ok(c), Ok(u)) if c != u32::MAX && u != u32::MAX => Ok((c, u)),
            _ => Err(Error::InvalidArgument(format!(
                "{} is too large to store without ZIP64",
                self.file_name
            ))),
        }
    }

    fn name_len(&self) -> Result<u16> {
        u16::try_from(self.file_name.len())
            .map_err(|_| Error::InvalidArgument(format!("entry name too long: {}", self.file_name)))
    }
}
