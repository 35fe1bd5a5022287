//! ZIP serializer.
//!
//! Lays out every entry as local header + data, then the central
//! directory and the EOCD record. Output depends only on the entries
//! handed in, so serializing the same archive twice gives identical bytes.

use std::io::Write;

use crate::error::{Error, Result};

use super::archive::{MAX_ENTRIES, StoredEntry};
use super::structures::EndOfCentralDirectory;

/// Serialize `entries` in the given order into a complete ZIP file.
pub fn write_archive<'a, I>(entries: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = &'a StoredEntry>,
{
    let mut out = Vec::new();
    let mut headers = Vec::new();

    for stored in entries {
        let mut header = stored.header.clone();
        header.lfh_offset = out.len() as u64;
        header.write_local_header(&mut out)?;
        out.write_all(&stored.data)?;
        headers.push(header);
    }

    let cd_offset = out.len();
    for header in &headers {
        header.write_central_header(&mut out)?;
    }
    let cd_size = out.len() - cd_offset;

    let total_entries = u16::try_from(headers.len())
        .ok()
        .filter(|&n| usize::from(n) <= MAX_ENTRIES)
        .ok_or_else(|| Error::InvalidArgument("too many entries without ZIP64".into()))?;
    let too_large = || Error::InvalidArgument("archive exceeds 4 GiB".into());
    let cd_size = u32::try_from(cd_size).map_err(|_| too_large())?;
    let cd_offset = u32::try_from(cd_offset).map_err(|_| too_large())?;

    EndOfCentralDirectory::new(total_entries, cd_size, cd_offset).write_to(&mut out)?;

    tracing::debug!(
        entries = headers.len(),
        bytes = out.len(),
        "serialized archive"
    );
    Ok(out)
}
