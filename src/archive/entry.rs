//! Encoding of a single stored ZIP entry.
//!
//! One call produces both records the format needs for an entry: the
//! local file header (followed by name and payload) and the matching
//! central directory header. CRC, sizes, and name are written once into
//! each so the two copies cannot disagree.

use serde::{Deserialize, Serialize};

use crate::crc::crc32;
use crate::error::{Result, XlexportError};

use super::{
    CENTRAL_DIRECTORY_HEADER_SIGNATURE, CENTRAL_HEADER_LEN, FLAG_UTF8_NAME,
    LOCAL_FILE_HEADER_SIGNATURE, LOCAL_HEADER_LEN, VERSION_MADE_BY, VERSION_NEEDED,
};

/// Compression method field of a ZIP record.
///
/// Only `Stored` exists: compressed and uncompressed sizes are written
/// from the same value. A deflating method would have to carry its own
/// compressed size through both records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionMethod {
    #[default]
    Stored,
}

impl CompressionMethod {
    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            CompressionMethod::Stored => 0,
        }
    }
}

/// Modification timestamp in MS-DOS packed form.
///
/// Spreadsheet readers ignore it; a fixed value keeps exports
/// byte-for-byte reproducible. Out-of-range fields are clamped to what
/// the packed format can hold (years 1980..=2107, 2-second resolution).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DosDateTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl Default for DosDateTime {
    fn default() -> Self {
        Self {
            year: 1980,
            month: 1,
            day: 1,
            hour: 0,
            minute: 0,
            second: 0,
        }
    }
}

impl DosDateTime {
    #[must_use]
    pub const fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Packed date: bits 15-9 year since 1980, 8-5 month, 4-0 day.
    #[must_use]
    pub fn dos_date(&self) -> u16 {
        let year = self.year.clamp(1980, 2107) - 1980;
        let month = u16::from(self.month.clamp(1, 12));
        let day = u16::from(self.day.clamp(1, 31));
        (year << 9) | (month << 5) | day
    }

    /// Packed time: bits 15-11 hour, 10-5 minute, 4-0 second / 2.
    #[must_use]
    pub fn dos_time(&self) -> u16 {
        let hour = u16::from(self.hour.min(23));
        let minute = u16::from(self.minute.min(59));
        let second = u16::from(self.second.min(59) / 2);
        (hour << 11) | (minute << 5) | second
    }
}

/// Both on-disk records for one entry.
#[derive(Debug, Clone)]
pub struct EncodedEntry {
    /// Local file header, name, then the stored payload.
    pub local: Vec<u8>,
    /// Central directory header and name.
    pub central: Vec<u8>,
    pub crc32: u32,
    /// Payload length; also the "compressed" size.
    pub size: u32,
}

/// Encode `payload` as a stored entry named `name` whose local header
/// starts `offset` bytes into the archive.
///
/// # Errors
/// Returns [`XlexportError::ArchiveLimit`] if the name is longer than
/// 65 535 bytes or the payload exceeds `u32::MAX` bytes.
pub fn encode_entry(
    name: &str,
    payload: &[u8],
    offset: u32,
    modified: DosDateTime,
) -> Result<EncodedEntry> {
    let name_bytes = name.as_bytes();
    let name_len = u16::try_from(name_bytes.len()).map_err(|_| {
        XlexportError::ArchiveLimit(format!("entry name is {} bytes", name_bytes.len()))
    })?;
    let size = u32::try_from(payload.len()).map_err(|_| {
        XlexportError::ArchiveLimit(format!("entry {name} is {} bytes", payload.len()))
    })?;
    let crc = crc32(payload);
    let flags = if name.is_ascii() { 0 } else { FLAG_UTF8_NAME };
    let method = CompressionMethod::Stored.code();

    let mut local = Vec::with_capacity(LOCAL_HEADER_LEN + name_bytes.len() + payload.len());
    put_u32(&mut local, LOCAL_FILE_HEADER_SIGNATURE);
    put_u16(&mut local, VERSION_NEEDED);
    put_u16(&mut local, flags);
    put_u16(&mut local, method);
    put_u16(&mut local, modified.dos_time());
    put_u16(&mut local, modified.dos_date());
    put_u32(&mut local, crc);
    put_u32(&mut local, size); // compressed
    put_u32(&mut local, size); // uncompressed
    put_u16(&mut local, name_len);
    put_u16(&mut local, 0); // extra field length
    local.extend_from_slice(name_bytes);
    local.extend_from_slice(payload);

    let mut central = Vec::with_capacity(CENTRAL_HEADER_LEN + name_bytes.len());
    put_u32(&mut central, CENTRAL_DIRECTORY_HEADER_SIGNATURE);
    put_u16(&mut central, VERSION_MADE_BY);
    put_u16(&mut central, VERSION_NEEDED);
    put_u16(&mut central, flags);
    put_u16(&mut central, method);
    put_u16(&mut central, modified.dos_time());
    put_u16(&mut central, modified.dos_date());
    put_u32(&mut central, crc);
    put_u32(&mut central, size);
    put_u32(&mut central, size);
    put_u16(&mut central, name_len);
    put_u16(&mut central, 0); // extra field length
    put_u16(&mut central, 0); // comment length
    put_u16(&mut central, 0); // disk number start
    put_u16(&mut central, 0); // internal attributes
    put_u32(&mut central, 0); // external attributes
    put_u32(&mut central, offset);
    central.extend_from_slice(name_bytes);

    Ok(EncodedEntry {
        local,
        central,
        crc32: crc,
        size,
    })
}

#[inline]
pub(crate) fn put_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_le_bytes());
}

#[inline]
pub(crate) fn put_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}
