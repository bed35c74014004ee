//! Single-pass archive assembly.

use std::collections::HashSet;

use log::{debug, trace};

use crate::error::{Result, XlexportError};
use crate::types::ArchivePart;

use super::entry::{encode_entry, put_u16, put_u32, DosDateTime};
use super::{END_OF_CENTRAL_DIRECTORY_LEN, END_OF_CENTRAL_DIRECTORY_SIGNATURE};

/// Metadata recorded for each entry as it is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRecord {
    pub name: String,
    pub crc32: u32,
    pub size: u32,
    /// Offset of the entry's local header from the start of the archive.
    pub offset: u32,
}

/// Appends stored entries to an in-memory ZIP archive.
///
/// Local records go straight into the output buffer; central directory
/// records are held back and written by [`ArchiveBuilder::finish`] in the
/// same order. The offset of each entry is the buffer length at the
/// moment its local header is appended.
#[derive(Debug, Default)]
pub struct ArchiveBuilder {
    out: Vec<u8>,
    central: Vec<u8>,
    entries: Vec<EntryRecord>,
    names: HashSet<String>,
    modified: DosDateTime,
}

impl ArchiveBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `modified` as the timestamp of every entry added afterwards.
    #[must_use]
    pub fn with_modified(mut self, modified: DosDateTime) -> Self {
        self.modified = modified;
        self
    }

    /// Append one entry.
    ///
    /// # Errors
    /// [`XlexportError::DuplicatePart`] if `name` was already added;
    /// [`XlexportError::ArchiveLimit`] if the archive outgrows ZIP32 fields.
    pub fn add(&mut self, name: &str, payload: &[u8]) -> Result<()> {
        if self.names.contains(name) {
            return Err(XlexportError::DuplicatePart(name.to_string()));
        }
        if self.entries.len() >= usize::from(u16::MAX) {
            return Err(XlexportError::ArchiveLimit(format!(
                "more than {} entries",
                u16::MAX
            )));
        }

        let offset = self.offset()?;
        let encoded = encode_entry(name, payload, offset, self.modified)?;
        trace!(
            "zip entry {name}: crc={:08x} size={} offset={offset}",
            encoded.crc32,
            encoded.size
        );

        self.out.extend_from_slice(&encoded.local);
        self.central.extend_from_slice(&encoded.central);
        self.entries.push(EntryRecord {
            name: name.to_string(),
            crc32: encoded.crc32,
            size: encoded.size,
            offset,
        });
        self.names.insert(name.to_string());
        Ok(())
    }

    /// Running offset: where the next local header will start.
    ///
    /// # Errors
    /// [`XlexportError::ArchiveLimit`] once the archive passes 4 GiB.
    pub fn offset(&self) -> Result<u32> {
        to_u32(self.out.len(), "archive offset")
    }

    /// Entries written so far, in archive order.
    #[must_use]
    pub fn entries(&self) -> &[EntryRecord] {
        &self.entries
    }

    /// Append the central directory and end record and return the archive.
    ///
    /// # Errors
    /// [`XlexportError::ArchiveLimit`] if the directory offset or size
    /// does not fit its 32-bit field.
    pub fn finish(self) -> Result<Vec<u8>> {
        let Self {
            mut out,
            central,
            entries,
            ..
        } = self;

        let cd_offset = to_u32(out.len(), "central directory offset")?;
        let cd_size = to_u32(central.len(), "central directory size")?;
        let count = u16::try_from(entries.len())
            .map_err(|_| XlexportError::ArchiveLimit(format!("{} entries", entries.len())))?;

        out.reserve(central.len() + END_OF_CENTRAL_DIRECTORY_LEN);
        out.extend_from_slice(&central);

        put_u32(&mut out, END_OF_CENTRAL_DIRECTORY_SIGNATURE);
        put_u16(&mut out, 0); // this disk
        put_u16(&mut out, 0); // disk with central directory
        put_u16(&mut out, count); // entries on this disk
        put_u16(&mut out, count); // entries total
        put_u32(&mut out, cd_size);
        put_u32(&mut out, cd_offset);
        put_u16(&mut out, 0); // comment length

        debug!(
            "zip finished: {count} entries, central directory at {cd_offset} ({cd_size} bytes), {} bytes total",
            out.len()
        );
        Ok(out)
    }
}

/// Build an archive from `parts` in the given order.
///
/// An empty slice yields a valid empty archive (a bare end record).
///
/// # Errors
/// See [`ArchiveBuilder::add`] and [`ArchiveBuilder::finish`].
pub fn build_archive(parts: &[ArchivePart], modified: DosDateTime) -> Result<Vec<u8>> {
    let mut builder = ArchiveBuilder::new().with_modified(modified);
    for part in parts {
        builder.add(&part.name, part.content.as_bytes())?;
    }
    builder.finish()
}

fn to_u32(value: usize, what: &str) -> Result<u32> {
    u32::try_from(value).map_err(|_| XlexportError::ArchiveLimit(format!("{what} is {value}")))
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::cast_possible_truncation
)]
mod tests {
    use super::*;
    use crate::archive::{CENTRAL_HEADER_LEN, LOCAL_HEADER_LEN};

    fn u16_at(buf: &[u8], pos: usize) -> u16 {
        u16::from_le_bytes([buf[pos], buf[pos + 1]])
    }

    fn u32_at(buf: &[u8], pos: usize) -> u32 {
        u32::from_le_bytes([buf[pos], buf[pos + 1], buf[pos + 2], buf[pos + 3]])
    }

    #[test]
    fn test_empty_archive() {
        let bytes = ArchiveBuilder::new().finish().unwrap();
        assert_eq!(bytes.len(), END_OF_CENTRAL_DIRECTORY_LEN);
        assert_eq!(u32_at(&bytes, 0), END_OF_CENTRAL_DIRECTORY_SIGNATURE);
        assert_eq!(u16_at(&bytes, 8), 0);
        assert_eq!(u16_at(&bytes, 10), 0);
        assert_eq!(u32_at(&bytes, 12), 0);
        assert_eq!(u32_at(&bytes, 16), 0);
    }

    #[test]
    fn test_offsets_accumulate() {
        let mut builder = ArchiveBuilder::new();
        builder.add("one", b"1").unwrap();
        builder.add("two", b"22").unwrap();
        builder.add("three", b"").unwrap();

        let entries = builder.entries().to_vec();
        assert_eq!(entries[0].offset, 0);
        assert_eq!(entries[1].offset, (LOCAL_HEADER_LEN + 3 + 1) as u32);
        assert_eq!(entries[2].offset, entries[1].offset + (LOCAL_HEADER_LEN + 3 + 2) as u32);
        let next = builder.offset().unwrap();
        assert_eq!(next, entries[2].offset + (LOCAL_HEADER_LEN + 5) as u32);

        let bytes = builder.finish().unwrap();
        let eocd = bytes.len() - END_OF_CENTRAL_DIRECTORY_LEN;
        assert_eq!(u16_at(&bytes, eocd + 8), 3);
        assert_eq!(u16_at(&bytes, eocd + 10), 3);
        assert_eq!(u32_at(&bytes, eocd + 16), next);
        let cd_size = (3 * CENTRAL_HEADER_LEN + 3 + 3 + 5) as u32;
        assert_eq!(u32_at(&bytes, eocd + 12), cd_size);
        assert_eq!(eocd as u32, next + cd_size);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut builder = ArchiveBuilder::new();
        builder.add("a.xml", b"x").unwrap();
        let err = builder.add("a.xml", b"y").unwrap_err();
        assert!(matches!(err, XlexportError::DuplicatePart(name) if name == "a.xml"));
        assert_eq!(builder.entries().len(), 1);
    }

    #[test]
    fn test_build_archive_is_deterministic() {
        let parts = vec![
            ArchivePart::new("a.xml", "<a/>"),
            ArchivePart::new("b/c.xml", "<c/>"),
        ];
        let first = build_archive(&parts, DosDateTime::default()).unwrap();
        let second = build_archive(&parts, DosDateTime::default()).unwrap();
        assert_eq!(first, second);
    }
}
