//! Write-only ZIP container.
//!
//! Every entry is stored uncompressed. The builder writes each local
//! record at the running offset, then the central directory, then the
//! end-of-central-directory record. Nothing here ever reads an archive.

pub(crate) mod builder;
pub(crate) mod entry;

pub use builder::{build_archive, ArchiveBuilder, EntryRecord};
pub use entry::{encode_entry, CompressionMethod, DosDateTime, EncodedEntry};

/// Signature of a local file header.
pub const LOCAL_FILE_HEADER_SIGNATURE: u32 = 0x0403_4b50;

/// Signature of a central directory file header.
pub const CENTRAL_DIRECTORY_HEADER_SIGNATURE: u32 = 0x0201_4b50;

/// Signature of the end-of-central-directory record.
pub const END_OF_CENTRAL_DIRECTORY_SIGNATURE: u32 = 0x0605_4b50;

/// Fixed length of a local file header, name excluded.
pub const LOCAL_HEADER_LEN: usize = 30;

/// Fixed length of a central directory header, name excluded.
pub const CENTRAL_HEADER_LEN: usize = 46;

/// Length of the end-of-central-directory record (no comment).
pub const END_OF_CENTRAL_DIRECTORY_LEN: usize = 22;

/// "Version needed to extract": 2.0.
pub(crate) const VERSION_NEEDED: u16 = 20;

/// "Version made by": MS-DOS host, APPNOTE version 2.0.
pub(crate) const VERSION_MADE_BY: u16 = 20;

/// General-purpose flag bit 11: file name is UTF-8.
pub(crate) const FLAG_UTF8_NAME: u16 = 1 << 11;
