//! Common test utilities: a conformant reader over produced archives and
//! a worksheet read-back through a real XML parser.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic,
    clippy::cast_possible_truncation
)]

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use xlexport::{Column, Row};

// ============================================================================
// Sample data
// ============================================================================

/// `Name` (width 10) and long-text `Notes` (width 20).
pub fn sample_columns() -> Vec<Column> {
    vec![
        Column::new("Name", "name", 10),
        Column::new("Notes", "notes", 20).wrapped(),
    ]
}

/// Two rows; the second has an empty note.
pub fn sample_rows() -> Vec<Row> {
    vec![
        Row::from([("name", "A"), ("notes", "line1\nline2")]),
        Row::from([("name", "B"), ("notes", "")]),
    ]
}

// ============================================================================
// ZIP helpers
// ============================================================================

pub fn open_zip(bytes: &[u8]) -> zip::ZipArchive<Cursor<&[u8]>> {
    zip::ZipArchive::new(Cursor::new(bytes)).expect("archive should open")
}

/// Part names in archive order.
pub fn part_names(bytes: &[u8]) -> Vec<String> {
    let mut archive = open_zip(bytes);
    (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect()
}

/// Read one part as UTF-8 text (the reader verifies its CRC on the way).
pub fn read_part(bytes: &[u8], name: &str) -> String {
    let mut archive = open_zip(bytes);
    let mut file = archive
        .by_name(name)
        .unwrap_or_else(|_| panic!("missing part {name}"));
    let mut text = String::new();
    file.read_to_string(&mut text).unwrap();
    text
}

pub fn u16_at(buf: &[u8], pos: usize) -> u16 {
    u16::from_le_bytes([buf[pos], buf[pos + 1]])
}

pub fn u32_at(buf: &[u8], pos: usize) -> u32 {
    u32::from_le_bytes([buf[pos], buf[pos + 1], buf[pos + 2], buf[pos + 3]])
}

/// One central directory record, as found by walking from the end record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CentralEntry {
    pub name: String,
    pub crc32: u32,
    pub compressed_size: u32,
    pub size: u32,
    pub offset: u32,
}

/// Walk end record → central directory, the way a reader locates entries.
pub fn central_directory(bytes: &[u8]) -> Vec<CentralEntry> {
    let eocd = bytes.len() - 22;
    assert_eq!(u32_at(bytes, eocd), 0x0605_4b50, "end record signature");
    let count_disk = u16_at(bytes, eocd + 8);
    let count = u16_at(bytes, eocd + 10);
    assert_eq!(count_disk, count);
    let cd_size = u32_at(bytes, eocd + 12) as usize;
    let cd_offset = u32_at(bytes, eocd + 16) as usize;
    assert_eq!(cd_offset + cd_size, eocd, "central directory ends at end record");

    let mut entries = Vec::new();
    let mut pos = cd_offset;
    for _ in 0..count {
        assert_eq!(u32_at(bytes, pos), 0x0201_4b50, "central header signature");
        let name_len = u16_at(bytes, pos + 28) as usize;
        let extra_len = u16_at(bytes, pos + 30) as usize;
        let comment_len = u16_at(bytes, pos + 32) as usize;
        let name = String::from_utf8(bytes[pos + 46..pos + 46 + name_len].to_vec()).unwrap();
        entries.push(CentralEntry {
            name,
            crc32: u32_at(bytes, pos + 16),
            compressed_size: u32_at(bytes, pos + 20),
            size: u32_at(bytes, pos + 24),
            offset: u32_at(bytes, pos + 42),
        });
        pos += 46 + name_len + extra_len + comment_len;
    }
    assert_eq!(pos, eocd);
    entries
}

// ============================================================================
// Worksheet read-back
// ============================================================================

/// A cell as read back from worksheet XML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetCell {
    pub reference: String,
    pub style: Option<u32>,
    pub cell_type: Option<String>,
    pub text: String,
}

/// Parse `<sheetData>` into rows of cells, unescaping inline text.
pub fn parse_sheet_cells(xml: &str) -> Vec<Vec<SheetCell>> {
    let mut reader = Reader::from_str(xml);
    let mut rows: Vec<Vec<SheetCell>> = Vec::new();
    let mut current: Option<SheetCell> = None;
    let mut in_text = false;

    loop {
        match reader.read_event().expect("worksheet should be well-formed") {
            Event::Start(e) => match e.name().as_ref() {
                b"row" => rows.push(Vec::new()),
                b"c" => {
                    let mut cell = SheetCell {
                        reference: String::new(),
                        style: None,
                        cell_type: None,
                        text: String::new(),
                    };
                    for attr in e.attributes().flatten() {
                        let value = attr.unescape_value().unwrap().into_owned();
                        match attr.key.as_ref() {
                            b"r" => cell.reference = value,
                            b"s" => cell.style = value.parse().ok(),
                            b"t" => cell.cell_type = Some(value),
                            _ => {}
                        }
                    }
                    current = Some(cell);
                }
                b"t" => in_text = true,
                _ => {}
            },
            Event::Text(t) if in_text => {
                if let Some(cell) = current.as_mut() {
                    cell.text.push_str(&t.unescape().unwrap());
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"t" => in_text = false,
                b"c" => {
                    if let (Some(cell), Some(row)) = (current.take(), rows.last_mut()) {
                        row.push(cell);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }
    rows
}

/// Value of attribute `attr` on the first `<tag ...>` in `xml`.
pub fn first_attr(xml: &str, tag: &str, attr: &str) -> Option<String> {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event().ok()? {
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == tag.as_bytes() => {
                return e
                    .attributes()
                    .flatten()
                    .find(|a| a.key.as_ref() == attr.as_bytes())
                    .map(|a| a.unescape_value().unwrap().into_owned());
            }
            Event::Eof => return None,
            _ => {}
        }
    }
}
