//! XLSX + CSV export pipeline.
//!
//! Columns and rows are rendered into the six XML parts of a minimal
//! SpreadsheetML package, which are then stored, in [`PART_ORDER`], into a
//! hand-built ZIP container. A quoted CSV rendering of the same table is
//! produced alongside as a fallback.

pub(crate) mod package;
pub(crate) mod sheet_writer;
pub(crate) mod styles_writer;

use log::debug;

use crate::archive::build_archive;
use crate::cell_ref::abs_range_ref;
use crate::csv::{write_delimited, DelimitedOptions, Delimiter};
use crate::error::{Result, XlexportError};
use crate::types::{ArchivePart, Column, ExportConfig, ExportRequest, Row};

pub use sheet_writer::{MAX_COLS, MAX_ROWS};
pub use styles_writer::{STYLE_DEFAULT, STYLE_HEADER, STYLE_WRAP};

pub const PART_CONTENT_TYPES: &str = "[Content_Types].xml";
pub const PART_ROOT_RELS: &str = "_rels/.rels";
pub const PART_WORKBOOK: &str = "xl/workbook.xml";
pub const PART_WORKBOOK_RELS: &str = "xl/_rels/workbook.xml.rels";
pub const PART_STYLES: &str = "xl/styles.xml";
pub const PART_WORKSHEET: &str = "xl/worksheets/sheet1.xml";

/// Order in which parts are stored in the archive.
pub const PART_ORDER: [&str; 6] = [
    PART_CONTENT_TYPES,
    PART_ROOT_RELS,
    PART_WORKBOOK,
    PART_WORKBOOK_RELS,
    PART_STYLES,
    PART_WORKSHEET,
];

/// Both artifacts of one export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    /// The `.xlsx` package
    pub xlsx: Vec<u8>,
    /// The quoted CSV fallback, UTF-8
    pub csv: Vec<u8>,
}

/// Render the package parts, in [`PART_ORDER`].
///
/// # Errors
/// [`XlexportError::NoColumns`], [`XlexportError::SheetLimit`], or an
/// invalid sheet name or color in `config`.
pub fn workbook_parts(
    columns: &[Column],
    rows: &[Row],
    config: &ExportConfig,
) -> Result<Vec<ArchivePart>> {
    check_columns(columns)?;
    config.validate()?;

    let (last_row, last_col) = sheet_writer::used_extent(columns.len(), rows.len())?;
    let filter_range = config
        .auto_filter
        .then(|| abs_range_ref(0, 0, last_row, last_col));
    let with_wrap = columns.iter().any(|c| c.wrap);
    if with_wrap {
        debug!(
            "wrap style on columns {}",
            sheet_writer::wrapped_column_letters(columns).join(",")
        );
    }

    Ok(vec![
        ArchivePart::new(PART_CONTENT_TYPES, package::write_content_types_xml()),
        ArchivePart::new(PART_ROOT_RELS, package::write_root_rels_xml()),
        ArchivePart::new(
            PART_WORKBOOK,
            package::write_workbook_xml(&config.sheet_name, filter_range.as_deref()),
        ),
        ArchivePart::new(PART_WORKBOOK_RELS, package::write_workbook_rels_xml()),
        ArchivePart::new(
            PART_STYLES,
            styles_writer::write_styles_xml(config, with_wrap)?,
        ),
        ArchivePart::new(
            PART_WORKSHEET,
            sheet_writer::write_sheet_xml(columns, rows, config)?,
        ),
    ])
}

/// Build the `.xlsx` package bytes.
///
/// # Errors
/// See [`workbook_parts`]; ZIP32 overflow gives [`XlexportError::ArchiveLimit`].
pub fn export_xlsx(columns: &[Column], rows: &[Row], config: &ExportConfig) -> Result<Vec<u8>> {
    let parts = workbook_parts(columns, rows, config)?;
    build_archive(&parts, config.modified)
}

/// Build the quoted CSV fallback bytes.
///
/// # Errors
/// [`XlexportError::NoColumns`] for an empty column list.
pub fn export_csv(columns: &[Column], rows: &[Row], config: &ExportConfig) -> Result<Vec<u8>> {
    check_columns(columns)?;
    let options = DelimitedOptions {
        delimiter: Delimiter::Comma,
        line_ending: config.csv_line_ending.clone(),
        bom: config.csv_bom,
    };
    Ok(write_delimited(columns, rows, &options).into_bytes())
}

/// Build both artifacts.
///
/// # Errors
/// See [`export_xlsx`] and [`export_csv`].
pub fn export(columns: &[Column], rows: &[Row], config: &ExportConfig) -> Result<Export> {
    let xlsx = export_xlsx(columns, rows, config)?;
    let csv = export_csv(columns, rows, config)?;
    debug!(
        "exported {} rows x {} columns: xlsx {} bytes, csv {} bytes",
        rows.len(),
        columns.len(),
        xlsx.len(),
        csv.len()
    );
    Ok(Export { xlsx, csv })
}

impl ExportRequest {
    /// Build both artifacts for this request.
    ///
    /// # Errors
    /// See [`export`].
    pub fn export(&self) -> Result<Export> {
        export(&self.columns, &self.rows, &self.config)
    }
}

fn check_columns(columns: &[Column]) -> Result<()> {
    if columns.is_empty() {
        return Err(XlexportError::NoColumns);
    }
    Ok(())
}
