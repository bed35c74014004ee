//! Generates `xl/worksheets/sheet1.xml` from columns and rows.
//!
//! Every cell is an inline string (`t="inlineStr"`), so no shared string
//! table is needed. Row 1 holds the headers; input row `i` becomes sheet
//! row `i + 2`. Cells are written for every column of every row, so a
//! value missing from a row is an empty inline string rather than a gap.

use crate::cell_ref::{cell_ref, col_to_letter, range_ref};
use crate::error::{Result, XlexportError};
use crate::namespaces::{NS_OFFICE_RELATIONSHIPS, NS_SPREADSHEET};
use crate::types::{Column, ExportConfig, Row};
use crate::xml_helpers::{needs_space_preserve, push_escaped, XML_DECLARATION};

use super::styles_writer::{STYLE_HEADER, STYLE_WRAP};

/// Rows per worksheet in Excel 2007+.
pub const MAX_ROWS: usize = 1_048_576;

/// Columns per worksheet in Excel 2007+.
pub const MAX_COLS: usize = 16_384;

/// 0-indexed (last row, last column) of the header + data rectangle.
///
/// # Errors
/// [`XlexportError::NoColumns`] for an empty column list,
/// [`XlexportError::SheetLimit`] past Excel's grid.
pub(crate) fn used_extent(column_count: usize, row_count: usize) -> Result<(u32, u32)> {
    if column_count == 0 {
        return Err(XlexportError::NoColumns);
    }
    if column_count > MAX_COLS {
        return Err(XlexportError::SheetLimit(format!(
            "{column_count} columns (max {MAX_COLS})"
        )));
    }
    if row_count >= MAX_ROWS {
        return Err(XlexportError::SheetLimit(format!(
            "{row_count} data rows (max {})",
            MAX_ROWS - 1
        )));
    }
    let last_row = u32::try_from(row_count)
        .map_err(|_| XlexportError::SheetLimit(format!("{row_count} data rows")))?;
    let last_col = u32::try_from(column_count - 1)
        .map_err(|_| XlexportError::SheetLimit(format!("{column_count} columns")))?;
    Ok((last_row, last_col))
}

/// Write the complete worksheet XML.
///
/// # Errors
/// See [`used_extent`].
pub(crate) fn write_sheet_xml(
    columns: &[Column],
    rows: &[Row],
    config: &ExportConfig,
) -> Result<String> {
    let (last_row, last_col) = used_extent(columns.len(), rows.len())?;
    let full_range = range_ref(0, 0, last_row, last_col);

    let mut out = String::with_capacity(1024 + rows.len() * columns.len() * 48);
    out.push_str(XML_DECLARATION);
    out.push('\n');
    out.push_str(&format!(
        "<worksheet xmlns=\"{NS_SPREADSHEET}\" xmlns:r=\"{NS_OFFICE_RELATIONSHIPS}\">\n"
    ));

    out.push_str(&format!("<dimension ref=\"{full_range}\"/>\n"));

    // <sheetViews>: frozen header
    out.push_str("<sheetViews><sheetView tabSelected=\"1\" workbookViewId=\"0\">");
    if config.freeze_header {
        out.push_str(
            "<pane ySplit=\"1\" topLeftCell=\"A2\" activePane=\"bottomLeft\" state=\"frozen\"/>",
        );
        out.push_str("<selection pane=\"bottomLeft\" activeCell=\"A2\" sqref=\"A2\"/>");
    }
    out.push_str("</sheetView></sheetViews>\n");

    out.push_str("<sheetFormatPr defaultRowHeight=\"15\"/>\n");

    // <cols>
    out.push_str("<cols>");
    for (idx, column) in columns.iter().enumerate() {
        let col1 = idx + 1; // XLSX is 1-based
        out.push_str(&format!(
            "<col min=\"{col1}\" max=\"{col1}\" width=\"{}\" customWidth=\"1\"/>",
            column.width
        ));
    }
    out.push_str("</cols>\n");

    // <sheetData>
    out.push_str("<sheetData>\n");
    write_header_row(&mut out, columns);
    for (row_idx, row) in (1_u32..).zip(rows) {
        write_data_row(&mut out, row_idx, columns, row);
    }
    out.push_str("</sheetData>\n");

    if config.auto_filter {
        out.push_str(&format!("<autoFilter ref=\"{full_range}\"/>\n"));
    }

    out.push_str(
        "<pageMargins left=\"0.7\" right=\"0.7\" top=\"0.75\" bottom=\"0.75\" header=\"0.3\" footer=\"0.3\"/>\n",
    );
    out.push_str("</worksheet>");
    Ok(out)
}

fn write_header_row(out: &mut String, columns: &[Column]) {
    out.push_str(&format!("<row r=\"1\" spans=\"1:{}\">", columns.len()));
    for (col, column) in (0_u32..).zip(columns) {
        write_inline_cell(out, 0, col, Some(STYLE_HEADER), &column.header);
    }
    out.push_str("</row>\n");
}

fn write_data_row(out: &mut String, row: u32, columns: &[Column], values: &Row) {
    out.push_str(&format!(
        "<row r=\"{}\" spans=\"1:{}\">",
        u64::from(row) + 1,
        columns.len()
    ));
    for (col, column) in (0_u32..).zip(columns) {
        let style = column.wrap.then_some(STYLE_WRAP);
        write_inline_cell(out, row, col, style, values.get(&column.key));
    }
    out.push_str("</row>\n");
}

/// Write a single `<c t="inlineStr">` element.
fn write_inline_cell(out: &mut String, row: u32, col: u32, style: Option<u32>, text: &str) {
    out.push_str(&format!("<c r=\"{}\"", cell_ref(row, col)));
    if let Some(si) = style {
        out.push_str(&format!(" s=\"{si}\""));
    }
    out.push_str(" t=\"inlineStr\"><is>");
    if needs_space_preserve(text) {
        out.push_str("<t xml:space=\"preserve\">");
    } else {
        out.push_str("<t>");
    }
    push_escaped(out, text);
    out.push_str("</t></is></c>");
}

/// Column letters of the long-text columns, for diagnostics.
pub(crate) fn wrapped_column_letters(columns: &[Column]) -> Vec<String> {
    (0_u32..)
        .zip(columns)
        .filter(|(_, c)| c.wrap)
        .map(|(idx, _)| col_to_letter(idx))
        .collect()
}
