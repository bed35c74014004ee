use serde::{Deserialize, Serialize};

use crate::archive::DosDateTime;
use crate::error::{Result, XlexportError};

use super::{Column, Row};

/// Characters Excel refuses in sheet names.
const SHEET_NAME_FORBIDDEN: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// Font sizes Excel accepts, in points.
pub const FONT_SIZE_RANGE: std::ops::RangeInclusive<f64> = 1.0..=409.0;

/// Longest sheet name Excel accepts.
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Export options.
///
/// Every field has a default, so `{}` is a valid JSON config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportConfig {
    /// Name of the single worksheet
    pub sheet_name: String,
    /// Base file name of delivered artifacts (`<stem>.xlsx`, `<stem>.csv`)
    pub file_stem: String,
    /// Header fill color, RGB or ARGB hex
    pub header_fill: String,
    /// Header font color, RGB or ARGB hex
    pub header_font_color: String,
    pub font_name: String,
    /// Font size in points
    pub font_size: f64,
    /// Freeze the pane below the header row
    pub freeze_header: bool,
    /// Put an auto-filter over the header and data
    pub auto_filter: bool,
    /// Prefix the delimited text with a UTF-8 byte order mark
    pub csv_bom: bool,
    pub csv_line_ending: String,
    /// Timestamp written into every ZIP entry
    pub modified: DosDateTime,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            sheet_name: "Sheet1".to_string(),
            file_stem: "export".to_string(),
            header_fill: "FF4472C4".to_string(),
            header_font_color: "FFFFFFFF".to_string(),
            font_name: "Calibri".to_string(),
            font_size: 11.0,
            freeze_header: true,
            auto_filter: true,
            csv_bom: false,
            csv_line_ending: "\n".to_string(),
            modified: DosDateTime::default(),
        }
    }
}

impl ExportConfig {
    /// Check the options spreadsheet readers are strict about.
    ///
    /// # Errors
    /// [`XlexportError::InvalidSheetName`], [`XlexportError::InvalidColor`],
    /// [`XlexportError::InvalidFontSize`], or [`XlexportError::InvalidFileStem`].
    pub fn validate(&self) -> Result<()> {
        validate_sheet_name(&self.sheet_name)?;
        normalize_argb(&self.header_fill)?;
        normalize_argb(&self.header_font_color)?;
        if !FONT_SIZE_RANGE.contains(&self.font_size) {
            return Err(XlexportError::InvalidFontSize(self.font_size));
        }
        validate_file_stem(&self.file_stem)?;
        Ok(())
    }
}

/// Reject stems that are not a bare file name.
///
/// # Errors
/// [`XlexportError::InvalidFileStem`] for empty stems, `.`/`..`, path
/// separators, and control characters.
pub fn validate_file_stem(stem: &str) -> Result<()> {
    let bad = stem.is_empty()
        || stem == "."
        || stem == ".."
        || stem.chars().any(|c| c == '/' || c == '\\' || c.is_control());
    if bad {
        return Err(XlexportError::InvalidFileStem(stem.to_string()));
    }
    Ok(())
}

/// Reject sheet names Excel would refuse to open.
///
/// # Errors
/// [`XlexportError::InvalidSheetName`] for empty or over-long names, names
/// with forbidden or control characters, and names quoted with apostrophes.
pub fn validate_sheet_name(name: &str) -> Result<()> {
    let len = name.chars().count();
    if len == 0 || len > MAX_SHEET_NAME_LEN {
        return Err(XlexportError::InvalidSheetName(format!(
            "{name:?} must be 1 to {MAX_SHEET_NAME_LEN} characters"
        )));
    }
    if let Some(c) = name
        .chars()
        .find(|c| SHEET_NAME_FORBIDDEN.contains(c) || c.is_control())
    {
        return Err(XlexportError::InvalidSheetName(format!(
            "{name:?} contains {c:?}"
        )));
    }
    if name.starts_with('\'') || name.ends_with('\'') {
        return Err(XlexportError::InvalidSheetName(format!(
            "{name:?} starts or ends with an apostrophe"
        )));
    }
    Ok(())
}

/// Normalize `RRGGBB` / `AARRGGBB` (optionally `#`-prefixed) to uppercase ARGB.
///
/// # Errors
/// [`XlexportError::InvalidColor`] for anything else.
pub fn normalize_argb(color: &str) -> Result<String> {
    let hex = color.trim().trim_start_matches('#');
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(XlexportError::InvalidColor(color.to_string()));
    }
    match hex.len() {
        6 => Ok(format!("FF{}", hex.to_ascii_uppercase())),
        8 => Ok(hex.to_ascii_uppercase()),
        _ => Err(XlexportError::InvalidColor(color.to_string())),
    }
}

/// A complete export request, as accepted by the CLI and the WASM bindings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub columns: Vec<Column>,
    #[serde(default)]
    pub rows: Vec<Row>,
    #[serde(default)]
    pub config: ExportConfig,
}

impl ExportRequest {
    /// Parse a request from JSON text.
    ///
    /// # Errors
    /// [`XlexportError::Json`] if the document does not match the schema.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a request from JSON bytes.
    ///
    /// # Errors
    /// [`XlexportError::Json`] if the document does not match the schema.
    pub fn from_json_slice(json: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(json)?)
    }
}
