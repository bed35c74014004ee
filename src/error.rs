//! Structured error types for xlexport.
//!
//! Serialization is a pure transform, so the taxonomy is narrow: rejected
//! input, ZIP32 field limits, and the I/O of the delivery sinks.

/// All errors that can occur while building or delivering an export.
#[derive(Debug, thiserror::Error)]
pub enum XlexportError {
    /// An export needs at least one column.
    #[error("Export has no columns")]
    NoColumns,

    /// Sheet name that spreadsheet readers would reject.
    #[error("Invalid sheet name: {0}")]
    InvalidSheetName(String),

    /// Color that is not 6 or 8 hex digits.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Font size outside what spreadsheet readers accept.
    #[error("Invalid font size: {0}")]
    InvalidFontSize(f64),

    /// File stem that is empty or would leave the output directory.
    #[error("Invalid file stem: {0}")]
    InvalidFileStem(String),

    /// Artifact name that is not a single plain file name.
    #[error("Invalid artifact name: {0}")]
    InvalidArtifactName(String),

    /// Two archive parts share a name.
    #[error("Duplicate archive part: {0}")]
    DuplicatePart(String),

    /// More rows or columns than a worksheet can hold.
    #[error("Sheet limit exceeded: {0}")]
    SheetLimit(String),

    /// A value does not fit the 16/32-bit fields of a ZIP record.
    #[error("ZIP limit exceeded: {0}")]
    ArchiveLimit(String),

    /// Malformed JSON request.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error from a delivery sink.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, XlexportError>;

impl From<String> for XlexportError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for XlexportError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<XlexportError> for wasm_bindgen::JsValue {
    fn from(e: XlexportError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
