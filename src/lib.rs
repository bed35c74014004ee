//! xlexport - tabular rows to XLSX, without an XLSX library
//!
//! Builds a minimal SpreadsheetML package by hand:
//! - CRC-32 and a stored-only ZIP writer (local headers, central directory, end record)
//! - Content types, relationships, workbook, styles, and one worksheet of inline strings
//! - Bold accent header row, frozen below row 1, auto-filter over the data
//! - Optional wrap-text style for long-text columns
//! - Quoted CSV fallback of the same table
//!
//! # Usage (Rust)
//!
//! ```rust
//! use xlexport::{export, Column, ExportConfig, Row};
//!
//! let columns = vec![
//!     Column::new("Name", "name", 10),
//!     Column::new("Notes", "notes", 20).wrapped(),
//! ];
//! let rows = vec![Row::from([("name", "A"), ("notes", "line1\nline2")])];
//! let out = export(&columns, &rows, &ExportConfig::default()).unwrap();
//! assert!(out.xlsx.starts_with(b"PK\x03\x04"));
//! ```
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { export_xlsx } from 'xlexport';
//! await init();
//! const bytes = export_xlsx({ columns, rows, config: { sheetName: 'Tree' } });
//! ```

pub mod archive;
pub mod cell_ref;
#[cfg(feature = "cli")]
pub mod cli;
pub mod crc;
pub mod csv;
pub mod delivery;
pub mod error;
pub mod export;
pub mod namespaces;
pub mod types;
pub mod xml_helpers;

use wasm_bindgen::prelude::*;

pub use archive::{build_archive, ArchiveBuilder, DosDateTime, EntryRecord};
pub use crc::crc32;
pub use delivery::{deliver_export, Artifact, ArtifactSink, DataUrlSink, DirectorySink, MemorySink};
pub use error::{Result, XlexportError};
pub use export::{export, export_csv, export_xlsx, workbook_parts, Export};
pub use types::*;

fn request_from_js(request: JsValue) -> std::result::Result<ExportRequest, JsValue> {
    serde_wasm_bindgen::from_value(request)
        .map_err(|e| JsValue::from_str(&format!("Invalid export request: {e}")))
}

/// Build the `.xlsx` bytes for a `{ columns, rows, config }` request.
///
/// # Errors
/// Returns an error if the request is malformed or rejected.
#[wasm_bindgen(js_name = export_xlsx)]
pub fn export_xlsx_js(request: JsValue) -> std::result::Result<Vec<u8>, JsValue> {
    let req = request_from_js(request)?;
    export_xlsx(&req.columns, &req.rows, &req.config).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Build the CSV fallback bytes for a `{ columns, rows, config }` request.
///
/// # Errors
/// Returns an error if the request is malformed or rejected.
#[wasm_bindgen(js_name = export_csv)]
pub fn export_csv_js(request: JsValue) -> std::result::Result<Vec<u8>, JsValue> {
    let req = request_from_js(request)?;
    export_csv(&req.columns, &req.rows, &req.config).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
