//! CLI tool for xlexport - turns a JSON export request into XLSX + CSV files
//!
//! Usage:
//!   xlexport_cli <request.json>                    # writes export.xlsx, export.csv
//!   xlexport_cli <request.json> -o out --stem tree # writes out/tree.xlsx, out/tree.csv
//!
//! The request is `{ "columns": [...], "rows": [...], "config": {...} }`.

#![allow(clippy::exit)]

use std::process;

use xlexport::cli::{parse_args, run_with_args};

fn main() {
    let args = parse_args();
    match run_with_args(&args) {
        Ok(summary) => {
            for path in &summary.written {
                eprintln!("Written: {}", path.display());
            }
            eprintln!("{} rows x {} columns", summary.rows, summary.columns);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
