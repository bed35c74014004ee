//! Tests for the command-line run: request file in, files in a directory out.
#![cfg(feature = "cli")]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

mod common;

use std::path::Path;

use clap::Parser;
use common::{first_attr, part_names, read_part};
use xlexport::cli::{run_with_args, Args};
use xlexport::export::PART_WORKBOOK;
use xlexport::XlexportError;

const REQUEST: &str = r#"{
    "columns": [
        {"header": "Name", "key": "name", "width": 10},
        {"header": "Notes", "key": "notes", "width": 20, "wrap": true}
    ],
    "rows": [{"name": "A", "notes": "line1\nline2"}, {"name": "B"}],
    "config": {"sheetName": "FromFile", "fileStem": "from-file"}
}"#;

fn write_request(dir: &Path, json: &str) -> String {
    let path = dir.join("request.json");
    std::fs::write(&path, json).unwrap();
    path.to_str().unwrap().to_string()
}

fn args(extra: &[&str]) -> Args {
    Args::try_parse_from(std::iter::once("xlexport_cli").chain(extra.iter().copied())).unwrap()
}

#[test]
fn test_run_uses_request_config() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_request(dir.path(), REQUEST);
    let out = dir.path().join("out");

    let summary = run_with_args(&args(&[input.as_str(), "-o", out.to_str().unwrap()])).unwrap();

    assert_eq!(summary.written, [out.join("from-file.xlsx"), out.join("from-file.csv")]);
    assert_eq!((summary.rows, summary.columns), (2, 2));
    let xlsx = std::fs::read(out.join("from-file.xlsx")).unwrap();
    let workbook = read_part(&xlsx, PART_WORKBOOK);
    assert_eq!(first_attr(&workbook, "sheet", "name").as_deref(), Some("FromFile"));
}

#[test]
fn test_run_stem_and_sheet_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_request(dir.path(), REQUEST);
    let out = dir.path().join("out");

    let summary = run_with_args(&args(&[
        input.as_str(),
        "--out-dir",
        out.to_str().unwrap(),
        "--stem",
        "tree",
        "--sheet",
        "Nodes",
    ]))
    .unwrap();

    assert_eq!(summary.written, [out.join("tree.xlsx"), out.join("tree.csv")]);
    assert!(!out.join("from-file.xlsx").exists());
    let xlsx = std::fs::read(out.join("tree.xlsx")).unwrap();
    assert_eq!(part_names(&xlsx).len(), 6);
    let workbook = read_part(&xlsx, PART_WORKBOOK);
    assert_eq!(first_attr(&workbook, "sheet", "name").as_deref(), Some("Nodes"));
    let csv = std::fs::read_to_string(out.join("tree.csv")).unwrap();
    assert!(csv.starts_with("\"Name\",\"Notes\""));
}

#[test]
fn test_run_no_csv_writes_only_xlsx() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_request(dir.path(), REQUEST);
    let out = dir.path().join("out");

    let summary =
        run_with_args(&args(&[input.as_str(), "-o", out.to_str().unwrap(), "--stem", "t", "--no-csv"]))
            .unwrap();

    assert_eq!(summary.written, [out.join("t.xlsx")]);
    assert!(out.join("t.xlsx").exists());
    assert!(!out.join("t.csv").exists());
    let entries: Vec<_> = std::fs::read_dir(&out).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn test_run_rejects_traversing_stem() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_request(dir.path(), REQUEST);
    let out = dir.path().join("out");

    for flags in [&["--stem", "../escaped"][..], &["--stem", "../escaped", "--no-csv"][..]] {
        let mut argv = vec![input.as_str(), "-o", out.to_str().unwrap()];
        argv.extend_from_slice(flags);
        let err = run_with_args(&args(&argv)).unwrap_err();
        assert!(matches!(err, XlexportError::InvalidFileStem(_)));
    }
    assert!(!dir.path().join("escaped.xlsx").exists());
}

#[test]
fn test_run_reports_bad_input() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.json");
    let err = run_with_args(&args(&[missing.to_str().unwrap()])).unwrap_err();
    assert!(matches!(err, XlexportError::Io(_)));

    let input = write_request(dir.path(), "{\"rows\": []}");
    let err = run_with_args(&args(&[input.as_str()])).unwrap_err();
    assert!(matches!(err, XlexportError::Json(_)));
}
