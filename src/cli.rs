//! Command-line surface shared by the `xlexport_cli` binary and its tests.
//!
//! The binary only parses arguments and reports; everything that touches
//! the request or the filesystem lives here.

use std::fs;
use std::path::PathBuf;

use clap::Parser;

use crate::delivery::{deliver_export, Artifact, ArtifactSink, DirectorySink};
use crate::error::Result;
use crate::export::export_xlsx;
use crate::namespaces::MIME_XLSX;
use crate::types::ExportRequest;

#[derive(Debug, Parser)]
#[command(version, about = "Export tabular rows to XLSX (and a CSV fallback).")]
pub struct Args {
    /// JSON request with columns, rows, and optional config.
    pub input: PathBuf,

    /// Output directory.
    #[arg(short = 'o', long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Base file name; overrides `config.fileStem`.
    #[arg(long)]
    pub stem: Option<String>,

    /// Worksheet name; overrides `config.sheetName`.
    #[arg(long)]
    pub sheet: Option<String>,

    /// Skip the CSV fallback.
    #[arg(long)]
    pub no_csv: bool,
}

/// What a run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Files written, xlsx first
    pub written: Vec<PathBuf>,
    pub rows: usize,
    pub columns: usize,
}

/// Parse the process arguments.
#[must_use]
pub fn parse_args() -> Args {
    Args::parse()
}

/// Read the request, apply the overrides, and write the artifacts.
///
/// # Errors
/// I/O and JSON errors reading the request, validation errors from the
/// export, and I/O errors from the output directory.
pub fn run_with_args(args: &Args) -> Result<RunSummary> {
    let data = fs::read(&args.input)?;
    let mut request = ExportRequest::from_json_slice(&data)?;
    if let Some(stem) = &args.stem {
        request.config.file_stem.clone_from(stem);
    }
    if let Some(sheet) = &args.sheet {
        request.config.sheet_name.clone_from(sheet);
    }

    let mut sink = DirectorySink::new(&args.out_dir);
    let stem = &request.config.file_stem;
    if args.no_csv {
        let xlsx = export_xlsx(&request.columns, &request.rows, &request.config)?;
        sink.deliver(&Artifact::new(format!("{stem}.xlsx"), MIME_XLSX, xlsx))?;
    } else {
        let export = request.export()?;
        deliver_export(&export, stem, &mut sink)?;
    }

    Ok(RunSummary {
        written: sink.written().to_vec(),
        rows: request.rows.len(),
        columns: request.columns.len(),
    })
}
