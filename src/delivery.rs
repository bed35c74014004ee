//! Handing finished artifacts to their destination.
//!
//! Serialization never touches the outside world; a caller passes the
//! bytes to an [`ArtifactSink`]. Sinks exist for a directory on disk, for
//! memory, and for `data:` URLs (the shape a browser download link needs).

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::{Result, XlexportError};
use crate::export::Export;
use crate::namespaces::{MIME_CSV, MIME_XLSX};
use crate::types::validate_file_stem;

/// A named, typed blob ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// File name, e.g. `export.xlsx`
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl Artifact {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    /// `data:<mime>;base64,<payload>` form of the artifact.
    #[must_use]
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }
}

impl Export {
    /// The two artifacts of this export, named `<stem>.xlsx` and `<stem>.csv`.
    #[must_use]
    pub fn artifacts(&self, stem: &str) -> [Artifact; 2] {
        [
            Artifact::new(format!("{stem}.xlsx"), MIME_XLSX, self.xlsx.clone()),
            Artifact::new(format!("{stem}.csv"), MIME_CSV, self.csv.clone()),
        ]
    }
}

/// Destination for finished artifacts.
pub trait ArtifactSink {
    /// Deliver one artifact.
    ///
    /// # Errors
    /// Whatever the destination reports, typically I/O.
    fn deliver(&mut self, artifact: &Artifact) -> Result<()>;
}

/// Writes each artifact as a file in a directory, creating it if needed.
///
/// Artifact names must be a bare file name; anything that would resolve
/// outside the directory is refused before the filesystem is touched.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths written so far.
    #[must_use]
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl ArtifactSink for DirectorySink {
    fn deliver(&mut self, artifact: &Artifact) -> Result<()> {
        let name = Path::new(&artifact.name);
        if name.file_name() != Some(OsStr::new(&artifact.name)) {
            return Err(XlexportError::InvalidArtifactName(artifact.name.clone()));
        }
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(name);
        fs::write(&path, &artifact.bytes)?;
        self.written.push(path);
        Ok(())
    }
}

/// Keeps delivered artifacts in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub artifacts: Vec<Artifact>,
}

impl ArtifactSink for MemorySink {
    fn deliver(&mut self, artifact: &Artifact) -> Result<()> {
        self.artifacts.push(artifact.clone());
        Ok(())
    }
}

/// Collects `(file name, data URL)` pairs for a download link.
#[derive(Debug, Clone, Default)]
pub struct DataUrlSink {
    pub urls: Vec<(String, String)>,
}

impl ArtifactSink for DataUrlSink {
    fn deliver(&mut self, artifact: &Artifact) -> Result<()> {
        self.urls
            .push((artifact.name.clone(), artifact.to_data_url()));
        Ok(())
    }
}

/// Deliver both artifacts of `export` under `stem`, xlsx first.
///
/// # Errors
/// [`XlexportError::InvalidFileStem`] if `stem` is not a bare file name,
/// otherwise the first error reported by the sink; later artifacts are not
/// delivered.
pub fn deliver_export(export: &Export, stem: &str, sink: &mut dyn ArtifactSink) -> Result<()> {
    validate_file_stem(stem)?;
    for artifact in export.artifacts(stem) {
        sink.deliver(&artifact)?;
    }
    Ok(())
}
