use serde::{Deserialize, Serialize};

/// One named document inside the ZIP container (e.g. `xl/workbook.xml`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchivePart {
    /// Path-like part name, unique within one archive
    pub name: String,
    /// UTF-8 text content, stored uncompressed
    pub content: String,
}

impl ArchivePart {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}
