//! Delimited-text fallback export.
//!
//! Every field is wrapped in double quotes and embedded quotes are
//! doubled, so separators and line breaks inside values need no further
//! handling.

use crate::types::{Column, Row};

const UTF8_BOM: &str = "\u{feff}";

/// Field separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
}

impl Delimiter {
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
        }
    }
}

/// Output options for [`write_delimited`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimitedOptions {
    pub delimiter: Delimiter,
    pub line_ending: String,
    /// Prefix a UTF-8 byte order mark (helps Excel detect the encoding)
    pub bom: bool,
}

impl Default for DelimitedOptions {
    fn default() -> Self {
        Self {
            delimiter: Delimiter::Comma,
            line_ending: "\n".to_string(),
            bom: false,
        }
    }
}

/// Quote a single field: `a"b` → `"a""b"`.
#[must_use]
pub fn quote_field(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        if ch == '"' {
            out.push('"');
        }
        out.push(ch);
    }
    out.push('"');
    out
}

/// Render a header line and one line per row.
///
/// Values are looked up by column key; missing keys give `""`. Every
/// line, the last included, ends with the configured line ending.
#[must_use]
pub fn write_delimited(columns: &[Column], rows: &[Row], options: &DelimitedOptions) -> String {
    let sep = options.delimiter.as_char();
    let mut out = String::new();
    if options.bom {
        out.push_str(UTF8_BOM);
    }

    write_line(&mut out, columns.iter().map(|c| c.header.as_str()), sep);
    out.push_str(&options.line_ending);
    for row in rows {
        write_line(&mut out, columns.iter().map(|c| row.get(&c.key)), sep);
        out.push_str(&options.line_ending);
    }
    out
}

fn write_line<'a>(out: &mut String, fields: impl Iterator<Item = &'a str>, sep: char) {
    for (idx, field) in fields.enumerate() {
        if idx > 0 {
            out.push(sep);
        }
        out.push_str(&quote_field(field));
    }
}
