//! Generates `xl/styles.xml`.
//!
//! The style table is fixed: a default cell format, a bold header format
//! on a solid accent fill, and (only when some column wraps) a wrap-text
//! format aligned to the top. Cells point at these by `cellXfs` index.

use crate::error::Result;
use crate::namespaces::NS_SPREADSHEET;
use crate::types::{normalize_argb, ExportConfig};
use crate::xml_helpers::{xml_escape, XML_DECLARATION};

/// `cellXfs` index of the default format.
pub const STYLE_DEFAULT: u32 = 0;

/// `cellXfs` index of the header format.
pub const STYLE_HEADER: u32 = 1;

/// `cellXfs` index of the wrap-text format, present only when requested.
pub const STYLE_WRAP: u32 = 2;

/// Write the style table. `with_wrap` adds the [`STYLE_WRAP`] format.
///
/// # Errors
/// [`crate::XlexportError::InvalidColor`] if a configured color is not hex.
pub(crate) fn write_styles_xml(config: &ExportConfig, with_wrap: bool) -> Result<String> {
    let fill = normalize_argb(&config.header_fill)?;
    let font_color = normalize_argb(&config.header_font_color)?;
    let font_name = xml_escape(&config.font_name);
    let size = config.font_size;

    let mut out = String::with_capacity(1536);
    out.push_str(XML_DECLARATION);
    out.push('\n');
    out.push_str(&format!("<styleSheet xmlns=\"{NS_SPREADSHEET}\">\n"));

    // Font 0: body, font 1: header
    out.push_str("<fonts count=\"2\">");
    out.push_str(&format!(
        "<font><sz val=\"{size}\"/><name val=\"{font_name}\"/><family val=\"2\"/></font>"
    ));
    out.push_str(&format!(
        "<font><b/><sz val=\"{size}\"/><color rgb=\"{font_color}\"/><name val=\"{font_name}\"/><family val=\"2\"/></font>"
    ));
    out.push_str("</fonts>\n");

    // Fills 0 and 1 are reserved by the format; 2 is the header accent
    out.push_str("<fills count=\"3\">");
    out.push_str("<fill><patternFill patternType=\"none\"/></fill>");
    out.push_str("<fill><patternFill patternType=\"gray125\"/></fill>");
    out.push_str(&format!(
        "<fill><patternFill patternType=\"solid\"><fgColor rgb=\"{fill}\"/><bgColor indexed=\"64\"/></patternFill></fill>"
    ));
    out.push_str("</fills>\n");

    out.push_str("<borders count=\"1\"><border><left/><right/><top/><bottom/><diagonal/></border></borders>\n");
    out.push_str("<cellStyleXfs count=\"1\"><xf numFmtId=\"0\" fontId=\"0\" fillId=\"0\" borderId=\"0\"/></cellStyleXfs>\n");

    let xf_count = if with_wrap { 3 } else { 2 };
    out.push_str(&format!("<cellXfs count=\"{xf_count}\">"));
    out.push_str("<xf numFmtId=\"0\" fontId=\"0\" fillId=\"0\" borderId=\"0\" xfId=\"0\"/>");
    out.push_str("<xf numFmtId=\"0\" fontId=\"1\" fillId=\"2\" borderId=\"0\" xfId=\"0\" applyFont=\"1\" applyFill=\"1\"/>");
    if with_wrap {
        out.push_str("<xf numFmtId=\"0\" fontId=\"0\" fillId=\"0\" borderId=\"0\" xfId=\"0\" applyAlignment=\"1\"><alignment vertical=\"top\" wrapText=\"1\"/></xf>");
    }
    out.push_str("</cellXfs>\n");

    out.push_str("<cellStyles count=\"1\"><cellStyle name=\"Normal\" xfId=\"0\" builtinId=\"0\"/></cellStyles>\n");
    out.push_str("</styleSheet>");
    Ok(out)
}
