//! Package-level parts: content types, relationships, workbook manifest.
//!
//! Each part declares or references the others by the names in
//! [`super`]; the worksheet is `rId1` and the style table `rId2` of the
//! workbook relationships.

use crate::namespaces::{
    CT_RELATIONSHIPS, CT_STYLES, CT_WORKBOOK, CT_WORKSHEET, CT_XML, NS_CONTENT_TYPES,
    NS_OFFICE_RELATIONSHIPS, NS_RELATIONSHIPS, NS_SPREADSHEET, REL_STYLES, REL_WORKBOOK,
    REL_WORKSHEET,
};
use crate::xml_helpers::{xml_escape, XML_DECLARATION};

use super::{PART_STYLES, PART_WORKBOOK, PART_WORKSHEET};

/// Relationship id of the worksheet inside `xl/_rels/workbook.xml.rels`.
const RID_WORKSHEET: &str = "rId1";
const RID_STYLES: &str = "rId2";

/// `[Content_Types].xml`
pub(crate) fn write_content_types_xml() -> String {
    let mut out = String::with_capacity(1024);
    out.push_str(XML_DECLARATION);
    out.push('\n');
    out.push_str(&format!("<Types xmlns=\"{NS_CONTENT_TYPES}\">"));
    out.push_str(&format!(
        "<Default Extension=\"rels\" ContentType=\"{CT_RELATIONSHIPS}\"/>"
    ));
    out.push_str(&format!("<Default Extension=\"xml\" ContentType=\"{CT_XML}\"/>"));
    for (part, content_type) in [
        (PART_WORKBOOK, CT_WORKBOOK),
        (PART_WORKSHEET, CT_WORKSHEET),
        (PART_STYLES, CT_STYLES),
    ] {
        out.push_str(&format!(
            "<Override PartName=\"/{part}\" ContentType=\"{content_type}\"/>"
        ));
    }
    out.push_str("</Types>");
    out
}

/// `_rels/.rels`: package root to workbook.
pub(crate) fn write_root_rels_xml() -> String {
    let mut out = String::with_capacity(384);
    out.push_str(XML_DECLARATION);
    out.push('\n');
    out.push_str(&format!("<Relationships xmlns=\"{NS_RELATIONSHIPS}\">"));
    out.push_str(&format!(
        "<Relationship Id=\"rId1\" Type=\"{REL_WORKBOOK}\" Target=\"{PART_WORKBOOK}\"/>"
    ));
    out.push_str("</Relationships>");
    out
}

/// `xl/workbook.xml` declaring the single sheet.
///
/// `filter_range` is the auto-filter rectangle (e.g. `$A$1:$B$3`); when
/// present the hidden `_xlnm._FilterDatabase` name Excel expects is added.
pub(crate) fn write_workbook_xml(sheet_name: &str, filter_range: Option<&str>) -> String {
    let mut out = String::with_capacity(768);
    out.push_str(XML_DECLARATION);
    out.push('\n');
    out.push_str(&format!(
        "<workbook xmlns=\"{NS_SPREADSHEET}\" xmlns:r=\"{NS_OFFICE_RELATIONSHIPS}\">"
    ));
    out.push_str("<bookViews><workbookView activeTab=\"0\"/></bookViews>");
    out.push_str(&format!(
        "<sheets><sheet name=\"{}\" sheetId=\"1\" r:id=\"{RID_WORKSHEET}\"/></sheets>",
        xml_escape(sheet_name)
    ));
    if let Some(range) = filter_range {
        let quoted = sheet_name.replace('\'', "''");
        out.push_str("<definedNames>");
        out.push_str(&format!(
            "<definedName name=\"_xlnm._FilterDatabase\" localSheetId=\"0\" hidden=\"1\">'{}'!{}</definedName>",
            xml_escape(&quoted),
            range
        ));
        out.push_str("</definedNames>");
    }
    out.push_str("</workbook>");
    out
}

/// `xl/_rels/workbook.xml.rels`: workbook to worksheet and styles.
///
/// Targets are relative to `xl/`.
pub(crate) fn write_workbook_rels_xml() -> String {
    let sheet_target = PART_WORKSHEET.trim_start_matches("xl/");
    let styles_target = PART_STYLES.trim_start_matches("xl/");

    let mut out = String::with_capacity(512);
    out.push_str(XML_DECLARATION);
    out.push('\n');
    out.push_str(&format!("<Relationships xmlns=\"{NS_RELATIONSHIPS}\">"));
    out.push_str(&format!(
        "<Relationship Id=\"{RID_WORKSHEET}\" Type=\"{REL_WORKSHEET}\" Target=\"{sheet_target}\"/>"
    ));
    out.push_str(&format!(
        "<Relationship Id=\"{RID_STYLES}\" Type=\"{REL_STYLES}\" Target=\"{styles_target}\"/>"
    ));
    out.push_str("</Relationships>");
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_content_types_overrides() {
        let xml = write_content_types_xml();
        assert!(xml.contains("<Override PartName=\"/xl/workbook.xml\""));
        assert!(xml.contains("<Override PartName=\"/xl/worksheets/sheet1.xml\""));
        assert!(xml.contains("<Override PartName=\"/xl/styles.xml\""));
        assert!(xml.contains("<Default Extension=\"rels\""));
        assert_eq!(xml.matches("<Override ").count(), 3);
    }

    #[test]
    fn test_root_rels_targets_workbook() {
        let xml = write_root_rels_xml();
        assert!(xml.contains("Target=\"xl/workbook.xml\""));
        assert!(xml.contains(REL_WORKBOOK));
    }

    #[test]
    fn test_workbook_declares_one_sheet() {
        let xml = write_workbook_xml("Tree & Leaves", None);
        assert_eq!(xml.matches("<sheet ").count(), 1);
        assert!(xml.contains("name=\"Tree &amp; Leaves\" sheetId=\"1\" r:id=\"rId1\""));
        assert!(!xml.contains("definedNames"));
    }

    #[test]
    fn test_workbook_filter_database_name() {
        let xml = write_workbook_xml("Bob's", Some("$A$1:$B$3"));
        assert!(xml.contains("localSheetId=\"0\" hidden=\"1\">'Bob''s'!$A$1:$B$3</definedName>"));
    }

    #[test]
    fn test_workbook_rels_relative_targets() {
        let xml = write_workbook_rels_xml();
        assert!(xml.contains("Id=\"rId1\""));
        assert!(xml.contains("Target=\"worksheets/sheet1.xml\""));
        assert!(xml.contains("Id=\"rId2\""));
        assert!(xml.contains("Target=\"styles.xml\""));
    }
}
