//! Shared helpers for writing XML text.
//!
//! Every value placed into a generated part goes through [`xml_escape`];
//! element and attribute names are fixed ASCII and are written as is.

/// XML declaration heading every generated part.
pub const XML_DECLARATION: &str =
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// Escape text for element content or a double-quoted attribute value.
///
/// `&`, `<`, `>`, `"` become entity references; line feed and carriage
/// return become numeric character references so attribute normalization
/// cannot fold them into spaces. Control characters XML 1.0 cannot carry
/// at all are dropped.
#[must_use]
pub fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    push_escaped(&mut out, s);
    out
}

/// [`xml_escape`] appending into an existing buffer.
pub fn push_escaped(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            '\t' => out.push(c),
            c if is_forbidden_control(c) => {}
            _ => out.push(c),
        }
    }
}

/// C0 controls (other than tab, LF, CR) and the U+FFFE/U+FFFF noncharacters.
fn is_forbidden_control(c: char) -> bool {
    matches!(c, '\u{0}'..='\u{8}' | '\u{b}' | '\u{c}' | '\u{e}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}')
}

/// Whether inline text needs `xml:space="preserve"` to survive readers
/// that trim element content.
#[must_use]
pub fn needs_space_preserve(s: &str) -> bool {
    s.starts_with(char::is_whitespace) || s.ends_with(char::is_whitespace) || s.contains('\n')
}
