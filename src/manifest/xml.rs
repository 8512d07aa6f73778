//! Minimal indenting XML writer

use std::borrow::Cow;

/// Writes elements and attributes into an in-memory document
///
/// Elements must be closed in reverse order of opening; [`XmlWriter::finish`]
/// closes anything still open.
#[derive(Debug, Default)]
pub struct XmlWriter {
    out: String,
    open: Vec<&'static str>,
}

impl XmlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declaration(&mut self) {
        self.out
            .push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    }

    /// Open an element that will contain children
    pub fn start(&mut self, name: &'static str, attrs: &[(&str, &str)]) {
        self.write_tag(name, attrs, false);
        self.open.push(name);
    }

    /// Write a self-closing element
    pub fn empty(&mut self, name: &'static str, attrs: &[(&str, &str)]) {
        self.write_tag(name, attrs, true);
    }

    /// Close the most recently opened element
    pub fn end(&mut self) {
        if let Some(name) = self.open.pop() {
            self.indent();
            self.out.push_str("</");
            self.out.push_str(name);
            self.out.push_str(">\n");
        }
    }

    pub fn finish(mut self) -> String {
        while !self.open.is_empty() {
            self.end();
        }
        self.out
    }

    fn write_tag(&mut self, name: &str, attrs: &[(&str, &str)], self_closing: bool) {
        self.indent();
        self.out.push('<');
        self.out.push_str(name);
        for (key, value) in attrs {
            self.out.push(' ');
            self.out.push_str(key);
            self.out.push_str("=\"");
            self.out.push_str(&escape(value));
            self.out.push('"');
        }
        self.out.push_str(if self_closing { " />\n" } else { ">\n" });
    }

    fn indent(&mut self) {
        for _ in 0..self.open.len() {
            self.out.push('\t');
        }
    }
}

/// Whether XML 1.0 can represent `c` at all, escaped or not
pub fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}

/// Escape a value for use inside a double-quoted attribute
pub fn escape(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>', '"', '\'', '\n', '\r', '\t']) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '\n' => escaped.push_str("&#10;"),
            '\r' => escaped.push_str("&#13;"),
            '\t' => escaped.push_str("&#9;"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}
