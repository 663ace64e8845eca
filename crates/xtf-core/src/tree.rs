//! Minimal XML element tree, the only surface the codec sees.
//!
//! Wraps quick-xml's event reader/writer in a small document-order tree so
//! the codec can be exercised entirely in memory. Prolog, comments and
//! processing instructions are discarded on read; an XML declaration is
//! emitted on write.

use std::fs;
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::error::XtfError;

/// Output layout for serialized documents. Both modes carry the same
/// content; `Indented` only inserts whitespace between elements.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WriteMode {
    Compact,
    Indented,
}

/// One XML element: tag, attributes in document order, child elements in
/// document order, and accumulated text content.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
    text: String,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Attribute lookup by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, replacing any existing value under the same name.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self.attributes.iter_mut().find(|(key, _)| *key == name) {
            slot.1 = value;
        } else {
            self.attributes.push((name, value));
        }
    }

    /// Accumulated text content of this element.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// First child with the given tag.
    pub fn child(&self, tag: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.tag == tag)
    }

    /// All children with the given tag, in document order.
    pub fn children<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |child| child.tag == tag)
    }

    /// Append a child element.
    pub fn push_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Parse a document from string form, returning its root element.
    pub fn parse_document(xml: &str) -> Result<Element, XtfError> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(false);
        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;
        loop {
            match reader.read_event().map_err(bad_xml)? {
                Event::Start(start) => stack.push(element_from_start(&start)?),
                Event::Empty(start) => {
                    let element = element_from_start(&start)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| XtfError::Format("unbalanced end tag".to_string()))?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::Text(text) => {
                    if let Some(parent) = stack.last_mut() {
                        parent.text.push_str(&text.unescape().map_err(bad_xml)?);
                    }
                }
                Event::CData(data) => {
                    if let Some(parent) = stack.last_mut() {
                        parent
                            .text
                            .push_str(&String::from_utf8_lossy(&data.into_inner()));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }
        if !stack.is_empty() {
            return Err(XtfError::Format("unterminated element".to_string()));
        }
        root.ok_or_else(|| XtfError::Format("document has no root element".to_string()))
    }

    /// Parse a document from a file on disk.
    pub fn read_from_path(path: impl AsRef<Path>) -> Result<Element, XtfError> {
        let raw = fs::read_to_string(path)?;
        Self::parse_document(&raw)
    }

    /// Serialize to a standalone document string with an XML declaration.
    pub fn to_document_string(&self, mode: WriteMode) -> Result<String, XtfError> {
        let buffer = match mode {
            WriteMode::Compact => {
                let mut writer = Writer::new(Vec::new());
                self.write_document(&mut writer)?;
                writer.into_inner()
            }
            WriteMode::Indented => {
                let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
                self.write_document(&mut writer)?;
                writer.into_inner()
            }
        };
        String::from_utf8(buffer)
            .map_err(|err| XtfError::Format(format!("serialized document is not utf-8: {err}")))
    }

    /// Serialize a standalone document to a file on disk.
    pub fn write_to_path(&self, path: impl AsRef<Path>, mode: WriteMode) -> Result<(), XtfError> {
        let rendered = self.to_document_string(mode)?;
        fs::write(path, rendered.as_bytes())?;
        Ok(())
    }

    fn write_document<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<(), XtfError> {
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
            .map_err(write_failed)?;
        self.write_into(writer)
    }

    fn write_into<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<(), XtfError> {
        let mut start = BytesStart::new(self.tag.as_str());
        for (name, value) in &self.attributes {
            start.push_attribute((name.as_str(), value.as_str()));
        }
        if self.text.is_empty() && self.children.is_empty() {
            writer
                .write_event(Event::Empty(start))
                .map_err(write_failed)?;
            return Ok(());
        }
        writer
            .write_event(Event::Start(start))
            .map_err(write_failed)?;
        if !self.text.is_empty() {
            writer
                .write_event(Event::Text(BytesText::new(&self.text)))
                .map_err(write_failed)?;
        }
        for child in &self.children {
            child.write_into(writer)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new(self.tag.as_str())))
            .map_err(write_failed)?;
        Ok(())
    }
}

fn element_from_start(start: &BytesStart<'_>) -> Result<Element, XtfError> {
    let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut element = Element::new(tag);
    for attribute in start.attributes() {
        let attribute =
            attribute.map_err(|err| XtfError::Format(format!("bad attribute: {err}")))?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute.unescape_value().map_err(bad_xml)?.into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), XtfError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => return Err(XtfError::Format("multiple root elements".to_string())),
    }
    Ok(())
}

fn bad_xml(err: quick_xml::Error) -> XtfError {
    XtfError::Format(format!("invalid xml: {err}"))
}

fn write_failed(err: quick_xml::Error) -> XtfError {
    match err {
        quick_xml::Error::Io(io) => XtfError::Io(std::io::Error::new(io.kind(), io.to_string())),
        other => XtfError::Format(format!("xml write failed: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_attributes_text_and_nesting() {
        let root = Element::parse_document(
            r#"<?xml version="1.0"?><a id="r"><b>hello</b><b>again</b><c/></a>"#,
        )
        .expect("parse");
        assert_eq!(root.tag(), "a");
        assert_eq!(root.attribute("id"), Some("r"));
        assert_eq!(root.child("b").map(Element::text), Some("hello"));
        assert_eq!(root.children("b").count(), 2);
        assert!(root.child("c").is_some());
        assert!(root.child("d").is_none());
    }

    #[test]
    fn rejects_unbalanced_documents() {
        assert!(Element::parse_document("<a><b></a>").is_err());
        assert!(Element::parse_document("no markup").is_err());
    }

    #[test]
    fn escapes_round_trip() {
        let mut element = Element::new("note");
        element.set_attribute("title", "a<b & \"c\"");
        element.set_text("1 < 2 & 3 > 2");
        let rendered = element
            .to_document_string(WriteMode::Compact)
            .expect("serialize");
        let reparsed = Element::parse_document(&rendered).expect("reparse");
        assert_eq!(reparsed.attribute("title"), Some("a<b & \"c\""));
        assert_eq!(reparsed.text(), "1 < 2 & 3 > 2");
    }

    #[test]
    fn indented_output_only_differs_in_whitespace() {
        let mut root = Element::new("outer");
        let mut inner = Element::new("inner");
        inner.set_text("payload");
        root.push_child(inner);
        let compact = root
            .to_document_string(WriteMode::Compact)
            .expect("compact");
        let indented = root
            .to_document_string(WriteMode::Indented)
            .expect("indented");
        assert_ne!(compact, indented);
        let squeeze = |s: &str| s.split_whitespace().collect::<String>();
        assert_eq!(squeeze(&compact), squeeze(&indented));
    }
}
